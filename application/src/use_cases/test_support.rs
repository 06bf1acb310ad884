//! Scripted port implementations shared by the use case tests

use crate::ports::advisor_gateway::{AdvisorError, AdvisorGateway};
use crate::ports::response_cache::ResponseCache;
use async_trait::async_trait;
use council_domain::{AdvisorId, AgentResponse, CacheKey, Query};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What a scripted advisor does when invoked
#[derive(Debug, Clone)]
pub enum Script {
    Reply(String),
    Fail(AdvisorError),
    Delayed(Duration, String),
}

/// Gateway answering from a per-advisor script, counting every call
#[derive(Default)]
pub struct ScriptedGateway {
    scripts: HashMap<AdvisorId, Script>,
    routing_reply: Option<Script>,
    calls: Mutex<HashMap<AdvisorId, usize>>,
    routing_calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, advisor: AdvisorId, text: &str) -> Self {
        self.scripts
            .insert(advisor, Script::Reply(text.to_string()));
        self
    }

    pub fn with_failure(mut self, advisor: AdvisorId, error: AdvisorError) -> Self {
        self.scripts.insert(advisor, Script::Fail(error));
        self
    }

    pub fn with_delay(mut self, advisor: AdvisorId, delay: Duration, text: &str) -> Self {
        self.scripts
            .insert(advisor, Script::Delayed(delay, text.to_string()));
        self
    }

    pub fn with_routing_reply(mut self, script: Script) -> Self {
        self.routing_reply = Some(script);
        self
    }

    /// Same reply for every advisor, each delayed by `delay`
    pub fn all_delayed(delay: Duration) -> Self {
        let mut gateway = Self::new();
        for advisor in AdvisorId::ALL {
            gateway = gateway.with_delay(advisor, delay, "- Too late");
        }
        gateway
    }

    pub fn calls(&self, advisor: AdvisorId) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&advisor)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn routing_calls(&self) -> usize {
        self.routing_calls.load(Ordering::SeqCst)
    }

    async fn run(script: Option<Script>, advisor: AdvisorId) -> Result<String, AdvisorError> {
        match script {
            Some(Script::Reply(text)) => Ok(text),
            Some(Script::Fail(error)) => Err(error),
            Some(Script::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            None => Ok(format!("{} has nothing to add.", advisor.display_name())),
        }
    }
}

#[async_trait]
impl AdvisorGateway for ScriptedGateway {
    async fn invoke(&self, advisor: AdvisorId, query: &Query) -> Result<String, AdvisorError> {
        if query.text().contains("Which specialist advisors should be consulted?") {
            self.routing_calls.fetch_add(1, Ordering::SeqCst);
            let script = self
                .routing_reply
                .clone()
                .unwrap_or_else(|| Script::Fail(AdvisorError::Other("no routing".into())));
            return Self::run(Some(script), advisor).await;
        }

        *self.calls.lock().unwrap().entry(advisor).or_insert(0) += 1;
        Self::run(self.scripts.get(&advisor).cloned(), advisor).await
    }
}

/// Unbounded hash-map cache
#[derive(Default)]
pub struct MapCache {
    entries: Mutex<HashMap<CacheKey, AgentResponse>>,
}

impl ResponseCache for MapCache {
    fn get(&self, key: &CacheKey) -> Option<AgentResponse> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn insert(&self, key: CacheKey, response: AgentResponse) {
        self.entries.lock().unwrap().insert(key, response);
    }

    fn invalidate(&self, key: &CacheKey) -> bool {
        self.entries.lock().unwrap().remove(key).is_some()
    }

    fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn cleanup(&self) -> usize {
        0
    }
}
