//! Gather Responses use case
//!
//! Consults advisors concurrently under one shared deadline, reading through
//! the response cache.

use super::single_flight::KeyLocks;
use crate::ports::advisor_gateway::{AdvisorError, AdvisorGateway};
use crate::ports::progress::CoordinationProgress;
use crate::ports::response_cache::ResponseCache;
use council_domain::{AdvisorId, AgentResponse, CacheKey, Query};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that end a gather early
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatherError {
    #[error("Gather cancelled")]
    Cancelled,
}

/// Concurrent, deadline-bounded advisor consultation
pub struct ResponseGatherer<G: AdvisorGateway + 'static> {
    gateway: Arc<G>,
    cache: Arc<dyn ResponseCache>,
    locks: Arc<KeyLocks>,
    default_confidence: f64,
}

impl<G: AdvisorGateway + 'static> ResponseGatherer<G> {
    pub fn new(gateway: Arc<G>, cache: Arc<dyn ResponseCache>) -> Self {
        Self {
            gateway,
            cache,
            locks: Arc::new(KeyLocks::new()),
            default_confidence: 0.8,
        }
    }

    pub fn with_default_confidence(mut self, confidence: f64) -> Self {
        self.default_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Consult every advisor in `advisors` and return one response each.
    ///
    /// Advisors still running when `deadline` elapses are aborted and get a
    /// timeout placeholder; completed responses are kept. A failing advisor
    /// gets an error placeholder and never affects the others. Output follows
    /// the order of `advisors`, without repeats.
    pub async fn gather(
        &self,
        advisors: &[AdvisorId],
        query: &Query,
        deadline: Duration,
        cancel: &CancellationToken,
        progress: &dyn CoordinationProgress,
    ) -> Result<Vec<AgentResponse>, GatherError> {
        let mut requested: Vec<AdvisorId> = Vec::with_capacity(advisors.len());
        for advisor in advisors {
            if !requested.contains(advisor) {
                requested.push(*advisor);
            }
        }

        info!(
            "Consulting {} advisors (deadline {:?})",
            requested.len(),
            deadline
        );

        let deadline_at = Instant::now() + deadline;
        let mut join_set = JoinSet::new();

        for &advisor in &requested {
            let gateway = Arc::clone(&self.gateway);
            let cache = Arc::clone(&self.cache);
            let locks = Arc::clone(&self.locks);
            let query = query.clone();
            let confidence = self.default_confidence;

            join_set.spawn(async move {
                let response =
                    Self::consult(&gateway, cache.as_ref(), &locks, advisor, &query, confidence)
                        .await;
                (advisor, response)
            });
        }

        let mut completed: HashMap<AdvisorId, AgentResponse> = HashMap::new();
        let mut timed_out = false;

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    warn!("Gather cancelled with {} advisors outstanding", join_set.len());
                    join_set.abort_all();
                    return Err(GatherError::Cancelled);
                }
                _ = tokio::time::sleep_until(deadline_at) => {
                    warn!(
                        "Deadline of {:?} elapsed with {} advisors outstanding",
                        deadline,
                        join_set.len()
                    );
                    join_set.abort_all();
                    timed_out = true;
                    break;
                }
                next = join_set.join_next() => match next {
                    None => break,
                    Some(Ok((advisor, response))) => {
                        progress.on_advisor_complete(
                            advisor,
                            !response.is_error(),
                            response.is_cached(),
                        );
                        completed.insert(advisor, response);
                    }
                    Some(Err(e)) => {
                        warn!("Advisor task failed: {}", e);
                    }
                },
            }
        }

        let responses = requested
            .into_iter()
            .map(|advisor| match completed.remove(&advisor) {
                Some(response) => response,
                None if timed_out => {
                    progress.on_advisor_complete(advisor, false, false);
                    AgentResponse::timeout(advisor)
                }
                None => AgentResponse::failure(advisor, "advisor task aborted"),
            })
            .collect();

        Ok(responses)
    }

    /// Read-through consultation of one advisor.
    ///
    /// Only successful replies are cached. Concurrent misses on the same key
    /// wait for the first caller and reuse its cached reply.
    async fn consult(
        gateway: &G,
        cache: &dyn ResponseCache,
        locks: &KeyLocks,
        advisor: AdvisorId,
        query: &Query,
        confidence: f64,
    ) -> AgentResponse {
        let key = CacheKey::new(advisor, query.text(), query.context());

        if let Some(hit) = cache.get(&key) {
            debug!("Cache hit for {} ({})", advisor, key);
            return hit.as_cached();
        }

        let _guard = locks.acquire(&key).await;
        if let Some(hit) = cache.get(&key) {
            debug!("Cache filled while waiting for {} ({})", advisor, key);
            return hit.as_cached();
        }

        match gateway.invoke(advisor, query).await {
            Ok(reply) if reply.trim().is_empty() => {
                warn!("{} returned an empty reply", advisor);
                AgentResponse::failure(advisor, AdvisorError::EmptyReply.to_string())
            }
            Ok(reply) => {
                debug!("{} responded ({} chars)", advisor, reply.len());
                let response = AgentResponse::success(advisor, reply, confidence);
                cache.insert(key, response.clone());
                response
            }
            Err(e) => {
                warn!("{} failed: {}", advisor, e);
                AgentResponse::failure(advisor, e.to_string())
            }
        }
    }
}
