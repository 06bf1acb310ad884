//! In-memory response cache with LRU eviction and optional expiry.

use council_application::ResponseCache;
use council_domain::{AgentResponse, CacheKey};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default number of entries kept
pub const DEFAULT_CAPACITY: usize = 512;
/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    response: AgentResponse,
    expires_at: Option<Instant>,
    last_used: u64,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    clock: u64,
}

impl CacheState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            debug!(key = %key, "Evicting least recently used response");
            self.entries.remove(&key);
        }
    }
}

/// Process-wide [`ResponseCache`] backed by a mutex-guarded map.
///
/// Reads refresh an entry's recency. Expired entries are dropped lazily on
/// lookup, and in bulk by [`cleanup`](ResponseCache::cleanup).
pub struct InMemoryResponseCache {
    state: Mutex<CacheState>,
    capacity: usize,
    ttl: Option<Duration>,
}

impl InMemoryResponseCache {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_CAPACITY, Some(DEFAULT_TTL))
    }

    /// A zero capacity is raised to one; `None` disables expiry.
    pub fn with_limits(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache for InMemoryResponseCache {
    fn get(&self, key: &CacheKey) -> Option<AgentResponse> {
        let mut state = self.lock();
        let now = Instant::now();
        let tick = state.tick();

        let expired = state.entries.get(key)?.is_expired(now);
        if expired {
            state.entries.remove(key);
            return None;
        }
        let entry = state.entries.get_mut(key)?;
        entry.last_used = tick;
        Some(entry.response.clone())
    }

    fn insert(&self, key: CacheKey, response: AgentResponse) {
        let mut state = self.lock();
        let tick = state.tick();
        if !state.entries.contains_key(&key) && state.entries.len() >= self.capacity {
            state.evict_least_recent();
        }
        let expires_at = self.ttl.map(|ttl| Instant::now() + ttl);
        state.entries.insert(
            key,
            CacheEntry {
                response,
                expires_at,
                last_used: tick,
            },
        );
    }

    fn invalidate(&self, key: &CacheKey) -> bool {
        self.lock().entries.remove(key).is_some()
    }

    fn clear(&self) {
        self.lock().entries.clear();
    }

    fn len(&self) -> usize {
        self.lock().entries.len()
    }

    fn cleanup(&self) -> usize {
        let mut state = self.lock();
        let now = Instant::now();
        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - state.entries.len();
        if removed > 0 {
            debug!(removed, "Purged expired responses");
        }
        removed
    }
}
