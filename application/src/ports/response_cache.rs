//! Response cache port
//!
//! Process-wide store of successful advisor responses, shared by every
//! coordination call. All operations are synchronous and must not block for
//! long: they are called from inside advisor tasks.

use council_domain::{AgentResponse, CacheKey};

/// Store of advisor responses keyed by [`CacheKey`]
pub trait ResponseCache: Send + Sync {
    /// Look up a live entry
    fn get(&self, key: &CacheKey) -> Option<AgentResponse>;

    /// Store a response, replacing any previous entry
    fn insert(&self, key: CacheKey, response: AgentResponse);

    /// Remove one entry, returning whether it existed
    fn invalidate(&self, key: &CacheKey) -> bool;

    /// Remove every entry
    fn clear(&self);

    /// Number of stored entries, expired ones included until [`cleanup`](Self::cleanup)
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Purge expired entries, returning how many were removed
    fn cleanup(&self) -> usize;
}

/// Cache that stores nothing, used when caching is disabled
pub struct NoCache;

impl ResponseCache for NoCache {
    fn get(&self, _key: &CacheKey) -> Option<AgentResponse> {
        None
    }
    fn insert(&self, _key: CacheKey, _response: AgentResponse) {}
    fn invalidate(&self, _key: &CacheKey) -> bool {
        false
    }
    fn clear(&self) {}
    fn len(&self) -> usize {
        0
    }
    fn cleanup(&self) -> usize {
        0
    }
}
