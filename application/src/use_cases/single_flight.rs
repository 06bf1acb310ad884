//! Per-key async locks for single-flight cache fills.
//!
//! Concurrent misses for the same [`CacheKey`] queue on one lock, so only
//! the first holder calls the advisor; the others re-check the cache once
//! they get the lock. Entries are dropped from the registry as soon as no
//! task holds or waits on them.

use council_domain::CacheKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One registry entry: the key's lock plus how many tasks hold or await it
#[derive(Default)]
struct Slot {
    lock: Arc<AsyncMutex<()>>,
    users: usize,
}

/// Registry of in-flight cache keys
#[derive(Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<CacheKey, Slot>>,
}

/// Counts one task against a key until dropped, whether it got the lock or not
struct Ticket<'a> {
    registry: &'a KeyLocks,
    key: CacheKey,
}

/// Exclusive hold on one key, released on drop
pub struct KeyGuard<'a> {
    // Field order matters: the lock is released before the ticket leaves
    _guard: OwnedMutexGuard<()>,
    _ticket: Ticket<'a>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until `key` is free and take it
    ///
    /// Cancelling the returned future still releases the caller's claim on
    /// the registry entry.
    pub async fn acquire(&self, key: &CacheKey) -> KeyGuard<'_> {
        let lock = {
            let mut locks = self.slots();
            let slot = locks.entry(key.clone()).or_default();
            slot.users += 1;
            Arc::clone(&slot.lock)
        };
        let ticket = Ticket {
            registry: self,
            key: key.clone(),
        };
        let guard = lock.lock_owned().await;

        KeyGuard {
            _guard: guard,
            _ticket: ticket,
        }
    }

    /// Number of keys currently held or awaited
    pub fn in_flight(&self) -> usize {
        self.slots().len()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Slot>> {
        self.locks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        let mut locks = self.registry.slots();
        if let Some(slot) = locks.get_mut(&self.key) {
            slot.users = slot.users.saturating_sub(1);
            if slot.users == 0 {
                locks.remove(&self.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{AdvisorId, Context};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn key(text: &str) -> CacheKey {
        CacheKey::new(AdvisorId::Coach, text, &Context::new())
    }

    #[tokio::test]
    async fn test_registry_empties_after_release() {
        let locks = KeyLocks::new();
        {
            let _guard = locks.acquire(&key("a")).await;
            assert_eq!(locks.in_flight(), 1);
        }
        assert_eq!(locks.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let inside = Arc::clone(&inside);
            let max_inside = Arc::clone(&max_inside);
            tasks.push(tokio::spawn(async move {
                let _guard = locks.acquire(&key("same")).await;
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_inside.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert_eq!(locks.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyLocks::new();
        let _a = locks.acquire(&key("a")).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&key("b"))).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_aborted_waiter_leaves_no_entry() {
        let locks = Arc::new(KeyLocks::new());
        let holder = locks.acquire(&key("shared")).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(&key("shared")).await;
                tokio::time::sleep(Duration::from_secs(60)).await;
            })
        };
        // Let the waiter register and park on the lock
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(locks.in_flight(), 1);

        drop(holder);
        waiter.abort();
        let _ = waiter.await;

        assert_eq!(locks.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_waiter_aborted_before_release_leaves_no_entry() {
        let locks = Arc::new(KeyLocks::new());
        let holder = locks.acquire(&key("shared")).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(&key("shared")).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        waiter.abort();
        let _ = waiter.await;
        assert_eq!(locks.in_flight(), 1);

        drop(holder);
        assert_eq!(locks.in_flight(), 0);

        // The key is usable again afterwards
        let shared_key = key("shared");
        let again = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&shared_key));
        assert!(again.await.is_ok());
    }
}
