//! Per-owner exclusive locks.
//!
//! Two selections for the same owner must not interleave their
//! read-score-write sequences, or both could read the same `show_count`
//! and one increment would be lost. Selections for different owners never
//! contend.
//!
//! Locks are created on first use and only weakly referenced by the map.
//! Once every guard and waiter for an owner is gone the entry is dead and
//! is pruned on the next acquire, so the map does not grow with the number
//! of owners ever seen.

use readwiser_domain::OwnerId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError, Weak};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Guard proving exclusive access to one owner's review history.
pub type OwnerGuard = OwnedMutexGuard<()>;

/// Keyed async mutex, one lock per [`OwnerId`].
#[derive(Default)]
pub struct UserLocks {
    locks: StdMutex<HashMap<OwnerId, Weak<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `owner`.
    pub async fn acquire(&self, owner: &OwnerId) -> OwnerGuard {
        self.lock_for(owner).lock_owned().await
    }

    /// Number of owners with a live lock (held or awaited).
    pub fn active_owners(&self) -> usize {
        let map = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        map.values().filter(|weak| weak.strong_count() > 0).count()
    }

    fn lock_for(&self, owner: &OwnerId) -> Arc<Mutex<()>> {
        let mut map = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        map.retain(|_, weak| weak.strong_count() > 0);

        if let Some(lock) = map.get(owner).and_then(Weak::upgrade) {
            return lock;
        }

        let lock = Arc::new(Mutex::new(()));
        map.insert(owner.clone(), Arc::downgrade(&lock));
        lock
    }

    #[cfg(test)]
    fn tracked_entries(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
