use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// # Result Cache
///
/// TTL cache with single-flight computation, used for verdicts (keyed by
/// normalized email) and resolution results (keyed by domain).
///
/// `get_or_compute` guarantees at most one concurrent computation per key:
/// the first caller runs the future, concurrent callers for the same key
/// park on a per-key channel and receive the computed value. If the
/// computing caller is cancelled mid-flight, its slot is withdrawn and one
/// of the waiters takes over.
///
/// Expiry is lazy: expired entries count as absent and are dropped when
/// touched. When live entries exceed `max_entries`, expired entries are
/// purged and then the oldest entries are evicted down to 80% of the cap.
pub struct ResultCache<T> {
    ttl: Duration,
    max_entries: usize,
    slots: Mutex<HashMap<String, Slot<T>>>,
}

enum Slot<T> {
    /// A computation for this key is running; the sender half lives with it.
    InFlight(watch::Receiver<Option<T>>),
    Ready { value: T, stored_at: Instant },
}

enum Claim<T> {
    Hit(T),
    Wait(watch::Receiver<Option<T>>),
    Compute(watch::Sender<Option<T>>),
}

/// Removes the in-flight slot if the computation never completed, so a
/// waiter can claim the key instead of waiting forever.
struct ComputeGuard<'a, T> {
    cache: &'a ResultCache<T>,
    key: &'a str,
    armed: bool,
}

impl<T> Drop for ComputeGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            let mut slots = self.cache.lock_slots();
            if let Some(Slot::InFlight(_)) = slots.get(self.key) {
                slots.remove(self.key);
            }
        }
    }
}

impl<T> ResultCache<T> {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, Slot<T>>> {
        // Lock is only held for map bookkeeping, never across awaits
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_expired(&self, stored_at: Instant) -> bool {
        stored_at.elapsed() >= self.ttl
    }

    /// Stores a value directly, starting a fresh TTL window.
    pub fn insert(&self, key: &str, value: T) {
        let mut slots = self.lock_slots();
        slots.insert(
            key.to_string(),
            Slot::Ready {
                value,
                stored_at: Instant::now(),
            },
        );
        self.enforce_capacity(&mut slots);
    }

    /// Drops the completed entry for `key`, if any. An in-flight computation
    /// keeps its slot so concurrent callers still collapse onto it.
    pub fn remove(&self, key: &str) {
        let mut slots = self.lock_slots();
        if let Some(Slot::Ready { .. }) = slots.get(key) {
            slots.remove(key);
        }
    }

    /// Count of live completed entries. Expired entries are purged first so
    /// the number matches what `get` would serve.
    pub fn len(&self) -> usize {
        let mut slots = self.lock_slots();
        self.purge_expired_locked(&mut slots);
        slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops expired entries eagerly.
    pub fn purge_expired(&self) {
        let mut slots = self.lock_slots();
        self.purge_expired_locked(&mut slots);
    }

    /// Drops all completed entries. In-flight computations are left to finish.
    pub fn clear(&self) {
        let mut slots = self.lock_slots();
        slots.retain(|_, slot| matches!(slot, Slot::InFlight(_)));
    }

    fn purge_expired_locked(&self, slots: &mut HashMap<String, Slot<T>>) {
        slots.retain(|_, slot| match slot {
            Slot::Ready { stored_at, .. } => !self.is_expired(*stored_at),
            Slot::InFlight(_) => true,
        });
    }

    fn enforce_capacity(&self, slots: &mut HashMap<String, Slot<T>>) {
        let ready_count = slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready { .. }))
            .count();
        if ready_count <= self.max_entries {
            return;
        }

        self.purge_expired_locked(slots);

        let mut by_age: Vec<(String, Instant)> = slots
            .iter()
            .filter_map(|(key, slot)| match slot {
                Slot::Ready { stored_at, .. } => Some((key.clone(), *stored_at)),
                Slot::InFlight(_) => None,
            })
            .collect();
        let target = (self.max_entries * 4 / 5).max(1);
        if by_age.len() <= target {
            return;
        }

        by_age.sort_by_key(|(_, stored_at)| *stored_at);
        for (key, _) in by_age.iter().take(by_age.len() - target) {
            slots.remove(key);
        }
    }
}

impl<T: Clone> ResultCache<T> {
    /// Returns the cached value for `key` if present and unexpired.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut slots = self.lock_slots();
        let expired = match slots.get(key) {
            Some(Slot::Ready { value, stored_at }) if !self.is_expired(*stored_at) => {
                return Some(value.clone());
            }
            Some(Slot::Ready { .. }) => true,
            _ => false,
        };
        if expired {
            slots.remove(key);
        }
        None
    }

    /// Returns the cached value, or runs `compute` to fill the entry. The
    /// boolean is true when the value came from the cache (including waiting
    /// on another caller's in-flight computation).
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> (T, bool)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let tx = loop {
            match self.claim(key) {
                Claim::Hit(value) => return (value, true),
                Claim::Wait(mut rx) => {
                    // The computing caller publishes a value, or drops the
                    // sender on cancellation; either wakes us.
                    if rx.changed().await.is_ok() {
                        if let Some(value) = rx.borrow().clone() {
                            return (value, true);
                        }
                    }
                    // Sender gone without a value, take a fresh claim
                }
                Claim::Compute(tx) => break tx,
            }
        };

        let mut guard = ComputeGuard {
            cache: self,
            key,
            armed: true,
        };
        let value = compute().await;
        self.insert(key, value.clone());
        guard.armed = false;

        // Waiters read the value from the channel rather than re-claiming
        let _ = tx.send(Some(value.clone()));
        (value, false)
    }

    fn claim(&self, key: &str) -> Claim<T> {
        let mut slots = self.lock_slots();
        match slots.get(key) {
            Some(Slot::Ready { value, stored_at }) if !self.is_expired(*stored_at) => {
                return Claim::Hit(value.clone());
            }
            Some(Slot::InFlight(rx)) => return Claim::Wait(rx.clone()),
            _ => {}
        }

        // Absent or expired: this caller becomes the computer
        let (tx, rx) = watch::channel(None);
        slots.insert(key.to_string(), Slot::InFlight(rx));
        Claim::Compute(tx)
    }
}
