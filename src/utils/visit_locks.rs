use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, Weak};

use futures::lock::{Mutex, OwnedMutexGuard};

/// Held for the whole read-modify-write of one visit.
pub type VisitGuard = OwnedMutexGuard<()>;

/// Registry size below which dead slots are left alone.
const MIN_PRUNE_AT: usize = 1_024;

/// One async mutex per visit id, so concurrent updates to the same visit
/// serialize while different visits proceed in parallel.
///
/// The registry only keeps weak handles. A slot lives as long as some caller
/// holds or waits on it, and is pruned once nobody does, so a held lock is
/// never replaced by a fresh one.
#[derive(Clone, Default)]
pub struct VisitLocks {
    inner: Arc<StdMutex<Registry>>,
}

#[derive(Default)]
struct Registry {
    slots: HashMap<u64, Weak<Mutex<()>>>,
    prune_at: usize,
}

impl Registry {
    fn slot(&mut self, visit_id: u64) -> Arc<Mutex<()>> {
        if let Some(live) = self.slots.get(&visit_id).and_then(Weak::upgrade) {
            return live;
        }

        if self.slots.len() >= self.prune_at.max(MIN_PRUNE_AT) {
            self.slots.retain(|_, slot| slot.strong_count() > 0);
            self.prune_at = self.slots.len() * 2;
        }

        let slot = Arc::new(Mutex::new(()));
        self.slots.insert(visit_id, Arc::downgrade(&slot));
        slot
    }
}

impl VisitLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, visit_id: u64) -> VisitGuard {
        let slot = {
            let mut registry = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            registry.slot(visit_id)
        };
        slot.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .slots
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::rt::task::yield_now;
    use actix_web::rt::time::timeout;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[actix_web::test]
    async fn same_visit_is_serialized() {
        let locks = VisitLocks::new();
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let tasks = (0..4).map(|_| {
            let locks = locks.clone();
            let inside = inside.clone();
            let max_seen = max_seen.clone();
            async move {
                let _guard = locks.acquire(7).await;
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                yield_now().await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }
        });
        futures::future::join_all(tasks).await;

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn different_visits_do_not_block_each_other() {
        let locks = VisitLocks::new();
        let _first = locks.acquire(1).await;

        let second = timeout(Duration::from_secs(1), locks.acquire(2)).await;
        assert!(second.is_ok());

        let again = timeout(Duration::from_millis(50), locks.acquire(1)).await;
        assert!(again.is_err());
    }

    #[actix_web::test]
    async fn held_lock_survives_heavy_churn() {
        let locks = VisitLocks::new();
        let _held = locks.acquire(7).await;

        for id in 1_000..151_000 {
            drop(locks.acquire(id).await);
        }

        let again = timeout(Duration::from_millis(50), locks.acquire(7)).await;
        assert!(again.is_err(), "two writers held visit 7 at once");
    }

    #[actix_web::test]
    async fn released_slots_are_pruned() {
        let locks = VisitLocks::new();
        let _held = locks.acquire(7).await;

        for id in 1_000..11_000 {
            drop(locks.acquire(id).await);
        }

        assert!(locks.tracked() <= 2 * MIN_PRUNE_AT + 1);
        assert!(locks.inner.lock().unwrap().slots[&7].strong_count() > 0);
    }
}
