//! Registry of values that must be recomputed when the engine's seed or algorithm
//! changes.
//!
//! The registry only holds [`Weak`] references. A dependent's lifetime belongs to
//! whoever created it; it registers itself, and it unregisters itself (or simply
//! drops, after which it is pruned on the next notification).

use std::sync::{
    Arc, Weak,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;

use crate::engine::Engine;

/// Something that caches a value derived from an [`Engine`].
pub trait Dependent: Send + Sync {
    /// Recompute the cached value against the engine's current seed and algorithm.
    fn refresh(&self, engine: &Engine);
}

/// Handle returned by [`ChangeNotifier::register`]; pass it back to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependentId(u64);

struct Entry {
    id: DependentId,
    dependent: Weak<dyn Dependent>,
}

#[derive(Default)]
pub struct ChangeNotifier {
    entries: Mutex<Vec<Entry>>,
    next_id: AtomicU64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<D: Dependent + 'static>(&self, dependent: &Arc<D>) -> DependentId {
        let id = DependentId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let weak = Arc::downgrade(dependent);
        let dependent: Weak<dyn Dependent> = weak;
        self.entries.lock().push(Entry { id, dependent });
        id
    }

    /// Returns `false` if `id` was not registered (or was already removed).
    pub fn unregister(&self, id: DependentId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    /// Number of registered dependents that are still alive.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.dependent.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Refreshes every live dependent, in registration order, and returns how many
    /// were refreshed.
    ///
    /// The registry lock is released before any `refresh` runs, so dependents may
    /// call back into the engine or unregister themselves.
    pub fn notify_all(&self, engine: &Engine) -> usize {
        let live: Vec<Arc<dyn Dependent>> = {
            let mut entries = self.entries.lock();
            entries.retain(|entry| entry.dependent.strong_count() > 0);
            entries
                .iter()
                .filter_map(|entry| entry.dependent.upgrade())
                .collect()
        };

        for dependent in &live {
            dependent.refresh(engine);
        }
        tracing::trace!(count = live.len(), "refreshed dependents");
        live.len()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("registered", &self.entries.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[derive(Default)]
    struct Counter {
        hits: AtomicUsize,
    }

    impl Dependent for Counter {
        fn refresh(&self, _engine: &Engine) {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn notifies_registered_only() {
        let engine = Engine::new();
        let notifier = ChangeNotifier::new();
        let a = Arc::new(Counter::default());
        let b = Arc::new(Counter::default());
        let id_a = notifier.register(&a);
        notifier.register(&b);

        assert_eq!(notifier.notify_all(&engine), 2);
        assert!(notifier.unregister(id_a));
        assert!(!notifier.unregister(id_a));
        assert_eq!(notifier.notify_all(&engine), 1);

        assert_eq!(a.hits.load(Ordering::SeqCst), 1);
        assert_eq!(b.hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropped_dependents_are_pruned() {
        let engine = Engine::new();
        let notifier = ChangeNotifier::new();
        let kept = Arc::new(Counter::default());
        notifier.register(&kept);
        {
            let gone = Arc::new(Counter::default());
            notifier.register(&gone);
            assert_eq!(notifier.len(), 2);
        }
        assert_eq!(notifier.len(), 1);
        assert_eq!(notifier.notify_all(&engine), 1);
        assert_eq!(notifier.entries.lock().len(), 1);
    }

    #[test]
    fn ids_are_unique() {
        let notifier = ChangeNotifier::new();
        let dep = Arc::new(Counter::default());
        let first = notifier.register(&dep);
        let second = notifier.register(&dep);
        assert_ne!(first, second);
        assert!(!notifier.is_empty());
    }
}
