use crate::project::PropertySnapshot;
use parking_lot::Mutex;
use std::sync::Arc;

/// Memoized property snapshot for one configuration
#[derive(Debug, Default)]
pub struct SnapshotCache {
    snapshot: Mutex<Option<Arc<PropertySnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot, evaluating it first if absent or if `reset` is set
    pub fn get_or_evaluate(
        &self,
        reset: bool,
        evaluate: impl FnOnce() -> PropertySnapshot,
    ) -> Arc<PropertySnapshot> {
        if !reset {
            if let Some(snapshot) = self.snapshot.lock().as_ref() {
                return Arc::clone(snapshot);
            }
        }

        // Evaluate outside the lock; the last writer wins.
        let snapshot = Arc::new(evaluate());
        *self.snapshot.lock() = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub fn invalidate(&self) {
        *self.snapshot.lock() = None;
    }

    pub fn is_cached(&self) -> bool {
        self.snapshot.lock().is_some()
    }
}
