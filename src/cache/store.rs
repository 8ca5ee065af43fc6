use std::sync::{Arc, PoisonError, RwLock};

use crate::cache::Snapshot;

/// Holds the current snapshot. Readers get a shared handle to a complete
/// snapshot; the refresh scheduler swaps in a new one wholesale.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. The lock is held only for the pointer clone.
    pub fn read(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish `snapshot`. Handles returned by earlier reads keep the old one alive.
    pub fn replace(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        let previous = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *current, snapshot)
        };
        // dropped outside the lock
        drop(previous);
    }
}
