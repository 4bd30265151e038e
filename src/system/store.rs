use std::sync::Arc;

use tokio::sync::watch;

use super::snapshot::Snapshot;

/// Holds the current [`Snapshot`], shared between the single refresh-loop
/// writer and any number of concurrent HTTP readers.
///
/// Built on a `watch` channel: `publish` is one atomic reference swap and
/// `current` is a borrow plus an `Arc` clone, so readers never block behind
/// the writer for longer than the swap and never observe a partially
/// updated snapshot. The store is constructed from an initial snapshot and
/// is therefore never empty.
pub struct SnapshotStore {
    tx: watch::Sender<Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn new(initial: Snapshot) -> Self {
        SnapshotStore {
            tx: watch::Sender::new(Arc::new(initial)),
        }
    }

    /// Atomically replace the current snapshot.
    pub fn publish(&self, snapshot: Snapshot) {
        self.tx.send_replace(Arc::new(snapshot));
    }

    /// The most recently published snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        self.tx.borrow().clone()
    }
}
