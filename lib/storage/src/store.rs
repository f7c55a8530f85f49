use collrec_core::{CatalogSnapshot, Error, Result};
use parking_lot::RwLock;
use std::sync::Arc;

/// Holds the currently installed catalog snapshot.
///
/// Readers clone the `Arc` and never block a running preprocessing pass;
/// `install` swaps the pointer only once the new snapshot is complete.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the installed snapshot, returning the previous one
    pub fn install(&self, snapshot: CatalogSnapshot) -> Option<Arc<CatalogSnapshot>> {
        let snapshot = Arc::new(snapshot);
        self.current.write().replace(snapshot)
    }

    pub fn current(&self) -> Option<Arc<CatalogSnapshot>> {
        self.current.read().clone()
    }

    /// Installed snapshot or [`Error::NotPreprocessed`]
    pub fn require(&self) -> Result<Arc<CatalogSnapshot>> {
        self.current().ok_or(Error::NotPreprocessed)
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }
}
