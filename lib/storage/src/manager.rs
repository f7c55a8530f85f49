use crate::loader::TableLoader;
use crate::store::SnapshotStore;
use collrec_core::{CatalogSnapshot, Collection, Result, SnapshotStats, UserId};
use collrec_ranking::{RankedCandidate, Ranker, SignalWeights, DEFAULT_TOP_N};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Owns the table loader and the snapshot store
pub struct RecommendationService {
    loader: Box<dyn TableLoader>,
    store: SnapshotStore,
    // one preprocessing pass at a time
    preprocess_lock: Mutex<()>,
    default_top_n: usize,
}

impl RecommendationService {
    pub fn new<L: TableLoader + 'static>(loader: L) -> Self {
        Self {
            loader: Box::new(loader),
            store: SnapshotStore::new(),
            preprocess_lock: Mutex::new(()),
            default_top_n: DEFAULT_TOP_N,
        }
    }

    #[must_use]
    pub fn with_default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    /// Load tables, rebuild every similarity space and install the result.
    ///
    /// On failure the previously installed snapshot stays in place.
    pub fn preprocess(&self) -> Result<SnapshotStats> {
        let _guard = self.preprocess_lock.lock();
        let start = Instant::now();

        let snapshot = self
            .loader
            .load()
            .and_then(|tables| CatalogSnapshot::build(&tables))
            .map_err(|e| {
                error!(error = %e, "preprocessing failed, keeping previous snapshot");
                e
            })?;

        let stats = snapshot.stats();
        self.store.install(snapshot);
        info!(
            collections = stats.collections,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "snapshot installed"
        );
        Ok(stats)
    }

    /// Ranked collections for `user_id`. `None` falls back to the default
    /// weights and result size.
    pub fn recommend(
        &self,
        user_id: UserId,
        weights: Option<&SignalWeights>,
        top_n: Option<usize>,
    ) -> Result<Vec<Collection>> {
        let (ranker, snapshot) = self.prepare(weights)?;
        Ok(ranker.rank(&snapshot, user_id, top_n.unwrap_or(self.default_top_n)))
    }

    /// Like [`recommend`](Self::recommend) with per-signal scores
    pub fn explain(
        &self,
        user_id: UserId,
        weights: Option<&SignalWeights>,
        top_n: Option<usize>,
    ) -> Result<Vec<RankedCandidate>> {
        let (ranker, snapshot) = self.prepare(weights)?;
        Ok(ranker.explain(&snapshot, user_id, top_n.unwrap_or(self.default_top_n)))
    }

    fn prepare(&self, weights: Option<&SignalWeights>) -> Result<(Ranker, Arc<CatalogSnapshot>)> {
        let ranker = Ranker::new(weights.copied().unwrap_or_default())?;
        Ok((ranker, self.store.require()?))
    }

    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.store.current()
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }
}
