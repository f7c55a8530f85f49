//! Weighted multi-signal ranking
//!
//! Scores every in-scope collection by its weighted mean similarity to the
//! collections the user has already interacted with, then returns the best
//! unseen ones.

use crate::explain::RankedCandidate;
use crate::weights::SignalWeights;
use collrec_core::{CatalogSnapshot, Collection, Result, UserId};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 5;

/// Ranks collections against a catalog snapshot with fixed weights
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: SignalWeights,
}

impl Ranker {
    /// Create a ranker, rejecting negative or non-finite weights
    pub fn new(weights: SignalWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &SignalWeights {
        &self.weights
    }

    /// Top `top_n` unseen in-scope collections, best first
    pub fn rank(
        &self,
        snapshot: &CatalogSnapshot,
        user_id: UserId,
        top_n: usize,
    ) -> Vec<Collection> {
        self.explain(snapshot, user_id, top_n)
            .into_iter()
            .map(RankedCandidate::into_collection)
            .collect()
    }

    /// Same as [`Ranker::rank`] but keeps scores and per-signal contributions
    pub fn explain(
        &self,
        snapshot: &CatalogSnapshot,
        user_id: UserId,
        top_n: usize,
    ) -> Vec<RankedCandidate> {
        let catalog = snapshot.catalog();

        let Some(orgs) = snapshot.orgs().orgs_of(user_id) else {
            debug!(user_id, "user has no organization memberships");
            return Vec::new();
        };

        let scope = catalog.indices_in_orgs(orgs);
        let seen: Vec<usize> = match snapshot.interactions().seen_by(user_id) {
            Some(rows) => scope.iter().copied().filter(|i| rows.contains(i)).collect(),
            None => Vec::new(),
        };

        if seen.is_empty() {
            debug!(user_id, in_scope = scope.len(), "no in-scope interactions, cold start");
            return Vec::new();
        }

        let spaces: Vec<_> = self
            .weights
            .active()
            .filter_map(|(signal, weight)| {
                snapshot.spaces().get(signal).map(|m| (signal, weight, m))
            })
            .collect();

        let mut candidates: Vec<(usize, RankedCandidate)> = scope
            .iter()
            .copied()
            .filter(|i| seen.binary_search(i).is_err())
            .filter_map(|row| {
                let collection = catalog.get(row)?.clone();
                let signal_scores: BTreeMap<_, _> = spaces
                    .iter()
                    .map(|&(signal, weight, matrix)| (signal, weight * matrix.mean_to(row, &seen)))
                    .collect();
                let score = signal_scores.values().sum();
                Some((
                    row,
                    RankedCandidate {
                        collection,
                        score,
                        signal_scores,
                    },
                ))
            })
            .collect();

        // Score descending, then collection id ascending
        candidates.sort_by_key(|(_, c)| (Reverse(OrderedFloat(c.score)), c.collection.id));
        candidates.truncate(top_n);

        debug!(
            user_id,
            in_scope = scope.len(),
            seen = seen.len(),
            returned = candidates.len(),
            "ranked collections"
        );

        candidates.into_iter().map(|(_, c)| c).collect()
    }
}

/// Rank with optional weights; `None` means the default weights
pub fn rank(
    snapshot: &CatalogSnapshot,
    user_id: UserId,
    weights: Option<&SignalWeights>,
    top_n: usize,
) -> Result<Vec<Collection>> {
    let ranker = Ranker::new(weights.copied().unwrap_or_default())?;
    Ok(ranker.rank(snapshot, user_id, top_n))
}

/// Explained variant of [`rank`]
pub fn explain(
    snapshot: &CatalogSnapshot,
    user_id: UserId,
    weights: Option<&SignalWeights>,
    top_n: usize,
) -> Result<Vec<RankedCandidate>> {
    let ranker = Ranker::new(weights.copied().unwrap_or_default())?;
    Ok(ranker.explain(snapshot, user_id, top_n))
}
