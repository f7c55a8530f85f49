//! Explainable ranking output
//!
//! Each candidate carries the weighted contribution of every signal, so a
//! score can be traced back to the similarity spaces that produced it.

use collrec_core::{Collection, Signal};
use serde::Serialize;
use std::collections::BTreeMap;

/// A scored recommendation with per-signal breakdown
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub collection: Collection,
    /// Sum of `signal_scores`
    pub score: f32,
    /// Weighted mean similarity to the seen set, per signal
    pub signal_scores: BTreeMap<Signal, f32>,
}

impl RankedCandidate {
    pub fn contribution(&self, signal: Signal) -> f32 {
        self.signal_scores.get(&signal).copied().unwrap_or(0.0)
    }

    /// Signal that contributed the most, if any contributed at all
    pub fn dominant_signal(&self) -> Option<Signal> {
        self.signal_scores
            .iter()
            .filter(|(_, v)| **v > 0.0)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(s, _)| *s)
    }

    pub fn into_collection(self) -> Collection {
        self.collection
    }
}
