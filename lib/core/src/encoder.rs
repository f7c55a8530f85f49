//! Categorical encoders
//!
//! A [`Vocabulary`] is frozen once it is fitted. Values that are not part of
//! it contribute nothing to the encoded vector; they never raise.

use crate::catalog::Catalog;
use crate::model::{ActivityId, ActivityLink};
use crate::vector::SparseVector;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::hash::Hash;
use tracing::debug;

/// Ordered set of distinct categorical values
#[derive(Debug, Clone)]
pub struct Vocabulary<T: Eq + Hash> {
    terms: Vec<T>,
    index: AHashMap<T, u32>,
}

impl<T: Ord + Hash + Clone> Vocabulary<T> {
    /// Fit from observed values. Terms are sorted so the same input always
    /// yields the same dimensions.
    pub fn fit<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut terms: Vec<T> = values.into_iter().collect();
        terms.sort();
        terms.dedup();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();
        Self { terms, index }
    }

    #[inline]
    pub fn index_of<Q>(&self, value: &Q) -> Option<u32>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(value).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[T] {
        &self.terms
    }
}

/// How repeated values on one row are accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Counting {
    /// Multi-label binarization: present or not
    Binary,
    /// Every occurrence adds 1.0
    Summed,
}

/// One-hot / multi-hot encoder over a frozen vocabulary
#[derive(Debug, Clone)]
pub struct CategoricalEncoder<T: Eq + Hash> {
    vocabulary: Vocabulary<T>,
    counting: Counting,
}

impl<T: Ord + Hash + Clone> CategoricalEncoder<T> {
    pub fn new(vocabulary: Vocabulary<T>, counting: Counting) -> Self {
        Self { vocabulary, counting }
    }

    /// Fit the vocabulary over every value of every row
    pub fn fit(rows: &[Vec<T>], counting: Counting) -> Self {
        let vocabulary = Vocabulary::fit(rows.iter().flatten().cloned());
        Self::new(vocabulary, counting)
    }

    pub fn vocabulary(&self) -> &Vocabulary<T> {
        &self.vocabulary
    }

    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn transform<Q>(&self, values: &[Q]) -> SparseVector
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        let mut entries: Vec<(u32, f32)> = values
            .iter()
            .filter_map(|v| self.vocabulary.index_of(v))
            .map(|dim| (dim, 1.0))
            .collect();

        if self.counting == Counting::Binary {
            entries.sort_by_key(|&(dim, _)| dim);
            entries.dedup_by_key(|&mut (dim, _)| dim);
        }

        SparseVector::new(entries)
    }

    pub fn transform_all(&self, rows: &[Vec<T>]) -> Vec<SparseVector> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}

/// Activity ids per catalog row, duplicates kept.
///
/// Links pointing outside the catalog are dropped; rows without links stay
/// empty (zero-filled after encoding).
pub fn activities_per_row(catalog: &Catalog, links: &[ActivityLink]) -> Vec<Vec<ActivityId>> {
    let mut rows = vec![Vec::new(); catalog.len()];
    let mut dropped = 0usize;
    for link in links {
        match catalog.index_of(link.collection_id) {
            Some(row) => rows[row].push(link.activity_id),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "activity links without an active collection");
    }
    rows
}

/// Encoder for the activities signal. The vocabulary is closed over the
/// whole link table, not just links of active collections.
pub fn activity_encoder(links: &[ActivityLink]) -> CategoricalEncoder<ActivityId> {
    CategoricalEncoder::new(
        Vocabulary::fit(links.iter().map(|l| l.activity_id)),
        Counting::Summed,
    )
}
