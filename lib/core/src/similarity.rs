//! Pairwise similarity spaces
//!
//! One [`SimilarityMatrix`] per [`Signal`], all indexed by the same catalog
//! rows. Matrices are dense and row-major; the whole catalog is expected to
//! fit in memory.

use crate::vector::SparseVector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One independent feature dimension with its own similarity space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// TF-IDF over name and description
    Description,
    /// Tag types (the category half of a tag)
    #[serde(rename = "type")]
    Type,
    /// Specific tag values
    Tag,
    /// Constituent activities
    Activities,
    /// Declared collection type
    CollectionType,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::Description,
        Signal::Type,
        Signal::Tag,
        Signal::Activities,
        Signal::CollectionType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Description => "description",
            Signal::Type => "type",
            Signal::Tag => "tag",
            Signal::Activities => "activities",
            Signal::CollectionType => "collection_type",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Square cosine similarity matrix over catalog rows
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute all pairwise cosine similarities.
    ///
    /// Zero vectors are similar to nothing, themselves included. Every other
    /// row has exactly 1.0 on the diagonal. Values are clamped to [0, 1].
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();
        let norms: Vec<f32> = vectors.iter().map(SparseVector::norm).collect();

        let values: Vec<f32> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                let norms = &norms;
                (0..n).map(move |j| {
                    if norms[i] == 0.0 || norms[j] == 0.0 {
                        0.0
                    } else if i == j {
                        1.0
                    } else {
                        let sim = vectors[i].dot(&vectors[j]) / (norms[i] * norms[j]);
                        sim.clamp(0.0, 1.0)
                    }
                })
            })
            .collect();

        Self { n, values }
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Mean similarity of row `i` to every row in `others`; 0.0 for an empty set
    pub fn mean_to(&self, i: usize, others: &[usize]) -> f32 {
        if others.is_empty() {
            return 0.0;
        }
        let row = self.row(i);
        others.iter().map(|&j| row[j]).sum::<f32>() / others.len() as f32
    }
}
