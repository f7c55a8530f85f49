use serde::{Deserialize, Serialize};

/// A sparse feature vector: `(dimension, value)` pairs sorted by dimension
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Build from unsorted entries. Repeated dimensions are summed and
    /// zero values are dropped.
    #[must_use]
    pub fn new(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_by_key(|&(dim, _)| dim);
        let mut merged: Vec<(u32, f32)> = Vec::with_capacity(entries.len());
        for (dim, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == dim => *acc += value,
                _ => merged.push((dim, value)),
            }
        }
        merged.retain(|&(_, v)| v != 0.0);
        Self { entries: merged }
    }

    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Number of stored (non-zero) entries
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Value at `dim`, 0.0 when absent
    pub fn get(&self, dim: u32) -> f32 {
        self.entries
            .binary_search_by_key(&dim, |&(d, _)| d)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Merge-join dot product
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (da, va) = self.entries[i];
            let (db, vb) = other.entries[j];
            match da.cmp(&db) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += va * vb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, v)| v * v).sum::<f32>().sqrt()
    }

    /// Cosine similarity; 0.0 when either side is the zero vector
    #[inline]
    pub fn cosine_similarity(&self, other: &SparseVector) -> f32 {
        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        self.dot(other) / (norm_a * norm_b)
    }

    /// Normalize the vector to unit length
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for (_, v) in &mut self.entries {
                *v *= inv_norm;
            }
        }
    }

    /// Get normalized copy
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }
}
