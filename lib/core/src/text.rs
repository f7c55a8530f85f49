// TF-IDF encoder for collection name + description
use crate::stopwords::is_stop_word;
use crate::vector::SparseVector;
use ahash::AHashMap;

/// TF-IDF model fitted once over the active catalog and then frozen
#[derive(Debug, Clone, Default)]
pub struct TfIdfEncoder {
    // term -> dimension
    vocabulary: AHashMap<String, u32>,
    // dimension -> smoothed idf
    idf: Vec<f32>,
    total_docs: usize,
}

impl TfIdfEncoder {
    /// Tokenize text for TF-IDF
    /// Lowercases, splits on anything that is not alphanumeric or `_`,
    /// drops single characters and English stop words
    #[inline]
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|s| s.chars().count() > 1 && !is_stop_word(s))
            .map(str::to_string)
            .collect()
    }

    /// Fit vocabulary and idf over `docs`
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| Self::tokenize(d.as_ref())).collect();

        // term -> document frequency
        let mut term_dfs: AHashMap<&str, u32> = AHashMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *term_dfs.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<&str> = term_dfs.keys().copied().collect();
        terms.sort_unstable();

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n = docs.len() as f32;
        let idf = terms
            .iter()
            .map(|t| ((1.0 + n) / (1.0 + term_dfs[t] as f32)).ln() + 1.0)
            .collect();

        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i as u32))
            .collect();

        Self {
            vocabulary,
            idf,
            total_docs: docs.len(),
        }
    }

    /// L2-normalized tf-idf vector; unknown terms are ignored
    pub fn transform(&self, text: &str) -> SparseVector {
        let entries: Vec<(u32, f32)> = Self::tokenize(text)
            .iter()
            .filter_map(|t| self.vocabulary.get(t.as_str()).copied())
            .map(|dim| (dim, 1.0))
            .collect();

        let mut vector = SparseVector::new(entries);
        let weighted: Vec<(u32, f32)> = vector
            .entries()
            .iter()
            .map(|&(dim, tf)| (dim, tf * self.idf[dim as usize]))
            .collect();
        vector = SparseVector::new(weighted);
        vector.normalize();
        vector
    }

    pub fn transform_all<S: AsRef<str>>(&self, docs: &[S]) -> Vec<SparseVector> {
        docs.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    #[inline]
    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    pub fn idf_of(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&d| self.idf[d as usize])
    }
}
