//! TF-IDF feature space over clean titles.
//!
//! The vocabulary (unigrams and bigrams) and its IDF weights are fitted once
//! over the whole catalog and frozen. Every catalog row is stored as a sparse,
//! L2-normalized vector so cosine similarity is a plain dot product.
//!
//! Weighting:
//! - tf: raw term count in the title
//! - idf: `ln((1 + n) / (1 + df)) + 1` (smoothed, never zero)
//! - rows are scaled to unit Euclidean norm; rows without terms stay empty

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::CatalogError;
use crate::normalize::analyze;

// ============================================================================
// Sparse Vectors
// ============================================================================

/// Sparse vector as parallel (column, weight) arrays, sorted by column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build from unsorted (column, weight) pairs with unique columns.
    fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_unstable_by_key(|&(col, _)| col);
        let (indices, values) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    fn normalize_l2(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }

    /// Dot product of two column-sorted vectors (merge walk).
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

// ============================================================================
// Feature Space
// ============================================================================

/// Fitted vocabulary, frozen IDF weights and the document-term matrix.
#[derive(Clone, Debug)]
pub struct FeatureSpace {
    vocabulary: FxHashMap<String, usize>,
    terms: Vec<String>, // column -> term
    idf: Vec<f64>,
    doc_freq: Vec<usize>,
    rows: Vec<SparseVector>,
}

impl FeatureSpace {
    /// Fit the vocabulary over `documents` and vectorize each one.
    /// Columns are assigned in lexicographic term order.
    pub fn fit<'a, I>(documents: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let analyzed: Vec<Vec<String>> = documents.into_iter().map(analyze).collect();
        if analyzed.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut df_by_term: FxHashMap<&str, usize> = FxHashMap::default();
        for terms in &analyzed {
            let unique: FxHashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *df_by_term.entry(term).or_insert(0) += 1;
            }
        }
        if df_by_term.is_empty() {
            return Err(CatalogError::EmptyVocabulary);
        }

        let mut terms: Vec<String> = df_by_term.keys().map(|t| t.to_string()).collect();
        terms.sort_unstable();

        let n = analyzed.len() as f64;
        let doc_freq: Vec<usize> = terms.iter().map(|t| df_by_term[t.as_str()]).collect();
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let vocabulary: FxHashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();

        let mut space = Self {
            vocabulary,
            terms,
            idf,
            doc_freq,
            rows: Vec::with_capacity(analyzed.len()),
        };
        let rows: Vec<SparseVector> = analyzed.iter().map(|t| space.weigh(t)).collect();
        space.rows = rows;
        Ok(space)
    }

    /// Project text onto the frozen vocabulary. Unknown terms are ignored;
    /// text with no known term gives the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text))
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut counts: FxHashMap<usize, usize> = FxHashMap::default();
        for term in terms {
            if let Some(&col) = self.vocabulary.get(term) {
                *counts.entry(col).or_insert(0) += 1;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(col, count)| (col, count as f64 * self.idf[col]))
            .collect();
        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize_l2();
        vector
    }

    /// Cosine similarity of `query` against every row, in row order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        self.rows.iter().map(|row| row.dot(query)).collect()
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Vocabulary terms in column order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&col| self.idf[col])
    }

    /// Terms with their document frequency, most frequent first
    /// (ties in term order).
    pub fn most_common_terms(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut by_df: Vec<(&str, usize)> = self
            .terms
            .iter()
            .map(String::as_str)
            .zip(self.doc_freq.iter().copied())
            .collect();
        by_df.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        by_df.truncate(limit);
        by_df
    }

    /// Rows that have no term at all (titles made only of 1-char words,
    /// punctuation, or nothing). They can never score above zero.
    pub fn empty_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.nnz() == 0)
            .map(|(i, _)| i)
            .collect()
    }
}
