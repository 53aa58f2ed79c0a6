//! Ranking of similarity scores.
//!
//! Scores are ordered highest first. Equal scores keep catalog order, so the
//! entry with the lower index is listed first.

use std::cmp::Ordering;

/// Number of hits returned by a default search.
pub const DEFAULT_LIMIT: usize = 5;

/// Order two (index, score) pairs: higher score first, then lower index.
pub fn score_ordering(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}

/// Rank scores (given in catalog order) and keep the best `limit`.
/// Returns (catalog index, score) pairs.
pub fn top_k(scores: &[f64], limit: usize) -> Vec<(usize, f64)> {
    if limit == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    if limit < ranked.len() {
        ranked.select_nth_unstable_by(limit - 1, score_ordering);
        ranked.truncate(limit);
    }
    ranked.sort_by(score_ordering);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_scores() {
        let ranked = top_k(&[0.1, 0.9, 0.5], 5);
        assert_eq!(ranked, vec![(1, 0.9), (2, 0.5), (0, 0.1)]);
    }

    #[test]
    fn test_ties_lower_index_first() {
        let ranked = top_k(&[0.0, 0.3, 0.0, 0.3, 0.0, 0.0, 0.0], 5);
        let order: Vec<usize> = ranked.iter().map(|&(i, _)| i).collect();
        assert_eq!(order, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_all_zero_keeps_catalog_order() {
        let ranked = top_k(&[0.0; 8], 5);
        let order: Vec<usize> = ranked.iter().map(|&(i, _)| i).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_limit_larger_than_input() {
        assert_eq!(top_k(&[0.2, 0.4], 5).len(), 2);
        assert!(top_k(&[], 5).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        assert!(top_k(&[0.2, 0.4], 0).is_empty());
    }

    #[test]
    fn test_partial_selection_matches_full_sort() {
        let scores: Vec<f64> = (0..200).map(|i| ((i * 37) % 11) as f64 / 10.0).collect();
        let mut full: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
        full.sort_by(score_ordering);
        full.truncate(5);
        assert_eq!(top_k(&scores, 5), full);
    }
}
