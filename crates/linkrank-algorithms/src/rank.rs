//! Rank vectors and transition distributions
//!
//! Both are value objects: a probability per page, summing to one. They are
//! created fresh by the algorithms and never mutated in place afterwards.

use crate::graph::PageId;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Tolerance used when checking that probabilities sum to one
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Score per page, summing to one.
///
/// Iteration order is unspecified; use [`RankVector::sorted_by_page`] or
/// [`RankVector::sorted_by_rank`] for display.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct RankVector<P> {
    ranks: HashMap<P, f64>,
}

impl<P: PageId> RankVector<P> {
    pub fn get(&self, page: &P) -> Option<f64> {
        self.ranks.get(page).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&P, f64)> {
        self.ranks.iter().map(|(page, &rank)| (page, rank))
    }

    /// Sum of all scores
    pub fn total(&self) -> f64 {
        self.ranks.values().sum()
    }

    /// Whether the scores sum to one within `tolerance`
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total() - 1.0).abs() <= tolerance
    }

    /// Largest absolute per-page difference; pages missing on either side count as 0
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        let forward = self
            .ranks
            .iter()
            .map(|(page, &rank)| (rank - other.get(page).unwrap_or(0.0)).abs());
        let missing = other
            .ranks
            .iter()
            .filter(|(page, _)| !self.ranks.contains_key(page))
            .map(|(_, &rank)| rank.abs());
        forward.chain(missing).fold(0.0, f64::max)
    }

    /// Entries ordered by page identifier
    pub fn sorted_by_page(&self) -> Vec<(P, f64)> {
        let mut entries: Vec<(P, f64)> = self.iter().map(|(p, r)| (p.clone(), r)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Entries ordered by descending score, ties broken by page identifier
    pub fn sorted_by_rank(&self) -> Vec<(P, f64)> {
        let mut entries: Vec<(P, f64)> = self.iter().map(|(p, r)| (p.clone(), r)).collect();
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        entries
    }

    pub fn into_inner(self) -> HashMap<P, f64> {
        self.ranks
    }
}

impl<P: PageId> FromIterator<(P, f64)> for RankVector<P> {
    fn from_iter<I: IntoIterator<Item = (P, f64)>>(iter: I) -> Self {
        Self {
            ranks: iter.into_iter().collect(),
        }
    }
}

/// One-step probability distribution over every page of a graph
#[derive(Debug, Clone)]
pub struct Distribution<P> {
    probabilities: HashMap<P, f64>,
}

impl<P: PageId> Distribution<P> {
    pub(crate) fn new(probabilities: HashMap<P, f64>) -> Self {
        Self { probabilities }
    }

    /// Probability of moving to `page`
    pub fn get(&self, page: &P) -> Option<f64> {
        self.probabilities.get(page).copied()
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&P, f64)> {
        self.probabilities.iter().map(|(page, &p)| (page, p))
    }

    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    pub fn into_inner(self) -> HashMap<P, f64> {
        self.probabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(entries: &[(&str, f64)]) -> RankVector<String> {
        entries.iter().map(|(p, r)| (p.to_string(), *r)).collect()
    }

    #[test]
    fn test_sorting() {
        let v = ranks(&[("b", 0.2), ("a", 0.2), ("c", 0.6)]);

        let by_page: Vec<String> = v.sorted_by_page().into_iter().map(|(p, _)| p).collect();
        assert_eq!(by_page, vec!["a", "b", "c"]);

        let by_rank: Vec<String> = v.sorted_by_rank().into_iter().map(|(p, _)| p).collect();
        assert_eq!(by_rank, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_normalization() {
        assert!(ranks(&[("a", 0.25), ("b", 0.75)]).is_normalized(SUM_TOLERANCE));
        assert!(!ranks(&[("a", 0.25), ("b", 0.5)]).is_normalized(SUM_TOLERANCE));
    }

    #[test]
    fn test_max_abs_diff_counts_missing_pages() {
        let left = ranks(&[("a", 0.5), ("b", 0.5)]);
        let right = ranks(&[("a", 0.4), ("c", 0.6)]);
        assert!((left.max_abs_diff(&right) - 0.6).abs() < 1e-12);
        assert!((right.max_abs_diff(&left) - 0.6).abs() < 1e-12);
        assert_eq!(left.max_abs_diff(&left), 0.0);
    }
}
