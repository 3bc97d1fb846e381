//! Separation score: the number of discordant pairs lying in different cells.
//!
//! Two strategies compute the same number. `brute_force_score` enumerates all
//! pairs and serves as the oracle; `bucket_score` aggregates label counts per
//! cell and only compares cells.

use crate::conf::ScoringStrategy;
use crate::cutset::{CutSet, PartitionKey};
use crate::dataset::{Dataset, LabelCode};
use crate::error::Result;
use std::collections::HashMap;
use std::hash::Hash;

/// Per-cell label histograms, cells in first-seen order.
pub fn cell_label_counts<K>(keys: &[K], labels: &[LabelCode], n_labels: usize) -> Vec<Vec<u64>>
where
    K: Hash + Eq,
{
    let mut pos_map: HashMap<&K, usize> = HashMap::new();
    let mut counts: Vec<Vec<u64>> = Vec::new();
    for (key, &label) in keys.iter().zip(labels.iter()) {
        let pos = *pos_map.entry(key).or_insert_with(|| {
            counts.push(vec![0; n_labels]);
            counts.len() - 1
        });
        counts[pos][label as usize] += 1;
    }
    counts
}

/// `sum over a != b of left[a] * right[b]`.
pub fn cross_label_pairs(left: &[u64], right: &[u64]) -> u64 {
    let left_total: u64 = left.iter().sum();
    let right_total: u64 = right.iter().sum();
    let same: u64 = left.iter().zip(right.iter()).map(|(l, r)| l * r).sum();
    left_total * right_total - same
}

/// Unordered pairs with different labels among examples with this histogram.
pub fn discordant_pairs(counts: &[u64]) -> u64 {
    let n: u64 = counts.iter().sum();
    let all_pairs = n * n.saturating_sub(1) / 2;
    let same_label: u64 = counts.iter().map(|&c| c * c.saturating_sub(1) / 2).sum();
    all_pairs - same_label
}

pub fn brute_force_score<K: Eq>(keys: &[K], labels: &[LabelCode]) -> u64 {
    let n = keys.len();
    let mut count = 0u64;
    for i in 0..n {
        for j in (i + 1)..n {
            if labels[i] != labels[j] && keys[i] != keys[j] {
                count += 1;
            }
        }
    }
    count
}

pub fn bucket_score<K>(keys: &[K], labels: &[LabelCode], n_labels: usize) -> u64
where
    K: Hash + Eq,
{
    let cells = cell_label_counts(keys, labels, n_labels);
    let mut count = 0u64;
    for (i, c1) in cells.iter().enumerate() {
        for c2 in &cells[i + 1..] {
            count += cross_label_pairs(c1, c2);
        }
    }
    count
}

/// Fraction of examples carrying the majority label of their cell.
pub fn weighted_purity<K>(keys: &[K], labels: &[LabelCode], n_labels: usize) -> f64
where
    K: Hash + Eq,
{
    if keys.is_empty() {
        return 0.0;
    }
    let pure: u64 = cell_label_counts(keys, labels, n_labels)
        .iter()
        .map(|counts| counts.iter().copied().max().unwrap_or(0))
        .sum();
    pure as f64 / keys.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationScorer {
    strategy: ScoringStrategy,
    n_labels: usize,
}

impl SeparationScorer {
    /// Resolve `Auto` against the dataset size once, up front.
    pub fn new(strategy: ScoringStrategy, dataset: &Dataset, brute_force_max_rows: usize) -> Self {
        Self {
            strategy: strategy.resolve(dataset.n_rows(), brute_force_max_rows),
            n_labels: dataset.n_labels(),
        }
    }

    /// Scorer for an already resolved strategy.
    pub fn from_parts(strategy: ScoringStrategy, n_labels: usize) -> Self {
        Self { strategy, n_labels }
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    pub fn score<K>(&self, keys: &[K], labels: &[LabelCode]) -> u64
    where
        K: Hash + Eq,
    {
        match self.strategy {
            ScoringStrategy::Brute => brute_force_score(keys, labels),
            _ => bucket_score(keys, labels, self.n_labels),
        }
    }

    /// Score of the partition `cut_set` induces on `dataset`.
    pub fn full_score(&self, dataset: &Dataset, cut_set: &CutSet) -> Result<u64> {
        let keys: Vec<PartitionKey> = cut_set.partition_keys(dataset)?;
        Ok(self.score(&keys, dataset.labels()))
    }
}
