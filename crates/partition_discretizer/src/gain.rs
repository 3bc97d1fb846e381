//! Marginal separation gain of inserting one candidate threshold.
//!
//! A new cut on attribute `a` only splits the cells whose bucket on `a`
//! contains the threshold. Pairs in other cells keep their relative
//! separation, so the gain is the number of discordant pairs that sit in the
//! same cell today and land on opposite sides of the threshold.

use crate::candidates::Candidate;
use crate::cutset::{CutSet, PartitionKey};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::score::{SeparationScorer, cross_label_pairs};
use std::collections::HashMap;

/// Gains against a fixed cut set. Keys are computed once and shared by every
/// candidate evaluated in the same round.
pub struct GainEvaluator<'a> {
    dataset: &'a Dataset,
    cut_set: &'a CutSet,
    keys: Vec<PartitionKey>,
}

impl<'a> GainEvaluator<'a> {
    pub fn new(dataset: &'a Dataset, cut_set: &'a CutSet) -> Result<Self> {
        let keys = cut_set.partition_keys(dataset)?;
        Ok(Self {
            dataset,
            cut_set,
            keys,
        })
    }

    pub fn keys(&self) -> &[PartitionKey] {
        &self.keys
    }

    pub fn gain(&self, candidate: &Candidate) -> u64 {
        let attr = candidate.attribute;
        let threshold = candidate.threshold;
        let target_bucket = self.cut_set.bucket(attr, threshold) as u32;
        let n_labels = self.dataset.n_labels();
        let column = self.dataset.column(attr);
        let labels = self.dataset.labels();

        // Rows of the split bucket share `target_bucket` on `attr`, so grouping
        // them by the full key groups them by the other attributes.
        let mut groups: HashMap<&PartitionKey, (Vec<u64>, Vec<u64>)> = HashMap::new();
        for (row, key) in self.keys.iter().enumerate() {
            if key[attr] != target_bucket {
                continue;
            }
            let (left, right) = groups
                .entry(key)
                .or_insert_with(|| (vec![0; n_labels], vec![0; n_labels]));
            let label = labels[row] as usize;
            if column[row] <= threshold {
                left[label] += 1;
            } else {
                right[label] += 1;
            }
        }

        groups
            .values()
            .map(|(left, right)| cross_label_pairs(left, right))
            .sum()
    }
}

/// One-off incremental gain of `candidate` against `cut_set`.
pub fn incremental_gain(dataset: &Dataset, cut_set: &CutSet, candidate: &Candidate) -> Result<u64> {
    Ok(GainEvaluator::new(dataset, cut_set)?.gain(candidate))
}

/// `full_score(cut_set + candidate) - full_score(cut_set)`.
pub fn full_recompute_gain(
    dataset: &Dataset,
    cut_set: &CutSet,
    candidate: &Candidate,
    scorer: &SeparationScorer,
) -> Result<u64> {
    let before = scorer.full_score(dataset, cut_set)?;
    let after = scorer.full_score(
        dataset,
        &cut_set.with_cut(candidate.attribute, candidate.threshold),
    )?;
    Ok(after.saturating_sub(before))
}
