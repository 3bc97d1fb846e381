//! Candidate cut points: midpoints between adjacent distinct values whose
//! labels differ.

use crate::conf::THRESHOLD_DECIMALS;
use crate::dataset::Dataset;
use core::fmt;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 2^53: above this every f64 is an integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub attribute: usize,
    pub threshold: f64,
}

impl Candidate {
    pub fn new(attribute: usize, threshold: f64) -> Self {
        Self {
            attribute,
            threshold,
        }
    }

    /// Attribute ascending, then threshold ascending. This is the tie-break
    /// order of the greedy search.
    pub fn order(&self, other: &Self) -> Ordering {
        self.attribute
            .cmp(&other.attribute)
            .then(self.threshold.total_cmp(&other.threshold))
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{} = {}", self.attribute + 1, self.threshold)
    }
}

/// Round to `THRESHOLD_DECIMALS` decimal digits.
/// Values too large to carry fractional digits are returned unchanged.
pub fn round_threshold(value: f64) -> f64 {
    let scale = 10f64.powi(THRESHOLD_DECIMALS);
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_INTEGER {
        return value;
    }
    let rounded = scaled.round() / scale;
    // -0.0 and 0.0 must collapse into one candidate
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Candidates of one attribute from its (value, label) pairs sorted by value.
pub fn attribute_candidates(sorted: &[(f64, u32)]) -> Vec<f64> {
    sorted
        .iter()
        .tuple_windows()
        .filter(|((v1, y1), (v2, y2))| y1 != y2 && v1 != v2)
        .map(|((v1, _), (v2, _))| round_threshold(v1 / 2.0 + v2 / 2.0))
        .dedup()
        .collect()
}

/// Sorted, duplicate-free candidate thresholds for every attribute.
pub fn generate_candidates(dataset: &Dataset) -> Vec<Vec<f64>> {
    (0..dataset.n_attributes())
        .map(|attr| {
            let cuts = attribute_candidates(&dataset.sorted_value_labels(attr));
            if cuts.is_empty() {
                log::warn!(
                    "attribute '{}' has no class transition; it keeps a single interval",
                    dataset.attribute_names()[attr]
                );
            }
            cuts
        })
        .collect()
}

/// The flat candidate pool in tie-break order.
pub fn candidate_pool(candidates: &[Vec<f64>]) -> Vec<Candidate> {
    candidates
        .iter()
        .enumerate()
        .flat_map(|(attr, cuts)| cuts.iter().map(move |&t| Candidate::new(attr, t)))
        .sorted_by(|a, b| a.order(b))
        .collect()
}
