//! Per-attribute cut lists and the partition keys they induce.

use crate::dataset::Dataset;
use crate::error::{DiscretizeError, Result};
use serde::{Deserialize, Serialize};

/// Bucket index per attribute; equal keys mean a shared partition cell.
pub type PartitionKey = Vec<u32>;

/// Number of cuts strictly below `value`: the right-closed bucket index.
/// A value equal to a cut falls in the bucket that cut closes.
pub fn bucket_index(cuts: &[f64], value: f64) -> usize {
    cuts.partition_point(|c| *c < value)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CutSet {
    cuts: Vec<Vec<f64>>,
}

impl CutSet {
    pub fn new(n_attributes: usize) -> Self {
        Self {
            cuts: vec![Vec::new(); n_attributes],
        }
    }

    /// Build from explicit cut lists; each list must be strictly increasing.
    pub fn from_cuts(cuts: Vec<Vec<f64>>) -> Result<Self> {
        for (attr, list) in cuts.iter().enumerate() {
            if list.iter().any(|c| c.is_nan()) {
                return Err(DiscretizeError::InvalidParameter(format!(
                    "cut list of attribute {attr} contains NaN"
                )));
            }
            if list.windows(2).any(|w| w[0] >= w[1]) {
                return Err(DiscretizeError::InvalidParameter(format!(
                    "cut list of attribute {attr} is not strictly increasing"
                )));
            }
        }
        Ok(Self { cuts })
    }

    pub fn n_attributes(&self) -> usize {
        self.cuts.len()
    }

    pub fn cuts(&self, attribute: usize) -> &[f64] {
        &self.cuts[attribute]
    }

    pub fn all_cuts(&self) -> &[Vec<f64>] {
        &self.cuts
    }

    pub fn total_cuts(&self) -> usize {
        self.cuts.iter().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_cuts() == 0
    }

    pub fn contains(&self, attribute: usize, threshold: f64) -> bool {
        self.cuts[attribute]
            .binary_search_by(|c| c.total_cmp(&threshold))
            .is_ok()
    }

    /// Insert keeping the list sorted. Returns `false` if already present.
    pub fn insert(&mut self, attribute: usize, threshold: f64) -> bool {
        let list = &mut self.cuts[attribute];
        match list.binary_search_by(|c| c.total_cmp(&threshold)) {
            Ok(_) => false,
            Err(pos) => {
                list.insert(pos, threshold);
                true
            }
        }
    }

    /// A copy with one extra threshold.
    pub fn with_cut(&self, attribute: usize, threshold: f64) -> Self {
        let mut next = self.clone();
        next.insert(attribute, threshold);
        next
    }

    pub fn bucket(&self, attribute: usize, value: f64) -> usize {
        bucket_index(&self.cuts[attribute], value)
    }

    /// Nearest existing cuts strictly below and strictly above `threshold`.
    pub fn neighbors(&self, attribute: usize, threshold: f64) -> (Option<f64>, Option<f64>) {
        let list = &self.cuts[attribute];
        let lower_end = list.partition_point(|c| *c < threshold);
        let upper_start = list.partition_point(|c| *c <= threshold);
        let lower = lower_end.checked_sub(1).map(|i| list[i]);
        let upper = list.get(upper_start).copied();
        (lower, upper)
    }

    /// Partition key of one attribute vector.
    pub fn partition_key(&self, row: &[f64]) -> Result<PartitionKey> {
        if row.len() != self.n_attributes() {
            return Err(DiscretizeError::DimensionMismatch {
                expected: self.n_attributes(),
                got: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.cuts.iter())
            .map(|(&v, cuts)| bucket_index(cuts, v) as u32)
            .collect())
    }

    /// Partition key of every example, in row order.
    pub fn partition_keys(&self, dataset: &Dataset) -> Result<Vec<PartitionKey>> {
        if dataset.n_attributes() != self.n_attributes() {
            return Err(DiscretizeError::DimensionMismatch {
                expected: self.n_attributes(),
                got: dataset.n_attributes(),
            });
        }
        let mut keys: Vec<PartitionKey> =
            vec![Vec::with_capacity(self.n_attributes()); dataset.n_rows()];
        for (attr, cuts) in self.cuts.iter().enumerate() {
            for (key, &value) in keys.iter_mut().zip(dataset.column(attr)) {
                key.push(bucket_index(cuts, value) as u32);
            }
        }
        Ok(keys)
    }

    /// Bucket index of every example on a single attribute.
    pub fn attribute_buckets(&self, dataset: &Dataset, attribute: usize) -> Vec<u32> {
        dataset
            .column(attribute)
            .iter()
            .map(|&v| self.bucket(attribute, v) as u32)
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: CutSet = serde_json::from_str(json)?;
        Self::from_cuts(parsed.cuts)
    }
}
