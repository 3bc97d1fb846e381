//! Bottom-up interval merging on a single attribute.
//!
//! Starts from one interval per distinct (value, label) point and repeatedly
//! merges the adjacent pair that loses the fewest class-transition boundaries
//! until at most `max_bins` intervals remain.

use crate::conf::MergerConfig;
use crate::dataset::{LabelCode, ordered_label_codes};
use crate::error::{DiscretizeError, Result};

/// A contiguous run of sorted (value, label) points.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeInterval {
    points: Vec<(f64, LabelCode)>,
    pub start: f64,
    pub end: f64,
}

impl MergeInterval {
    fn from_points(points: Vec<(f64, LabelCode)>) -> Self {
        let start = points[0].0;
        let end = points[points.len() - 1].0;
        Self { points, start, end }
    }

    pub fn points(&self) -> &[(f64, LabelCode)] {
        &self.points
    }

    /// Label of the leftmost point.
    pub fn first_label(&self) -> LabelCode {
        self.points[0].1
    }

    /// Label of the rightmost point.
    pub fn last_label(&self) -> LabelCode {
        self.points[self.points.len() - 1].1
    }

    /// `self` followed by `other`; both must already be in sort order.
    pub fn merge(&self, other: &MergeInterval) -> MergeInterval {
        let mut points = Vec::with_capacity(self.points.len() + other.points.len());
        points.extend_from_slice(&self.points);
        points.extend_from_slice(&other.points);
        Self::from_points(points)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.start <= value && value <= self.end
    }
}

fn boundary_changes(left: &MergeInterval, right: &MergeInterval) -> usize {
    usize::from(left.last_label() != right.first_label())
}

/// Number of adjacent boundaries where the class label changes.
pub fn separation_measure(intervals: &[MergeInterval]) -> usize {
    intervals
        .windows(2)
        .map(|w| boundary_changes(&w[0], &w[1]))
        .sum()
}

/// Measure lost by merging `intervals[index]` with `intervals[index + 1]`.
/// The merged run starts with the left label and ends with the right one, so
/// the outer boundaries are unchanged and only the inner one can disappear.
pub fn merge_loss(intervals: &[MergeInterval], index: usize) -> usize {
    boundary_changes(&intervals[index], &intervals[index + 1])
}

#[derive(Debug, Clone)]
pub struct IntervalMerger {
    pub config: MergerConfig,
    intervals: Vec<MergeInterval>,
    label_names: Vec<String>,
}

impl IntervalMerger {
    pub fn new(max_bins: usize) -> Result<Self> {
        Self::with_config(MergerConfig { max_bins })
    }

    pub fn with_config(config: MergerConfig) -> Result<Self> {
        if config.max_bins == 0 {
            return Err(DiscretizeError::InvalidParameter(
                "max_bins must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            config,
            intervals: Vec::new(),
            label_names: Vec::new(),
        })
    }

    pub fn fit<S: AsRef<str>>(&mut self, values: &[f64], labels: &[S]) -> Result<&[MergeInterval]> {
        if values.len() != labels.len() {
            return Err(DiscretizeError::InvalidDataset(format!(
                "{} values but {} labels",
                values.len(),
                labels.len()
            )));
        }
        if values.is_empty() {
            return Err(DiscretizeError::InvalidDataset(
                "cannot merge intervals of an empty attribute".to_string(),
            ));
        }
        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(DiscretizeError::InvalidDataset(format!(
                "non-numeric value at row {row}"
            )));
        }

        let (codes, label_names) = ordered_label_codes(labels.iter());
        let mut points: Vec<(f64, LabelCode)> =
            values.iter().copied().zip(codes).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut intervals: Vec<MergeInterval> = points
            .chunk_by(|a, b| a == b)
            .map(|group| MergeInterval::from_points(group.to_vec()))
            .collect();

        let max_bins = self.config.max_bins;
        log::debug!(
            "merging {} initial intervals down to {}",
            intervals.len(),
            max_bins
        );

        while intervals.len() > max_bins {
            let mut best: Option<(usize, usize)> = None;
            for idx in 0..intervals.len() - 1 {
                let loss = merge_loss(&intervals, idx);
                match best {
                    Some((_, best_loss)) if loss >= best_loss => {}
                    _ => best = Some((idx, loss)),
                }
            }
            let Some((idx, loss)) = best else { break };
            let merged = intervals[idx].merge(&intervals[idx + 1]);
            intervals.splice(idx..idx + 2, std::iter::once(merged));
            log::trace!("merged intervals {} and {} (loss {})", idx, idx + 1, loss);
        }

        self.intervals = intervals;
        self.label_names = label_names;
        Ok(&self.intervals)
    }

    pub fn intervals(&self) -> &[MergeInterval] {
        &self.intervals
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    pub fn is_fitted(&self) -> bool {
        !self.intervals.is_empty()
    }

    /// Index of the first interval whose `[start, end]` holds each value;
    /// values between or outside the fitted intervals map to `None`.
    pub fn transform(&self, values: &[f64]) -> Result<Vec<Option<usize>>> {
        if !self.is_fitted() {
            return Err(DiscretizeError::NotFitted);
        }
        Ok(values
            .iter()
            .map(|&v| self.intervals.iter().position(|iv| iv.contains(v)))
            .collect())
    }

    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        values: &[f64],
        labels: &[S],
    ) -> Result<Vec<Option<usize>>> {
        self.fit(values, labels)?;
        self.transform(values)
    }

    /// `(start, end)` of every interval.
    pub fn bins(&self) -> Vec<(f64, f64)> {
        self.intervals.iter().map(|iv| (iv.start, iv.end)).collect()
    }

    /// Discordant pairs falling into different bins. Uncovered values share
    /// the `None` bin.
    pub fn count_separated_pairs<S: AsRef<str>>(
        &self,
        values: &[f64],
        labels: &[S],
    ) -> Result<u64> {
        if values.len() != labels.len() {
            return Err(DiscretizeError::InvalidDataset(format!(
                "{} values but {} labels",
                values.len(),
                labels.len()
            )));
        }
        let bins = self.transform(values)?;
        let mut separated = 0u64;
        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                if labels[i].as_ref() != labels[j].as_ref() && bins[i] != bins[j] {
                    separated += 1;
                }
            }
        }
        Ok(separated)
    }
}
