//! Checks a discretized table against the table it was produced from.

use crate::dataset::{Dataset, DiscretizerFrameExt, ordered_label_codes};
use crate::error::{DiscretizeError, Result};
use crate::rules::Interval;
use crate::score::{cell_label_counts, discordant_pairs};
use core::fmt;
use itertools::Itertools;
use polars::prelude::*;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentFailure {
    pub row: usize,
    pub column: String,
    pub value: f64,
    pub interval: Interval,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub original_rows: usize,
    pub discretized_rows: usize,
    pub containment_failures: Vec<ContainmentFailure>,
    /// Discordant pairs sharing the same interval tuple.
    pub non_deterministic_pairs: u64,
    /// Distinct finite interval boundaries per attribute column.
    pub distinct_boundaries: Vec<(String, usize)>,
}

impl ValidationReport {
    pub fn row_count_matches(&self) -> bool {
        self.original_rows == self.discretized_rows
    }

    pub fn is_consistent(&self) -> bool {
        self.row_count_matches() && self.containment_failures.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rows: {} original, {} discretized ({})",
            self.original_rows,
            self.discretized_rows,
            if self.row_count_matches() { "ok" } else { "MISMATCH" }
        )?;
        writeln!(
            f,
            "Containment failures: {}",
            self.containment_failures.len()
        )?;
        for failure in self.containment_failures.iter().take(10) {
            writeln!(
                f,
                "  row {} column '{}': {} not in {}",
                failure.row, failure.column, failure.value, failure.interval
            )?;
        }
        writeln!(f, "Non-deterministic pairs: {}", self.non_deterministic_pairs)?;
        writeln!(f, "Distinct boundaries:")?;
        for (name, count) in &self.distinct_boundaries {
            writeln!(f, "  {}: {}", name, count)?;
        }
        Ok(())
    }
}

/// Validate `discretized` (interval labels) against `original` (raw values).
/// Both frames carry the class label in their last column.
pub fn validate(original: &DataFrame, discretized: &DataFrame) -> Result<ValidationReport> {
    let dataset = Dataset::from_dataframe(original)?;
    let names = discretized.column_names_vec();
    if names.len() != dataset.n_attributes() + 1 {
        return Err(DiscretizeError::DimensionMismatch {
            expected: dataset.n_attributes() + 1,
            got: names.len(),
        });
    }

    let original_rows = dataset.n_rows();
    let discretized_rows = discretized.height();
    let (label_column, attribute_columns) = names
        .split_last()
        .ok_or_else(|| DiscretizeError::InvalidDataset("table has no columns".to_string()))?;

    let intervals = attribute_columns
        .iter()
        .map(|name| {
            discretized
                .token_column_values(name)?
                .iter()
                .map(|token| Interval::from_str(token))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<Vec<Interval>>>>()?;

    let mut containment_failures = Vec::new();
    for (attr, column) in intervals.iter().enumerate() {
        for (row, interval) in column.iter().enumerate().take(original_rows) {
            let value = dataset.value(row, attr);
            if !interval.contains(value) {
                containment_failures.push(ContainmentFailure {
                    row,
                    column: attribute_columns[attr].clone(),
                    value,
                    interval: *interval,
                });
            }
        }
    }

    // Cells are the interval tuples; a pair sharing one with different
    // labels cannot be told apart by the discretized table.
    let label_tokens = discretized.token_column_values(label_column)?;
    let (labels, label_names) = ordered_label_codes(label_tokens.iter());
    let keys: Vec<String> = (0..discretized_rows)
        .map(|row| intervals.iter().map(|column| column[row].to_string()).join("|"))
        .collect();
    let non_deterministic_pairs = cell_label_counts(&keys, &labels, label_names.len())
        .iter()
        .map(|counts| discordant_pairs(counts))
        .sum();

    let distinct_boundaries = attribute_columns
        .iter()
        .zip(intervals.iter())
        .map(|(name, column)| {
            let count = column
                .iter()
                .flat_map(|iv| [iv.low, iv.high])
                .filter(|b| b.is_finite())
                .map(f64::to_bits)
                .unique()
                .count();
            (name.clone(), count)
        })
        .collect();

    let report = ValidationReport {
        original_rows,
        discretized_rows,
        containment_failures,
        non_deterministic_pairs,
        distinct_boundaries,
    };
    if !report.is_consistent() {
        log::warn!(
            "discretized table is inconsistent: {} containment failure(s), rows {} vs {}",
            report.containment_failures.len(),
            original_rows,
            discretized_rows
        );
    }
    Ok(report)
}
