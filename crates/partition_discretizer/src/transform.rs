//! Maps raw attribute values to the interval labels of a fitted cut set.

use crate::cutset::{CutSet, bucket_index};
use crate::dataset::{Dataset, DiscretizerFrameExt};
use crate::error::{DiscretizeError, Result};
use crate::rules::Interval;
use polars::prelude::*;

/// Interval of `value` under the sorted cut list `cuts`.
///
/// The first cut `c` with `value <= c` closes the interval; values above the
/// last cut land in `(last; inf)`.
pub fn interval_for(value: f64, cuts: &[f64]) -> Interval {
    let bucket = bucket_index(cuts, value);
    let low = if bucket == 0 {
        f64::NEG_INFINITY
    } else {
        cuts[bucket - 1]
    };
    let high = cuts.get(bucket).copied().unwrap_or(f64::INFINITY);
    Interval::new(low, high)
}

/// Every interval of one cut list, left to right.
pub fn attribute_intervals(cuts: &[f64]) -> Vec<Interval> {
    let mut bounds = Vec::with_capacity(cuts.len() + 2);
    bounds.push(f64::NEG_INFINITY);
    bounds.extend_from_slice(cuts);
    bounds.push(f64::INFINITY);
    bounds
        .windows(2)
        .map(|w| Interval::new(w[0], w[1]))
        .collect()
}

/// Row-major intervals: one `Vec<Interval>` per example.
pub fn transform_dataset(dataset: &Dataset, cut_set: &CutSet) -> Result<Vec<Vec<Interval>>> {
    if dataset.n_attributes() != cut_set.n_attributes() {
        return Err(DiscretizeError::DimensionMismatch {
            expected: cut_set.n_attributes(),
            got: dataset.n_attributes(),
        });
    }
    Ok((0..dataset.n_rows())
        .map(|row| {
            (0..dataset.n_attributes())
                .map(|attr| interval_for(dataset.value(row, attr), cut_set.cuts(attr)))
                .collect()
        })
        .collect())
}

/// Interval labels of one attribute column.
pub fn interval_labels(values: &[f64], cuts: &[f64]) -> Vec<String> {
    values
        .iter()
        .map(|&v| interval_for(v, cuts).to_string())
        .collect()
}

/// The discretized table: attribute columns as interval labels, then the
/// original label column.
pub fn to_dataframe(dataset: &Dataset, cut_set: &CutSet) -> Result<DataFrame> {
    if dataset.n_attributes() != cut_set.n_attributes() {
        return Err(DiscretizeError::DimensionMismatch {
            expected: cut_set.n_attributes(),
            got: dataset.n_attributes(),
        });
    }
    let mut columns: Vec<Column> = dataset
        .attribute_names()
        .iter()
        .enumerate()
        .map(|(attr, name)| {
            let labels = interval_labels(dataset.column(attr), cut_set.cuts(attr));
            Column::new(name.as_str().into(), labels)
        })
        .collect();
    columns.push(Column::new(
        dataset.label_column().into(),
        dataset.label_tokens(),
    ));
    Ok(DataFrame::new(columns)?)
}

/// Replace the attribute columns of a feature frame (no label column) with
/// their interval labels.
pub fn transform_frame(x: &DataFrame, cut_set: &CutSet) -> Result<DataFrame> {
    let names = x.column_names_vec();
    if names.len() != cut_set.n_attributes() {
        return Err(DiscretizeError::DimensionMismatch {
            expected: cut_set.n_attributes(),
            got: names.len(),
        });
    }
    let columns = names
        .iter()
        .enumerate()
        .map(|(attr, name)| {
            let values = x.numeric_column_values(name)?;
            let labels = interval_labels(&values, cut_set.cuts(attr));
            Ok(Column::new(name.as_str().into(), labels))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DataFrame::new(columns)?)
}
