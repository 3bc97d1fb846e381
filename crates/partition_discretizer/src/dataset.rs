//! The immutable labelled table the engine fits on.
//!
//! Attributes are stored column-major so that per-attribute scans (candidate
//! generation, incremental gains) walk contiguous memory. Class labels are
//! encoded as dense `u32` codes in first-seen order.

use crate::error::{DiscretizeError, Result};
use polars::prelude::*;
use std::collections::HashMap;

pub type LabelCode = u32;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    attribute_names: Vec<String>,
    columns: Vec<Vec<f64>>,
    labels: Vec<LabelCode>,
    label_names: Vec<String>,
    label_column: String,
}

/// Encode tokens as dense codes, preserving first-seen order.
pub fn ordered_label_codes<I, S>(tokens: I) -> (Vec<LabelCode>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pos_map: HashMap<String, LabelCode> = HashMap::new();
    let mut names: Vec<String> = Vec::new();
    let mut codes: Vec<LabelCode> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        if let Some(&code) = pos_map.get(token) {
            codes.push(code);
        } else {
            let code = names.len() as LabelCode;
            pos_map.insert(token.to_string(), code);
            names.push(token.to_string());
            codes.push(code);
        }
    }
    (codes, names)
}

impl Dataset {
    /// Build a dataset from attribute columns and label tokens.
    ///
    /// Fails with `InvalidDataset` when there are fewer than two rows, no
    /// attribute column, ragged columns, or a non-finite value.
    pub fn new<S: AsRef<str>>(
        attribute_names: Vec<String>,
        columns: Vec<Vec<f64>>,
        labels: &[S],
    ) -> Result<Self> {
        if columns.is_empty() {
            return Err(DiscretizeError::InvalidDataset(
                "table needs at least one attribute column and a label column".to_string(),
            ));
        }
        if attribute_names.len() != columns.len() {
            return Err(DiscretizeError::InvalidDataset(format!(
                "{} attribute names for {} attribute columns",
                attribute_names.len(),
                columns.len()
            )));
        }
        let n_rows = labels.len();
        if n_rows < 2 {
            return Err(DiscretizeError::InvalidDataset(format!(
                "table needs at least two rows, got {n_rows}"
            )));
        }
        for (name, column) in attribute_names.iter().zip(columns.iter()) {
            if column.len() != n_rows {
                return Err(DiscretizeError::InvalidDataset(format!(
                    "attribute '{}' has {} values but there are {} labels",
                    name,
                    column.len(),
                    n_rows
                )));
            }
            if let Some(row) = column.iter().position(|v| !v.is_finite()) {
                return Err(DiscretizeError::InvalidDataset(format!(
                    "attribute '{}' has a non-numeric value at row {}",
                    name, row
                )));
            }
        }

        let (codes, label_names) = ordered_label_codes(labels.iter());
        Ok(Self {
            attribute_names,
            columns,
            labels: codes,
            label_names,
            label_column: "label".to_string(),
        })
    }

    /// Build a dataset from row vectors; attributes are named `x1, x2, ...`.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<f64>], labels: &[S]) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(DiscretizeError::InvalidDataset(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(DiscretizeError::InvalidDataset(format!(
                "row {} has {} attributes, expected {}",
                bad,
                rows[bad].len(),
                width
            )));
        }
        let columns: Vec<Vec<f64>> = (0..width)
            .map(|attr| rows.iter().map(|r| r[attr]).collect())
            .collect();
        Self::from_columns(columns, labels)
    }

    pub fn from_columns<S: AsRef<str>>(columns: Vec<Vec<f64>>, labels: &[S]) -> Result<Self> {
        let names = (1..=columns.len()).map(|i| format!("x{i}")).collect();
        Self::new(names, columns, labels)
    }

    /// Every column but the last is an attribute; the last is the class label.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let names = df.column_names_vec();
        if names.len() < 2 {
            return Err(DiscretizeError::InvalidDataset(format!(
                "table needs a label column after the attributes, got {} column(s)",
                names.len()
            )));
        }
        let (label_name, attribute_names) = names.split_last().ok_or_else(|| {
            DiscretizeError::InvalidDataset("table has no columns".to_string())
        })?;

        let columns = attribute_names
            .iter()
            .map(|name| df.numeric_column_values(name))
            .collect::<Result<Vec<_>>>()?;
        let labels = df.token_column_values(label_name)?;

        let mut dataset = Self::new(attribute_names.to_vec(), columns, &labels)?;
        dataset.label_column = label_name.clone();
        Ok(dataset)
    }

    /// Features and target in separate frames; the target frame's first column
    /// holds the labels.
    pub fn from_features_and_target(x: &DataFrame, y: &DataFrame) -> Result<Self> {
        if x.height() != y.height() {
            return Err(DiscretizeError::InvalidDataset(format!(
                "feature frame has {} rows but target frame has {}",
                x.height(),
                y.height()
            )));
        }
        let label_name = y
            .column_names_vec()
            .into_iter()
            .next()
            .ok_or_else(|| DiscretizeError::InvalidDataset("target frame is empty".to_string()))?;

        let attribute_names = x.column_names_vec();
        let columns = attribute_names
            .iter()
            .map(|name| x.numeric_column_values(name))
            .collect::<Result<Vec<_>>>()?;
        let labels = y.token_column_values(&label_name)?;

        let mut dataset = Self::new(attribute_names, columns, &labels)?;
        dataset.label_column = label_name;
        Ok(dataset)
    }

    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    pub fn n_attributes(&self) -> usize {
        self.columns.len()
    }

    pub fn n_labels(&self) -> usize {
        self.label_names.len()
    }

    pub fn column(&self, attribute: usize) -> &[f64] {
        &self.columns[attribute]
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn value(&self, row: usize, attribute: usize) -> f64 {
        self.columns[attribute][row]
    }

    pub fn row(&self, row: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c[row]).collect()
    }

    pub fn labels(&self) -> &[LabelCode] {
        &self.labels
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    pub fn label_name(&self, code: LabelCode) -> &str {
        &self.label_names[code as usize]
    }

    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Label token of every row, in row order.
    pub fn label_tokens(&self) -> Vec<&str> {
        self.labels.iter().map(|&c| self.label_name(c)).collect()
    }

    /// Number of unordered pairs carrying different labels; the upper bound
    /// of any separation score on this dataset.
    pub fn discordant_pairs(&self) -> u64 {
        let mut counts = vec![0u64; self.n_labels()];
        for &label in &self.labels {
            counts[label as usize] += 1;
        }
        crate::score::discordant_pairs(&counts)
    }

    /// (value, label) pairs of one attribute sorted by value, then label.
    pub fn sorted_value_labels(&self, attribute: usize) -> Vec<(f64, LabelCode)> {
        let mut pairs: Vec<(f64, LabelCode)> = self.columns[attribute]
            .iter()
            .copied()
            .zip(self.labels.iter().copied())
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        pairs
    }

    /// A copy of this dataset with the attribute columns replaced.
    pub fn with_columns(&self, columns: Vec<Vec<f64>>) -> Result<Self> {
        if columns.len() != self.n_attributes() {
            return Err(DiscretizeError::DimensionMismatch {
                expected: self.n_attributes(),
                got: columns.len(),
            });
        }
        let mut dataset = Self::new(self.attribute_names.clone(), columns, &self.label_tokens())?;
        dataset.label_column = self.label_column.clone();
        Ok(dataset)
    }
}

/// Extension methods for reading engine inputs out of a polars `DataFrame`.
pub trait DiscretizerFrameExt {
    /// All column names as owned Strings
    fn column_names_vec(&self) -> Vec<String>;

    /// A numeric column as `f64`; missing or non-numeric cells are rejected.
    fn numeric_column_values(&self, name: &str) -> Result<Vec<f64>>;

    /// A column rendered as string tokens; missing cells are rejected.
    fn token_column_values(&self, name: &str) -> Result<Vec<String>>;
}

impl DiscretizerFrameExt for DataFrame {
    fn column_names_vec(&self) -> Vec<String> {
        self.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn numeric_column_values(&self, name: &str) -> Result<Vec<f64>> {
        let series = self.column(name)?.as_materialized_series();
        if series.null_count() > 0 {
            return Err(DiscretizeError::InvalidDataset(format!(
                "attribute '{}' has {} missing value(s)",
                name,
                series.null_count()
            )));
        }
        let cast = series.strict_cast(&DataType::Float64).map_err(|_| {
            DiscretizeError::InvalidDataset(format!(
                "attribute '{}' contains a non-numeric value",
                name
            ))
        })?;
        let values: Vec<f64> = cast.f64()?.into_no_null_iter().collect();
        Ok(values)
    }

    fn token_column_values(&self, name: &str) -> Result<Vec<String>> {
        let series = self.column(name)?.as_materialized_series();
        let cast = series.cast(&DataType::String)?;
        cast.str()?
            .into_iter()
            .enumerate()
            .map(|(row, token)| {
                token.map(|t| t.trim().to_string()).ok_or_else(|| {
                    DiscretizeError::InvalidDataset(format!(
                        "column '{}' has a missing value at row {}",
                        name, row
                    ))
                })
            })
            .collect()
    }
}
