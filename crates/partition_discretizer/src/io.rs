//! File entry points: load a delimited table, fit, write the discretized
//! table. The engine modules never touch the filesystem themselves.

use crate::conf::{DiscretizerConfig, OUTPUT_PREFIX};
use crate::cutset::CutSet;
use crate::dataset::Dataset;
use crate::error::{DiscretizeError, Result};
use crate::selector::{ConvergenceReason, GreedyDiscretizer, SelectorState};
use crate::transform::to_dataframe;
use crate::validate::{ValidationReport, validate};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct DiscretizeOptions {
    pub separator: u8,
    pub config: DiscretizerConfig,
    /// Also write the fitted cut set as JSON to this path.
    pub cuts_json: Option<PathBuf>,
}

impl Default for DiscretizeOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            config: DiscretizerConfig::default(),
            cuts_json: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitSummary {
    pub rows: usize,
    pub attributes: usize,
    pub cut_set: CutSet,
    pub score: u64,
    pub rounds: usize,
    pub convergence: Option<ConvergenceReason>,
    pub output: PathBuf,
}

/// `DISC<file name>` next to `input`.
pub fn default_output_path(input: &Path) -> Result<PathBuf> {
    let file_name = input.file_name().ok_or_else(|| {
        DiscretizeError::InvalidParameter(format!("'{}' has no file name", input.display()))
    })?;
    let name = format!("{}{}", OUTPUT_PREFIX, file_name.to_string_lossy());
    Ok(input.with_file_name(name))
}

/// Read a delimited table with a header row. Every column is read as text;
/// numeric conversion happens when the dataset is built.
pub fn read_frame(path: &Path, separator: u8) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Load a dataset: every column but the last is a numeric attribute.
pub fn read_dataset(path: &Path, separator: u8) -> Result<Dataset> {
    let df = read_frame(path, separator)?;
    log::debug!(
        "loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Dataset::from_dataframe(&df)
}

pub fn write_frame(df: &mut DataFrame, path: &Path, separator: u8) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(separator)
        .finish(df)?;
    Ok(())
}

/// Write the discretized form of `dataset` under `cut_set`.
pub fn write_discretized(
    dataset: &Dataset,
    cut_set: &CutSet,
    path: &Path,
    separator: u8,
) -> Result<()> {
    let mut df = to_dataframe(dataset, cut_set)?;
    write_frame(&mut df, path, separator)
}

/// Read `input`, fit the greedy discretizer, write the discretized table to
/// `output` (or the default output path) and return what was fitted.
pub fn discretize_file(
    input: &Path,
    output: Option<&Path>,
    options: &DiscretizeOptions,
) -> Result<FitSummary> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input)?,
    };
    let dataset = read_dataset(input, options.separator)?;

    let mut discretizer = GreedyDiscretizer::new(options.config.clone());
    let cut_set = discretizer.fit(&dataset)?.clone();

    write_discretized(&dataset, &cut_set, &output, options.separator)?;
    if let Some(path) = &options.cuts_json {
        std::fs::write(path, cut_set.to_json()?)?;
    }
    log::info!(
        "wrote {} rows to {} ({} cut(s))",
        dataset.n_rows(),
        output.display(),
        cut_set.total_cuts()
    );

    let convergence = match discretizer.state() {
        SelectorState::Converged(reason) => Some(reason),
        _ => None,
    };
    Ok(FitSummary {
        rows: dataset.n_rows(),
        attributes: dataset.n_attributes(),
        cut_set,
        score: discretizer.score(),
        rounds: discretizer.history().len(),
        convergence,
        output,
    })
}

/// Re-read an input table and its discretized output and cross-check them.
pub fn validate_files(original: &Path, discretized: &Path, separator: u8) -> Result<ValidationReport> {
    let original = read_frame(original, separator)?;
    let discretized = read_frame(discretized, separator)?;
    validate(&original, &discretized)
}
