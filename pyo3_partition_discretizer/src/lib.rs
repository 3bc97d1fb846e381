use estimators::api::*;
use partition_discretizer::conf::{DiscretizerConfig, GainMode, ScoringStrategy};
use partition_discretizer::estimator::PartitionDiscretizer;
use partition_discretizer::merger::IntervalMerger;
use polars::prelude::DataFrame as PolarsDataFrame;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::*;
use pyo3_polars::{PolarsAllocator, PyDataFrame};

#[global_allocator]
static ALLOC: PolarsAllocator = PolarsAllocator::new();

fn value_error<E: std::fmt::Display>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyclass]
pub struct PyPartitionDiscretizer {
    inner: PartitionDiscretizer,
}

#[pymethods]
impl PyPartitionDiscretizer {
    #[new]
    #[pyo3(signature = (
        scoring = "auto",
        full_recompute = false,
        max_rounds = None,
        parallel = false,
        brute_force_max_rows = None,
    ))]
    pub fn new(
        scoring: &str,
        full_recompute: bool,
        max_rounds: Option<usize>,
        parallel: bool,
        brute_force_max_rows: Option<usize>,
    ) -> PyResult<Self> {
        let scoring: ScoringStrategy = scoring.parse().map_err(PyValueError::new_err)?;
        let gain_mode = if full_recompute {
            GainMode::FullRecompute
        } else {
            GainMode::Incremental
        };
        let mut config = DiscretizerConfig::default()
            .with_scoring(scoring)
            .with_gain_mode(gain_mode)
            .with_max_rounds(max_rounds)
            .with_parallel(parallel);
        if let Some(rows) = brute_force_max_rows {
            config.brute_force_max_rows = rows;
        }
        Ok(Self {
            inner: PartitionDiscretizer::new(config),
        })
    }

    pub fn fit(&mut self, x: PyDataFrame, y: PyDataFrame) -> PyResult<()> {
        let x_df: PolarsDataFrame = x.into();
        let y_df: PolarsDataFrame = y.into();
        self.inner.fit(&x_df, &y_df).map_err(value_error)
    }

    pub fn transform(&self, x: PyDataFrame) -> PyResult<PyDataFrame> {
        let x_df: PolarsDataFrame = x.into();
        let out = self.inner.transform(&x_df).map_err(value_error)?;
        Ok(PyDataFrame(out))
    }

    pub fn fit_transform(&mut self, x: PyDataFrame, y: PyDataFrame) -> PyResult<PyDataFrame> {
        let x_df: PolarsDataFrame = x.into();
        let y_df: PolarsDataFrame = y.into();
        let out = self.inner.fit_transform(&x_df, &y_df).map_err(value_error)?;
        Ok(PyDataFrame(out))
    }

    /// Fitted cut list per feature, in feature order.
    pub fn cuts(&self) -> PyResult<Vec<Vec<f64>>> {
        self.inner
            .cut_set()
            .map(|c| c.all_cuts().to_vec())
            .ok_or_else(|| value_error(TransformError::NotFitted))
    }

    pub fn cuts_json(&self) -> PyResult<String> {
        let cut_set = self
            .inner
            .cut_set()
            .ok_or_else(|| value_error(TransformError::NotFitted))?;
        cut_set.to_json().map_err(value_error)
    }

    pub fn score(&self) -> u64 {
        self.inner.score()
    }

    pub fn fit_status(&self) -> String {
        self.inner.fit_status()
    }

    pub fn selection_summary(&self) -> String {
        self.inner.selection_summary()
    }

    /// One dict per committed cut: round, feature, threshold, gain, score, purity.
    pub fn history(&self, py: Python<'_>) -> PyResult<PyObject> {
        let names = self.inner.feature_names.clone().unwrap_or_default();
        let records = PyList::empty(py);
        for record in self.inner.history() {
            let entry = PyDict::new(py);
            entry.set_item("round", record.round)?;
            let feature = names
                .get(record.candidate.attribute)
                .cloned()
                .unwrap_or_else(|| format!("x{}", record.candidate.attribute + 1));
            entry.set_item("feature", feature)?;
            entry.set_item("threshold", record.candidate.threshold)?;
            entry.set_item("gain", record.gain)?;
            entry.set_item("score", record.score)?;
            entry.set_item("purity", record.purity)?;
            records.append(entry)?;
        }
        Ok(records.into())
    }

    /// Bucket index of every row on every feature.
    pub fn apply(&self, x: PyDataFrame, y: PyDataFrame) -> PyResult<Vec<Vec<u32>>> {
        let x_df: PolarsDataFrame = x.into();
        let y_df: PolarsDataFrame = y.into();
        self.inner.apply(&x_df, &y_df).map_err(value_error)
    }
}

#[pyclass]
pub struct PyIntervalMerger {
    inner: IntervalMerger,
}

#[pymethods]
impl PyIntervalMerger {
    #[new]
    #[pyo3(signature = (max_bins = 5))]
    pub fn new(max_bins: usize) -> PyResult<Self> {
        Ok(Self {
            inner: IntervalMerger::new(max_bins).map_err(value_error)?,
        })
    }

    pub fn fit(&mut self, values: Vec<f64>, labels: Vec<String>) -> PyResult<()> {
        self.inner.fit(&values, &labels).map_err(value_error)?;
        Ok(())
    }

    pub fn transform(&self, values: Vec<f64>) -> PyResult<Vec<Option<usize>>> {
        self.inner.transform(&values).map_err(value_error)
    }

    pub fn fit_transform(
        &mut self,
        values: Vec<f64>,
        labels: Vec<String>,
    ) -> PyResult<Vec<Option<usize>>> {
        self.inner
            .fit_transform(&values, &labels)
            .map_err(value_error)
    }

    pub fn bins(&self) -> Vec<(f64, f64)> {
        self.inner.bins()
    }

    pub fn count_separated_pairs(&self, values: Vec<f64>, labels: Vec<String>) -> PyResult<u64> {
        self.inner
            .count_separated_pairs(&values, &labels)
            .map_err(value_error)
    }
}

#[pymodule]
fn partition_discretizer_py(_py: Python, m: &Bound<PyModule>) -> PyResult<()> {
    m.add_class::<PyPartitionDiscretizer>()?;
    m.add_class::<PyIntervalMerger>()?;
    Ok(())
}
