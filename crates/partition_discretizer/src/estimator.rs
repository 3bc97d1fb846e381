use crate::conf::DiscretizerConfig;
use crate::cutset::CutSet;
use crate::dataset::Dataset;
use crate::selector::{GreedyDiscretizer, SelectionRecord, SelectorState};
use crate::transform::transform_frame;
use estimators::api::{FitError, TransformError, Transformer};
use polars::prelude::*;

// Re-export for use in Python bindings
pub use crate::selector::ConvergenceReason;

/// `DataFrame` facing wrapper around [`GreedyDiscretizer`].
pub struct PartitionDiscretizer {
    pub config: DiscretizerConfig,
    pub discretizer: Option<GreedyDiscretizer>,
    pub feature_names: Option<Vec<String>>,
}

impl Default for PartitionDiscretizer {
    fn default() -> Self {
        Self::new(DiscretizerConfig::default())
    }
}

impl PartitionDiscretizer {
    pub fn new(config: DiscretizerConfig) -> Self {
        PartitionDiscretizer {
            config,
            discretizer: None,
            feature_names: None,
        }
    }

    pub fn cut_set(&self) -> Option<&CutSet> {
        self.discretizer.as_ref().and_then(|d| d.cut_set())
    }

    pub fn score(&self) -> u64 {
        self.discretizer.as_ref().map_or(0, |d| d.score())
    }

    pub fn history(&self) -> &[SelectionRecord] {
        match &self.discretizer {
            Some(d) => d.history(),
            None => &[],
        }
    }

    pub fn selection_summary(&self) -> String {
        match &self.discretizer {
            Some(d) => d.selection_summary(),
            None => "Discretizer not fitted".to_string(),
        }
    }

    pub fn fit_status(&self) -> String {
        match self.discretizer.as_ref().map(|d| d.state()) {
            Some(SelectorState::Converged(reason)) => format!("CONVERGED: {}", reason),
            Some(other) => format!("{:?}", other),
            None => "Discretizer not fitted".to_string(),
        }
    }

    /// Bucket indices (partition keys) of every row of `x`.
    pub fn apply(&self, x: &DataFrame, y: &DataFrame) -> Result<Vec<Vec<u32>>, TransformError> {
        let cut_set = self.cut_set().ok_or(TransformError::NotFitted)?;
        let dataset = Dataset::from_features_and_target(x, y)?;
        Ok(cut_set.partition_keys(&dataset)?)
    }
}

impl Transformer for PartitionDiscretizer {
    fn _fit_impl(&mut self, x: &DataFrame, y: &DataFrame) -> Result<(), FitError> {
        let dataset = Dataset::from_features_and_target(x, y)?;
        let mut discretizer = GreedyDiscretizer::new(self.config.clone());
        discretizer.fit(&dataset)?;

        self.feature_names = Some(dataset.attribute_names().to_vec());
        self.discretizer = Some(discretizer);
        Ok(())
    }

    fn _transform_impl(&self, x: &DataFrame) -> Result<DataFrame, TransformError> {
        let cut_set = self.cut_set().ok_or(TransformError::NotFitted)?;
        if let Some(names) = &self.feature_names {
            let given: Vec<String> = x
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect();
            if &given != names {
                return Err(TransformError::InvalidInput(format!(
                    "expected columns {:?}, got {:?}",
                    names, given
                )));
            }
        }
        Ok(transform_frame(x, cut_set)?)
    }
}
