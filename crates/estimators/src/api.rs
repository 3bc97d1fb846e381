use polars::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Transform after fit failed: {0}")]
    Transform(#[from] TransformError),
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Model is not fitted")]
    NotFitted,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// A supervised transformer: learns from features `x` and a target frame `y`,
/// then rewrites feature frames.
pub trait Transformer: Sized {
    fn fit(&mut self, x: &DataFrame, y: &DataFrame) -> Result<(), FitError> {
        self._fit_impl(x, y)
    }

    fn _fit_impl(&mut self, _x: &DataFrame, _y: &DataFrame) -> Result<(), FitError> {
        // Default implementation can be overridden by specific transformers
        Err(FitError::InvalidInput(
            "Default fit implementation not provided".to_string(),
        ))
    }

    fn transform(&self, x: &DataFrame) -> Result<DataFrame, TransformError> {
        self._transform_impl(x)
    }

    fn _transform_impl(&self, _x: &DataFrame) -> Result<DataFrame, TransformError> {
        Err(TransformError::NotFitted)
    }

    fn fit_transform(&mut self, x: &DataFrame, y: &DataFrame) -> Result<DataFrame, FitError> {
        self.fit(x, y)?;
        Ok(self.transform(x)?)
    }
}
