//! Error types shared by the engine, the file wrappers and the estimator API.

use estimators::api::{FitError, TransformError};
use polars::prelude::PolarsError;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DiscretizeError {
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("dimension mismatch: expected {expected} attributes, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("discretizer is not fitted")]
    NotFitted,

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DiscretizeError>;

impl From<DiscretizeError> for FitError {
    fn from(err: DiscretizeError) -> Self {
        match err {
            DiscretizeError::InvalidDataset(msg) | DiscretizeError::InvalidParameter(msg) => {
                FitError::InvalidInput(msg)
            }
            other => FitError::InvalidInput(other.to_string()),
        }
    }
}

impl From<DiscretizeError> for TransformError {
    fn from(err: DiscretizeError) -> Self {
        match err {
            DiscretizeError::NotFitted => TransformError::NotFitted,
            DiscretizeError::InvalidDataset(msg) | DiscretizeError::InvalidParameter(msg) => {
                TransformError::InvalidInput(msg)
            }
            mismatch @ DiscretizeError::DimensionMismatch { .. } => {
                TransformError::InvalidInput(mismatch.to_string())
            }
            other => TransformError::Unknown(other.to_string()),
        }
    }
}
