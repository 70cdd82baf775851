use dcmetrics_core::MetricsError;
use thiserror::Error;

/// Errors emitted by the evaluation engine and its loaders.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
