use thiserror::Error;

/// Errors raised while building or evaluating denial constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// A predicate names an operator outside the supported set.
    #[error("unsupported operator: {operator}")]
    UnsupportedOperator { operator: String },
    /// A record lacks a column referenced by a predicate.
    #[error("column '{column}' missing from record {row}")]
    MissingColumn { column: String, row: usize },
    /// A batch-level metric was requested over zero constraints.
    #[error("{metric} is undefined for an empty constraint batch")]
    EmptyBatch { metric: &'static str },
    /// A constraint without predicates was found where its size is a divisor.
    #[error("constraint {index} has no predicates")]
    ZeroSizeConstraint { index: usize },
    /// Per-constraint metric inputs do not line up with the batch.
    #[error("misaligned metrics: {0}")]
    Misaligned(String),
    /// Coverage was aborted by its observer.
    #[error("coverage computation cancelled after {rows_done} row(s)")]
    Cancelled { rows_done: usize },
}

/// Convenience alias for results returned by the core.
pub type Result<T> = std::result::Result<T, MetricsError>;
