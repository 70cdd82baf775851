//! Quality metrics for batches of discovered denial constraints.

pub mod aggregate;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod report;

pub use aggregate::{MetricReport, aggregate, aggregate_for};
pub use engine::EvaluationEngine;
pub use errors::EvalError;
pub use loader::{
    LoadOptions, LoadSummary, LoadedConstraints, load_constraints, load_constraints_path,
    load_dataset, load_dataset_path,
};
pub use metrics::{
    CoverageObserver, CoverageProgress, CoverageStats, NoProgress, coverage, coverage_stats,
    degree_of_approximation, interestingness, succinctness,
};
pub use model::{
    BatchSummary, CoverageMetrics, CoverageSemantics, EvaluateOptions, EvaluationResult,
    METRICS_VERSION, MetricsReport, PerformanceMetrics,
};
pub use report::{render_report, render_text};
