use chrono::{DateTime, Utc};
use dcmetrics_core::DEFAULT_RELATION;
use serde::{Deserialize, Serialize};

use crate::aggregate::MetricReport;

/// Metrics contract version for `metrics.json`.
pub const METRICS_VERSION: &str = "0.1";

/// What counts as a satisfied pair during the coverage scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageSemantics {
    /// Every predicate of the constraint holds for the pair.
    #[default]
    PredicatesHold,
    /// The pair does not violate the constraint.
    ConstraintHolds,
}

impl CoverageSemantics {
    pub(crate) fn is_satisfied(self, predicates_hold: bool) -> bool {
        match self {
            CoverageSemantics::PredicatesHold => predicates_hold,
            CoverageSemantics::ConstraintHolds => !predicates_hold,
        }
    }
}

/// Options for a batch evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateOptions {
    /// Run the quadratic coverage scan.
    pub coverage: bool,
    pub coverage_semantics: CoverageSemantics,
    /// Relation label used in rendered logical forms.
    pub relation: String,
    /// Keep only the first N reports after sorting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reports: Option<usize>,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            coverage: false,
            coverage_semantics: CoverageSemantics::default(),
            relation: DEFAULT_RELATION.to_string(),
            max_reports: None,
        }
    }
}

/// Machine-readable metrics for one batch evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub metrics_version: String,
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub relation: String,
    pub batch: BatchSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree_of_approximation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageMetrics>,
    pub reports: Vec<MetricReport>,
    pub performance: PerformanceMetrics,
}

/// Sizes of the evaluated inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub constraints: usize,
    pub distinct_constraints: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truth_standard: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_rows: Option<usize>,
}

/// Coverage outcome with the pair counts it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageMetrics {
    pub value: f64,
    pub semantics: CoverageSemantics,
    pub satisfied_pairs: u64,
    pub pairs_examined: u64,
}

/// Performance timings for the evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub metrics_ms: u128,
    pub coverage_ms: u128,
    pub total_ms: u128,
}

/// Result of a batch evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub metrics: MetricsReport,
    /// Markdown rendering of `metrics`.
    pub report: String,
}
