use std::collections::HashSet;
use std::time::Instant;

use dcmetrics_core::{Dataset, DenialConstraint};
use tracing::info;
use uuid::Uuid;

use crate::aggregate::aggregate_for;
use crate::errors::EvalError;
use crate::metrics::{
    CoverageObserver, coverage_stats, degree_of_approximation, interestingness, succinctness,
};
use crate::model::{
    BatchSummary, CoverageMetrics, EvaluateOptions, EvaluationResult, METRICS_VERSION,
    MetricsReport, PerformanceMetrics,
};
use crate::report::render_report;

/// Evaluate a batch of discovered constraints.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    options: EvaluateOptions,
}

impl EvaluationEngine {
    pub fn new(options: EvaluateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EvaluateOptions {
        &self.options
    }

    /// Compute every enabled metric for `batch`.
    ///
    /// Degree of approximation is only computed when `truth_standard` is
    /// given. Coverage requires `dataset` when enabled in the options.
    pub fn run<O>(
        &self,
        batch: &[DenialConstraint],
        truth_standard: Option<&[DenialConstraint]>,
        dataset: Option<&Dataset>,
        observer: &mut O,
    ) -> Result<EvaluationResult, EvalError>
    where
        O: CoverageObserver + ?Sized,
    {
        let total_start = Instant::now();
        let started_at = chrono::Utc::now();
        let run_id = Uuid::new_v4().to_string();

        if self.options.coverage && dataset.is_none() {
            return Err(EvalError::InvalidInput(
                "coverage requires a dataset".to_string(),
            ));
        }

        info!(
            event = "evaluation_started",
            run_id = %run_id,
            constraints = batch.len(),
            coverage = self.options.coverage
        );

        let metrics_start = Instant::now();
        let succinctness_values = succinctness(batch)?;
        let interestingness_values = interestingness(batch)?;
        let approximation = truth_standard
            .map(|truth| degree_of_approximation(batch, truth))
            .transpose()?;
        let metrics_ms = metrics_start.elapsed().as_millis();

        let coverage_start = Instant::now();
        let coverage = match dataset.filter(|_| self.options.coverage) {
            Some(dataset) => {
                info!(
                    event = "coverage_started",
                    rows = dataset.len(),
                    pairs_per_constraint = dataset.pair_count()
                );
                let stats = coverage_stats(
                    batch,
                    dataset,
                    self.options.coverage_semantics,
                    observer,
                )?;
                info!(
                    event = "coverage_finished",
                    pairs_examined = stats.pairs_examined,
                    satisfied_pairs = stats.satisfied_pairs
                );
                Some(CoverageMetrics {
                    value: stats.value(),
                    semantics: self.options.coverage_semantics,
                    satisfied_pairs: stats.satisfied_pairs,
                    pairs_examined: stats.pairs_examined,
                })
            }
            None => None,
        };
        let coverage_ms = coverage_start.elapsed().as_millis();

        let mut reports = aggregate_for(
            batch,
            &succinctness_values,
            approximation,
            &interestingness_values,
            &self.options.relation,
        )?;
        if let Some(limit) = self.options.max_reports {
            reports.truncate(limit);
        }

        let distinct_constraints = batch.iter().collect::<HashSet<_>>().len();
        let metrics = MetricsReport {
            metrics_version: METRICS_VERSION.to_string(),
            run_id: run_id.clone(),
            started_at,
            relation: self.options.relation.clone(),
            batch: BatchSummary {
                constraints: batch.len(),
                distinct_constraints,
                truth_standard: truth_standard.map(<[DenialConstraint]>::len),
                dataset_rows: dataset.map(Dataset::len),
            },
            degree_of_approximation: approximation,
            coverage,
            reports,
            performance: PerformanceMetrics {
                metrics_ms,
                coverage_ms,
                total_ms: total_start.elapsed().as_millis(),
            },
        };

        info!(
            event = "evaluation_finished",
            run_id = %run_id,
            reports = metrics.reports.len(),
            total_ms = metrics.performance.total_ms as u64
        );

        let report = render_report(&metrics);
        Ok(EvaluationResult { metrics, report })
    }
}
