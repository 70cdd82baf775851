use std::collections::HashMap;

use dcmetrics_core::{DEFAULT_RELATION, DenialConstraint, MetricsError, Result, render_for};
use serde::{Deserialize, Serialize};

/// Per-constraint metric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub predicate_form: String,
    pub succinctness: f64,
    /// Shared by every report of a batch; absent without a truth standard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree_of_approximation: Option<f64>,
    pub interestingness: f64,
    pub size: usize,
}

/// Join per-constraint metrics into reports sorted by size, largest first.
pub fn aggregate(
    batch: &[DenialConstraint],
    succinctness: &[f64],
    degree_of_approximation: Option<f64>,
    interestingness: &HashMap<DenialConstraint, f64>,
) -> Result<Vec<MetricReport>> {
    aggregate_for(
        batch,
        succinctness,
        degree_of_approximation,
        interestingness,
        DEFAULT_RELATION,
    )
}

/// Same as [`aggregate`], rendering logical forms over `relation`.
pub fn aggregate_for(
    batch: &[DenialConstraint],
    succinctness: &[f64],
    degree_of_approximation: Option<f64>,
    interestingness: &HashMap<DenialConstraint, f64>,
    relation: &str,
) -> Result<Vec<MetricReport>> {
    if batch.len() != succinctness.len() {
        return Err(MetricsError::Misaligned(format!(
            "{} constraint(s) but {} succinctness value(s)",
            batch.len(),
            succinctness.len()
        )));
    }

    let mut reports = batch
        .iter()
        .zip(succinctness)
        .enumerate()
        .map(|(index, (dc, succinctness))| {
            let interestingness = interestingness.get(dc).copied().ok_or_else(|| {
                MetricsError::Misaligned(format!("no interestingness for constraint {index}"))
            })?;
            Ok(MetricReport {
                predicate_form: render_for(dc, relation),
                succinctness: *succinctness,
                degree_of_approximation,
                interestingness,
                size: dc.size(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // sort_by is stable: equal sizes keep batch order.
    reports.sort_by(|a, b| b.size.cmp(&a.size));
    Ok(reports)
}
