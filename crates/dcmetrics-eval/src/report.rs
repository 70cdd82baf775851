use crate::aggregate::MetricReport;
use crate::model::{CoverageSemantics, MetricsReport};

/// Render a deterministic markdown report from batch metrics.
pub fn render_report(metrics: &MetricsReport) -> String {
    let mut lines = Vec::new();

    lines.push("# Denial Constraint Metrics Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- run_id: {}", metrics.run_id));
    lines.push(format!("- metrics_version: {}", metrics.metrics_version));
    lines.push(format!("- relation: {}", metrics.relation));
    lines.push(String::new());

    lines.push("## Batch summary".to_string());
    lines.push(format!("- constraints: {}", metrics.batch.constraints));
    lines.push(format!(
        "- distinct_constraints: {}",
        metrics.batch.distinct_constraints
    ));
    lines.push(format!(
        "- truth_standard: {}",
        optional(metrics.batch.truth_standard)
    ));
    lines.push(format!(
        "- dataset_rows: {}",
        optional(metrics.batch.dataset_rows)
    ));
    lines.push(format!(
        "- degree_of_approximation: {}",
        optional(metrics.degree_of_approximation.map(fmt_ratio))
    ));
    match &metrics.coverage {
        Some(coverage) => {
            let semantics = match coverage.semantics {
                CoverageSemantics::PredicatesHold => "predicates-hold",
                CoverageSemantics::ConstraintHolds => "constraint-holds",
            };
            lines.push(format!(
                "- coverage: {} ({} of {} pairs, {})",
                fmt_ratio(coverage.value),
                coverage.satisfied_pairs,
                coverage.pairs_examined,
                semantics
            ));
        }
        None => lines.push("- coverage: not computed".to_string()),
    }
    lines.push(String::new());

    lines.push("## Constraints".to_string());
    lines.push("| size | succinctness | interestingness | logical form |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());
    for report in &metrics.reports {
        lines.push(format!(
            "| {} | {} | {} | `{}` |",
            report.size,
            fmt_ratio(report.succinctness),
            fmt_ratio(report.interestingness),
            report.predicate_form
        ));
    }
    lines.push(String::new());

    lines.push("## Timings".to_string());
    lines.push(format!(
        "- metrics_ms: {}",
        metrics.performance.metrics_ms
    ));
    lines.push(format!(
        "- coverage_ms: {}",
        metrics.performance.coverage_ms
    ));
    lines.push(format!("- total_ms: {}", metrics.performance.total_ms));
    lines.join("\n")
}

/// Plain listing, one block per constraint.
pub fn render_text(reports: &[MetricReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str("Predicate:\n");
        out.push_str(&report.predicate_form);
        out.push('\n');
        out.push_str(&format!("Succinctness: {}\n", report.succinctness));
        if let Some(value) = report.degree_of_approximation {
            out.push_str(&format!("Degree of Approximation: {value}\n"));
        }
        out.push_str(&format!("Interestingness: {}\n", report.interestingness));
        out.push_str(&format!("Size: {}\n\n", report.size));
    }
    out
}

fn fmt_ratio(value: f64) -> String {
    format!("{value:.4}")
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string())
}
