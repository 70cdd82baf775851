use std::ops::ControlFlow;

use dcmetrics_core::MetricsError;
use dcmetrics_eval::{
    CoverageProgress, CoverageSemantics, EvalError, EvaluateOptions, EvaluationEngine,
    LoadOptions, NoProgress, load_constraints, load_dataset,
};

const DISCOVERED: &str = r#"{"predicates":[{"column1":{"columnIdentifier":"Zip"},"column2":{"columnIdentifier":"Zip"},"op":"EQUAL"},{"column1":{"columnIdentifier":"City"},"column2":{"columnIdentifier":"City"},"op":"UNEQUAL"}]}
{"predicates":[{"column1":{"columnIdentifier":"Zip"},"column2":{"columnIdentifier":"Zip"},"op":"EQUAL"}]}
{"predicates":[{"column1":{"columnIdentifier":"Zip"},"column2":{"columnIdentifier":"Zip"},"op":"EQUAL"}]}
{"predicates":[{"column1":{"columnIdentifier":"Zip"},"column2":{"columnIdentifier":"Zip"},"op":"EQUAL"},{"column1":{"columnIdentifier":"City"},"column2":{"columnIdentifier":"City"},"op":"UNEQUAL"},{"column1":{"columnIdentifier":"State"},"column2":{"columnIdentifier":"State"},"op":"EQUAL"}]}
"#;

const TRUTH: &str = r#"{"predicates":[{"column1":{"columnIdentifier":"Zip"},"column2":{"columnIdentifier":"Zip"},"op":"EQUAL"}]}
"#;

const DATASET: &str = "Zip,City,State\n1,A,X\n1,B,X\n2,B,Y\n";

fn batch() -> Vec<dcmetrics_core::DenialConstraint> {
    load_constraints(DISCOVERED.as_bytes(), LoadOptions::default())
        .expect("load constraints")
        .constraints
}

fn truth() -> Vec<dcmetrics_core::DenialConstraint> {
    load_constraints(TRUTH.as_bytes(), LoadOptions::default())
        .expect("load truth")
        .constraints
}

#[test]
fn evaluation_without_coverage_skips_dataset() {
    let engine = EvaluationEngine::new(EvaluateOptions::default());
    let batch = batch();
    let truth = truth();
    let result = engine
        .run(&batch, Some(truth.as_slice()), None, &mut NoProgress)
        .expect("evaluate");

    let metrics = &result.metrics;
    assert!(metrics.coverage.is_none());
    assert_eq!(metrics.batch.constraints, 4);
    assert_eq!(metrics.batch.distinct_constraints, 3);
    assert_eq!(metrics.degree_of_approximation, Some(0.25));

    let sizes: Vec<_> = metrics.reports.iter().map(|r| r.size).collect();
    assert_eq!(sizes, vec![3, 2, 1, 1]);
    assert_eq!(metrics.reports[3].succinctness, 1.0);
    assert_eq!(metrics.reports[3].interestingness, 1.0);
    assert_eq!(metrics.reports[0].interestingness, 0.5);
    assert_eq!(
        metrics.reports[1].predicate_form,
        "∀t0∈D,t1∈D: ¬[t0.Zip = t1.Zip ∧ t0.City ≠ t1.City]"
    );
    assert!(result.report.contains("- coverage: not computed"));
}

#[test]
fn coverage_uses_predicate_satisfaction_by_default() {
    let options = EvaluateOptions {
        coverage: true,
        ..EvaluateOptions::default()
    };
    let dataset = load_dataset(DATASET.as_bytes()).expect("load dataset");
    let batch = batch();
    let result = EvaluationEngine::new(options)
        .run(&batch, None, Some(&dataset), &mut NoProgress)
        .expect("evaluate");

    let coverage = result.metrics.coverage.expect("coverage computed");
    // Per constraint: zip/city holds for 1 pair, zip for 1 pair each, zip/city/state for 1 pair.
    assert_eq!(coverage.semantics, CoverageSemantics::PredicatesHold);
    assert_eq!(coverage.pairs_examined, 12);
    assert_eq!(coverage.satisfied_pairs, 4);
    assert!(result.metrics.degree_of_approximation.is_none());
    assert!(
        result
            .metrics
            .reports
            .iter()
            .all(|r| r.degree_of_approximation.is_none())
    );
}

#[test]
fn coverage_without_dataset_is_invalid() {
    let options = EvaluateOptions {
        coverage: true,
        ..EvaluateOptions::default()
    };
    let err = EvaluationEngine::new(options)
        .run(&batch(), None, None, &mut NoProgress)
        .unwrap_err();
    assert!(matches!(err, EvalError::InvalidInput(_)));
}

#[test]
fn cancelled_coverage_aborts_evaluation() {
    let options = EvaluateOptions {
        coverage: true,
        ..EvaluateOptions::default()
    };
    let dataset = load_dataset(DATASET.as_bytes()).expect("load dataset");
    let mut observer = |_: &CoverageProgress| -> ControlFlow<()> { ControlFlow::Break(()) };
    let err = EvaluationEngine::new(options)
        .run(&batch(), None, Some(&dataset), &mut observer)
        .unwrap_err();
    assert!(matches!(
        err,
        EvalError::Metrics(MetricsError::Cancelled { rows_done: 1 })
    ));
}

#[test]
fn empty_batch_is_rejected() {
    let err = EvaluationEngine::new(EvaluateOptions::default())
        .run(&[], None, None, &mut NoProgress)
        .unwrap_err();
    assert!(matches!(
        err,
        EvalError::Metrics(MetricsError::EmptyBatch { .. })
    ));
}

#[test]
fn max_reports_truncates_after_sorting() {
    let options = EvaluateOptions {
        max_reports: Some(1),
        relation: "hospital".to_string(),
        ..EvaluateOptions::default()
    };
    let result = EvaluationEngine::new(options)
        .run(&batch(), None, None, &mut NoProgress)
        .expect("evaluate");
    assert_eq!(result.metrics.reports.len(), 1);
    assert_eq!(result.metrics.reports[0].size, 3);
    assert!(
        result.metrics.reports[0]
            .predicate_form
            .starts_with("∀t0∈hospital,t1∈hospital: ¬[")
    );
}
