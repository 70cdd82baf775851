use dcmetrics_core::{Dataset, DenialConstraint, Operator, Predicate, render, violates};

fn zip_city_constraint() -> DenialConstraint {
    let json = serde_json::json!({
        "predicates": [
            { "column1": "Zip", "column2": "Zip", "op": "EQUAL" },
            { "column1": "City", "column2": "City", "op": "UNEQUAL" }
        ]
    });
    serde_json::from_value(json).expect("parse constraint")
}

#[test]
fn zip_city_pair_satisfies_all_predicates() {
    let dc = zip_city_constraint();
    assert_eq!(dc.predicates[0].op, Operator::Equal);
    assert_eq!(dc.predicates[1], Predicate::new("City", "City", Operator::Unequal));

    let dataset = Dataset::from_rows(
        vec!["Zip".to_string(), "City".to_string()],
        vec![vec!["1", "A"], vec!["1", "B"]],
    );
    let records = dataset.records();
    assert!(violates(&records[0], &records[1], &dc).expect("evaluate pair"));
    assert_eq!(
        render(&dc),
        "∀t0∈D,t1∈D: ¬[t0.Zip = t1.Zip ∧ t0.City ≠ t1.City]"
    );
}

#[test]
fn unknown_operator_reports_unsupported_operator() {
    let json = serde_json::json!({
        "predicates": [{ "column1": "Zip", "column2": "Zip", "op": "GREATER" }]
    });
    let err = serde_json::from_value::<DenialConstraint>(json).unwrap_err();
    assert!(
        err.to_string().contains("unsupported operator: GREATER"),
        "unexpected error: {err}"
    );
}
