use crate::constraint::{DenialConstraint, Predicate};
use crate::dataset::Record;
use crate::error::Result;

/// Check a single predicate between `left` (t0) and `right` (t1).
pub fn predicate_holds(left: &Record, right: &Record, predicate: &Predicate) -> Result<bool> {
    let value1 = left.value(&predicate.column1)?;
    let value2 = right.value(&predicate.column2)?;
    Ok(predicate.op.holds(value1, value2))
}

/// Whether the ordered pair satisfies every predicate of `dc`, i.e. violates it.
///
/// Evaluation stops at the first predicate that does not hold. Columns of
/// predicates after that point are not looked up, so a missing column is
/// only reported if it is reached.
pub fn violates(left: &Record, right: &Record, dc: &DenialConstraint) -> Result<bool> {
    for predicate in &dc.predicates {
        if !predicate_holds(left, right, predicate)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Operator;
    use crate::dataset::Dataset;
    use crate::error::MetricsError;

    fn zip_city() -> DenialConstraint {
        DenialConstraint::new(vec![
            Predicate::new("Zip", "Zip", Operator::Equal),
            Predicate::new("City", "City", Operator::Unequal),
        ])
    }

    fn dataset(rows: Vec<Vec<&str>>) -> Dataset {
        Dataset::from_rows(vec!["Zip".to_string(), "City".to_string()], rows)
    }

    #[test]
    fn all_predicates_holding_is_a_violation() {
        let data = dataset(vec![vec!["1", "A"], vec!["1", "B"]]);
        let records = data.records();
        assert!(violates(&records[0], &records[1], &zip_city()).expect("evaluate"));
    }

    #[test]
    fn one_failing_predicate_clears_the_pair() {
        let data = dataset(vec![vec!["1", "A"], vec!["1", "A"], vec!["2", "B"]]);
        let records = data.records();
        assert!(!violates(&records[0], &records[1], &zip_city()).expect("same city"));
        assert!(!violates(&records[0], &records[2], &zip_city()).expect("other zip"));
    }

    #[test]
    fn column_roles_are_not_symmetric() {
        let data = Dataset::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["x", "y"], vec!["y", "z"]],
        );
        let dc = DenialConstraint::new(vec![Predicate::new("a", "b", Operator::Equal)]);
        let records = data.records();
        assert!(!violates(&records[0], &records[1], &dc).expect("forward"));
        assert!(violates(&records[1], &records[0], &dc).expect("backward"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let data = dataset(vec![vec!["1", "A"], vec!["1"]]);
        let records = data.records();
        let err = violates(&records[0], &records[1], &zip_city()).unwrap_err();
        assert_eq!(
            err,
            MetricsError::MissingColumn {
                column: "City".to_string(),
                row: 1
            }
        );
    }

    #[test]
    fn short_circuit_skips_unreached_columns() {
        let data = dataset(vec![vec!["1", "A"], vec!["2"]]);
        let records = data.records();
        assert!(!violates(&records[0], &records[1], &zip_city()).expect("zip differs"));
    }

    #[test]
    fn empty_constraint_is_vacuously_violated() {
        let data = dataset(vec![vec!["1", "A"], vec!["2", "B"]]);
        let records = data.records();
        let dc = DenialConstraint::new(Vec::new());
        assert!(violates(&records[0], &records[1], &dc).expect("vacuous"));
    }
}
