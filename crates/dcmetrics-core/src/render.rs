use crate::constraint::{DenialConstraint, Predicate};

/// Relation label used when no dataset name is given.
pub const DEFAULT_RELATION: &str = "D";

/// Render `dc` as `∀t0∈D,t1∈D: ¬[p1 ∧ … ∧ pn]`.
pub fn render(dc: &DenialConstraint) -> String {
    render_for(dc, DEFAULT_RELATION)
}

/// Render `dc` quantified over `relation` instead of `D`.
pub fn render_for(dc: &DenialConstraint, relation: &str) -> String {
    let predicates = dc
        .predicates
        .iter()
        .map(render_predicate)
        .collect::<Vec<_>>()
        .join(" ∧ ");
    format!("∀t0∈{relation},t1∈{relation}: ¬[{predicates}]")
}

pub fn render_predicate(predicate: &Predicate) -> String {
    format!(
        "t0.{} {} t1.{}",
        predicate.column1,
        predicate.op.symbol(),
        predicate.column2
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Operator;

    #[test]
    fn renders_in_stored_order() {
        let dc = DenialConstraint::new(vec![
            Predicate::new("Zip", "Zip", Operator::Equal),
            Predicate::new("City", "City", Operator::Unequal),
        ]);
        assert_eq!(
            render(&dc),
            "∀t0∈D,t1∈D: ¬[t0.Zip = t1.Zip ∧ t0.City ≠ t1.City]"
        );
        assert_eq!(render(&dc), render(&dc));
    }

    #[test]
    fn relation_label_is_substituted() {
        let dc = DenialConstraint::new(vec![Predicate::new("State", "Zip", Operator::Unequal)]);
        assert_eq!(
            render_for(&dc, "Hospital.csv"),
            "∀t0∈Hospital.csv,t1∈Hospital.csv: ¬[t0.State ≠ t1.Zip]"
        );
    }
}
