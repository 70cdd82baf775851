use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// Column identifier within a record schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnRef(String);

impl ColumnRef {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ColumnRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Comparison operator between two column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Operator {
    Equal,
    Unequal,
}

impl Operator {
    /// Input tag as emitted by DC discovery tools.
    pub fn tag(self) -> &'static str {
        match self {
            Operator::Equal => "EQUAL",
            Operator::Unequal => "UNEQUAL",
        }
    }

    /// Symbol used in the logical form.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::Unequal => "≠",
        }
    }

    /// Apply the operator to two opaque values.
    pub fn holds(self, left: &str, right: &str) -> bool {
        match self {
            Operator::Equal => left == right,
            Operator::Unequal => left != right,
        }
    }
}

impl FromStr for Operator {
    type Err = MetricsError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "EQUAL" => Ok(Operator::Equal),
            "UNEQUAL" => Ok(Operator::Unequal),
            other => Err(MetricsError::UnsupportedOperator {
                operator: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = MetricsError;

    fn try_from(tag: String) -> Result<Self> {
        tag.parse()
    }
}

/// Comparison of `column1` in the first record against `column2` in the second.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub column1: ColumnRef,
    pub column2: ColumnRef,
    pub op: Operator,
}

impl Predicate {
    pub fn new(column1: impl Into<ColumnRef>, column2: impl Into<ColumnRef>, op: Operator) -> Self {
        Self {
            column1: column1.into(),
            column2: column2.into(),
            op,
        }
    }

    /// Build a predicate from an operator tag, rejecting unknown tags.
    pub fn parse(
        column1: impl Into<ColumnRef>,
        column2: impl Into<ColumnRef>,
        tag: &str,
    ) -> Result<Self> {
        let op = tag.parse::<Operator>()?;
        Ok(Self::new(column1, column2, op))
    }
}

/// Ordered conjunction of predicates that no pair of distinct records may satisfy.
///
/// Equality and hashing are structural over the ordered predicate list, so
/// `[A, B]` and `[B, A]` are distinct constraints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DenialConstraint {
    pub predicates: Vec<Predicate>,
}

impl DenialConstraint {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    /// Number of predicates in the conjunction.
    pub fn size(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl FromIterator<Predicate> for DenialConstraint {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
