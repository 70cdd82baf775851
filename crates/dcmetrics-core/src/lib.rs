//! Core contracts for denial constraint evaluation.
//!
//! This crate defines the predicate and constraint model, the pairwise
//! satisfaction rule, and the canonical logical-form renderer shared by the
//! metrics engine and the CLI.

pub mod constraint;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod render;

pub use constraint::{ColumnRef, DenialConstraint, Operator, Predicate};
pub use dataset::{Dataset, Record};
pub use error::{MetricsError, Result};
pub use evaluator::{predicate_holds, violates};
pub use render::{DEFAULT_RELATION, render, render_for, render_predicate};
