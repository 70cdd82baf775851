use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use dcmetrics_core::{Dataset, DenialConstraint, MetricsError, Predicate};
use serde::Deserialize;
use tracing::warn;

use crate::errors::EvalError;

/// Options for reading line-delimited constraint files.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Drop whole constraints that use unsupported operators instead of failing.
    pub skip_unsupported: bool,
}

/// Counters for a constraint file read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub lines: usize,
    pub loaded: usize,
    pub malformed: usize,
    pub unsupported: usize,
}

#[derive(Debug, Clone)]
pub struct LoadedConstraints {
    pub constraints: Vec<DenialConstraint>,
    pub summary: LoadSummary,
}

// Discovery output carries table identifiers and type tags; only the
// column identifiers and the operator take part in evaluation.
#[derive(Debug, Deserialize)]
struct RawConstraint {
    predicates: Vec<RawPredicate>,
}

#[derive(Debug, Deserialize)]
struct RawPredicate {
    column1: RawColumn,
    column2: RawColumn,
    op: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColumn {
    column_identifier: String,
}

impl RawConstraint {
    fn into_constraint(self) -> Result<DenialConstraint, MetricsError> {
        self.predicates
            .into_iter()
            .map(|raw| {
                Predicate::parse(
                    raw.column1.column_identifier,
                    raw.column2.column_identifier,
                    &raw.op,
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DenialConstraint::new)
    }
}

/// Read one JSON constraint per line.
///
/// Blank lines are ignored and lines that are not valid constraint JSON are
/// skipped with a warning.
pub fn load_constraints<R: BufRead>(
    reader: R,
    options: LoadOptions,
) -> Result<LoadedConstraints, EvalError> {
    let mut constraints = Vec::new();
    let mut summary = LoadSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        summary.lines += 1;

        let raw = match serde_json::from_str::<RawConstraint>(&line) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(event = "constraint_line_skipped", line = line_no, error = %err);
                summary.malformed += 1;
                continue;
            }
        };

        match raw.into_constraint() {
            Ok(dc) => {
                constraints.push(dc);
                summary.loaded += 1;
            }
            Err(MetricsError::UnsupportedOperator { operator }) if options.skip_unsupported => {
                warn!(
                    event = "constraint_unsupported_skipped",
                    line = line_no,
                    operator = %operator
                );
                summary.unsupported += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(LoadedConstraints {
        constraints,
        summary,
    })
}

pub fn load_constraints_path(
    path: &Path,
    options: LoadOptions,
) -> Result<LoadedConstraints, EvalError> {
    let file = File::open(path)?;
    load_constraints(BufReader::new(file), options)
}

/// Read a CSV dataset with a header row.
pub fn load_dataset<R: Read>(reader: R) -> Result<Dataset, EvalError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let mut dataset = Dataset::new(headers.clone());

    for record in reader.records() {
        let record = record?;
        let values = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect::<HashMap<_, _>>();
        dataset.push(values);
    }

    Ok(dataset)
}

pub fn load_dataset_path(path: &Path) -> Result<Dataset, EvalError> {
    let file = File::open(path)?;
    load_dataset(file)
}
