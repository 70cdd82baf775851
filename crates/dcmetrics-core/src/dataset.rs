use std::collections::HashMap;

use crate::constraint::ColumnRef;
use crate::error::{MetricsError, Result};

/// A single row: column identifier to opaque string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    row: usize,
    values: HashMap<String, String>,
}

impl Record {
    pub fn new(row: usize, values: HashMap<String, String>) -> Self {
        Self { row, values }
    }

    /// Position of this record in its dataset.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Look up a column value, failing when the column is absent.
    pub fn value(&self, column: &ColumnRef) -> Result<&str> {
        self.values
            .get(column.as_str())
            .map(String::as_str)
            .ok_or_else(|| MetricsError::MissingColumn {
                column: column.to_string(),
                row: self.row,
            })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered records sharing one header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Build a dataset from a header and positional rows.
    ///
    /// Rows shorter than the header leave the trailing columns absent;
    /// extra cells are dropped.
    pub fn from_rows<R, V>(columns: Vec<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = Vec<V>>,
        V: Into<String>,
    {
        let mut dataset = Self::new(columns);
        for cells in rows {
            let values = dataset
                .columns
                .iter()
                .cloned()
                .zip(cells.into_iter().map(Into::into))
                .collect();
            dataset.push(values);
        }
        dataset
    }

    /// Append a record; its row index is its position.
    pub fn push(&mut self, values: HashMap<String, String>) {
        let row = self.records.len();
        self.records.push(Record::new(row, values));
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of unordered pairs `(i, j)` with `i < j`.
    pub fn pair_count(&self) -> u64 {
        let n = self.records.len() as u64;
        n * n.saturating_sub(1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rows_leave_columns_absent() {
        let dataset = Dataset::from_rows(
            vec!["Zip".to_string(), "City".to_string()],
            vec![vec!["1", "A"], vec!["2"]],
        );
        let second = &dataset.records()[1];
        assert_eq!(second.row(), 1);
        assert_eq!(second.value(&ColumnRef::new("Zip")).expect("zip"), "2");
        assert_eq!(
            second.value(&ColumnRef::new("City")).unwrap_err(),
            MetricsError::MissingColumn {
                column: "City".to_string(),
                row: 1
            }
        );
    }

    #[test]
    fn pair_count_matches_triangle() {
        let header = vec!["a".to_string()];
        assert_eq!(Dataset::new(header.clone()).pair_count(), 0);
        assert_eq!(
            Dataset::from_rows(header.clone(), vec![vec!["x"]]).pair_count(),
            0
        );
        let rows = (0..5).map(|i| vec![i.to_string()]);
        assert_eq!(Dataset::from_rows(header, rows).pair_count(), 10);
    }
}
