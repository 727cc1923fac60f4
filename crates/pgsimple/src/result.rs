//! Buffered statement results.

use crate::error::DbResult;
use crate::row::{FromRow, Row};
use crate::value::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// The outcome of one executed statement.
///
/// Rows are fully buffered by the time the set is returned. `fetch_one` and
/// `fetch_all` consume rows from the front, like a cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Arc<[String]>,
    rows: VecDeque<Row>,
    rows_affected: u64,
}

impl ResultSet {
    pub fn new(columns: Arc<[String]>, rows: Vec<Row>, rows_affected: u64) -> Self {
        Self {
            columns,
            rows: rows.into(),
            rows_affected,
        }
    }

    /// Build a result from plain value rows (mostly useful for fakes in tests).
    pub fn from_values<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Arc<[String]> = columns.into_iter().map(Into::into).collect();
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|values| Row::new(Arc::clone(&columns), values))
            .collect();
        let count = rows.len() as u64;
        Self::new(columns, rows, count)
    }

    /// A result with no rows, only an affected-row count.
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }

    /// Next row, or `None` when exhausted.
    pub fn fetch_one(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    /// All remaining rows.
    pub fn fetch_all(&mut self) -> Vec<Row> {
        self.rows.drain(..).collect()
    }

    pub fn fetch_one_as<T: FromRow>(&mut self) -> DbResult<Option<T>> {
        self.fetch_one().as_ref().map(T::from_row).transpose()
    }

    pub fn fetch_all_as<T: FromRow>(&mut self) -> DbResult<Vec<T>> {
        self.rows.drain(..).map(|row| T::from_row(&row)).collect()
    }

    /// Rows affected (for DML) or returned (for queries), as reported by the server.
    pub fn row_count(&self) -> u64 {
        self.rows_affected
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Rows not yet fetched.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}
