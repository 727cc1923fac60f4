//! DELETE statement builder.

use crate::error::DbResult;
use crate::qb::clause::{WhereClause, build_returning, build_where, push_clause};
use crate::qb::traits::ToStatement;
use crate::statement::{Statement, StatementKind};

/// DELETE builder.
///
/// Without a filter this deletes every row of the table.
#[derive(Debug, Clone)]
#[must_use]
pub struct Delete {
    table: String,
    filter: Option<WhereClause>,
    returning: Option<String>,
}

impl Delete {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            filter: None,
            returning: None,
        }
    }

    pub fn filter(mut self, filter: impl Into<WhereClause>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn returning(mut self, fields: &str) -> Self {
        self.returning = Some(fields.to_string());
        self
    }

    pub fn build(&self) -> Statement {
        let (where_sql, params) = build_where(self.filter.as_ref());
        let mut sql = format!("DELETE FROM {}", self.table);
        push_clause(&mut sql, &where_sql);
        push_clause(&mut sql, &build_returning(self.returning.as_deref()));
        Statement::new(StatementKind::Delete, sql, params)
    }

    /// Get the built SQL string (for debugging).
    pub fn to_sql(&self) -> String {
        self.build().sql().to_string()
    }
}

impl ToStatement for Delete {
    fn to_statement(&self) -> DbResult<Statement> {
        Ok(self.build())
    }
}
