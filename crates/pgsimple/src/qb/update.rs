//! UPDATE statement builder.

use crate::error::DbResult;
use crate::qb::clause::{
    WhereClause, build_returning, build_update_assignments, build_where, push_clause,
};
use crate::qb::columns::Columns;
use crate::qb::traits::ToStatement;
use crate::statement::{Statement, StatementKind};
use crate::value::Value;

/// UPDATE builder.
///
/// Parameters are always the SET values (in column order) followed by the
/// WHERE values, matching the placeholder order in the text.
#[derive(Debug, Clone)]
#[must_use]
pub struct Update {
    table: String,
    columns: Columns,
    filter: Option<WhereClause>,
    returning: Option<String>,
}

impl Update {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Columns::new(),
            filter: None,
            returning: None,
        }
    }

    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.columns.insert(column, value);
        self
    }

    pub fn values(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    pub fn filter(mut self, filter: impl Into<WhereClause>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn returning(mut self, fields: &str) -> Self {
        self.returning = Some(fields.to_string());
        self
    }

    /// Fails with a validation error when no column is set.
    pub fn build(&self) -> DbResult<Statement> {
        let assignments = build_update_assignments(&self.columns.names())?;
        let (where_sql, where_params) = build_where(self.filter.as_ref());

        let mut sql = format!("UPDATE {} SET {assignments}", self.table);
        push_clause(&mut sql, &where_sql);
        push_clause(&mut sql, &build_returning(self.returning.as_deref()));

        let mut params = self.columns.values();
        params.extend(where_params);
        Ok(Statement::new(StatementKind::Update, sql, params))
    }

    /// Get the built SQL string (for debugging).
    pub fn to_sql(&self) -> DbResult<String> {
        Ok(self.build()?.sql().to_string())
    }
}

impl ToStatement for Update {
    fn to_statement(&self) -> DbResult<Statement> {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::params;

    #[test]
    fn test_update_with_where() {
        let stmt = Update::new("users")
            .set("age", 31)
            .filter(WhereClause::new("id = ?", params![5]))
            .build()
            .unwrap();
        assert_eq!(stmt.sql(), "UPDATE users SET age=? WHERE id = ?");
        assert_eq!(stmt.params(), params![31, 5].as_slice());
        assert_eq!(stmt.to_pg_sql(), "UPDATE users SET age=$1 WHERE id = $2");
    }

    #[test]
    fn test_update_without_where() {
        let stmt = Update::new("t").set("a", 1).set("b", "x").build().unwrap();
        assert_eq!(stmt.sql(), "UPDATE t SET a=?,b=?");
        assert_eq!(stmt.params(), params![1, "x"].as_slice());
    }

    #[test]
    fn test_update_returning() {
        let sql = Update::new("t")
            .set("a", 1)
            .filter(("id = ?", params![2]))
            .returning("*")
            .to_sql()
            .unwrap();
        assert_eq!(sql, "UPDATE t SET a=? WHERE id = ? RETURNING *");
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let result = Update::new("t")
            .filter(WhereClause::new("id = ?", params![1]))
            .build();
        assert!(matches!(result, Err(DbError::Validation(_))));
    }
}
