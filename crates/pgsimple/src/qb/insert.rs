//! INSERT statement builder.

use crate::error::{DbError, DbResult};
use crate::qb::clause::{build_insert_columns, build_returning, push_clause};
use crate::qb::columns::Columns;
use crate::qb::traits::ToStatement;
use crate::statement::{Statement, StatementKind};
use crate::value::Value;

/// INSERT builder.
#[derive(Debug, Clone)]
#[must_use]
pub struct Insert {
    table: String,
    columns: Columns,
    returning: Option<String>,
}

impl Insert {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Columns::new(),
            returning: None,
        }
    }

    /// Set a column value. Columns keep the order they were first set in.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.columns.insert(column, value);
        self
    }

    /// Replace all column values.
    pub fn values(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    /// `RETURNING <fields>`, passed through verbatim.
    pub fn returning(mut self, fields: &str) -> Self {
        self.returning = Some(fields.to_string());
        self
    }

    pub fn build(&self) -> DbResult<Statement> {
        if self.columns.is_empty() {
            return Err(DbError::validation(
                "INSERT requires at least one column",
            ));
        }
        let (cols, placeholders) = build_insert_columns(&self.columns.names());
        let mut sql = format!(
            "INSERT INTO {} ({cols}) VALUES({placeholders})",
            self.table
        );
        push_clause(&mut sql, &build_returning(self.returning.as_deref()));
        Ok(Statement::new(
            StatementKind::Insert,
            sql,
            self.columns.values(),
        ))
    }

    /// Get the built SQL string (for debugging).
    pub fn to_sql(&self) -> DbResult<String> {
        Ok(self.build()?.sql().to_string())
    }
}

impl ToStatement for Insert {
    fn to_statement(&self) -> DbResult<Statement> {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_simple_insert() {
        let stmt = Insert::new("users")
            .set("name", "Alice")
            .set("age", 30)
            .build()
            .unwrap();
        assert_eq!(stmt.sql(), "INSERT INTO users (name,age) VALUES(?,?)");
        assert_eq!(stmt.params(), params!["Alice", 30].as_slice());
        assert_eq!(stmt.to_pg_sql(), "INSERT INTO users (name,age) VALUES($1,$2)");
    }

    #[test]
    fn test_insert_returning() {
        let sql = Insert::new("users")
            .set("name", "Bob")
            .returning("id, created_at")
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO users (name) VALUES(?) RETURNING id, created_at"
        );
    }

    #[test]
    fn test_insert_from_columns() {
        let cols = Columns::new().set("a", 1).set("b", None::<i64>);
        let stmt = Insert::new("t").values(cols).build().unwrap();
        assert_eq!(stmt.sql(), "INSERT INTO t (a,b) VALUES(?,?)");
        assert_eq!(stmt.params(), [Value::Int(1), Value::Null].as_slice());
    }

    #[test]
    fn test_empty_insert_is_rejected() {
        assert!(matches!(
            Insert::new("t").build(),
            Err(DbError::Validation(_))
        ));
    }
}
