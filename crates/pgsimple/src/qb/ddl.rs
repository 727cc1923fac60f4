//! TRUNCATE / DROP TABLE / CREATE TABLE.
//!
//! Table names and schema text are interpolated as raw SQL. Identifiers
//! cannot be bound as parameters, so these builders trust their input: never
//! pass user-controlled text here.

use crate::error::DbResult;
use crate::qb::traits::ToStatement;
use crate::statement::{Statement, StatementKind};

/// `TRUNCATE <tables> [RESTART IDENTITY] [CASCADE]`.
///
/// `table` may list several tables: `"t1, t2"`.
#[derive(Debug, Clone)]
#[must_use]
pub struct Truncate {
    table: String,
    restart_identity: bool,
    cascade: bool,
}

impl Truncate {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            restart_identity: false,
            cascade: false,
        }
    }

    pub fn restart_identity(mut self, restart: bool) -> Self {
        self.restart_identity = restart;
        self
    }

    pub fn cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn build(&self) -> Statement {
        let mut sql = format!("TRUNCATE {}", self.table);
        if self.restart_identity {
            sql.push_str(" RESTART IDENTITY");
        }
        if self.cascade {
            sql.push_str(" CASCADE");
        }
        Statement::new(StatementKind::Truncate, sql, Vec::new())
    }
}

/// `DROP TABLE IF EXISTS <table> [CASCADE]`.
#[derive(Debug, Clone)]
#[must_use]
pub struct DropTable {
    table: String,
    cascade: bool,
}

impl DropTable {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            cascade: false,
        }
    }

    pub fn cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn build(&self) -> Statement {
        let mut sql = format!("DROP TABLE IF EXISTS {}", self.table);
        if self.cascade {
            sql.push_str(" CASCADE");
        }
        Statement::new(StatementKind::Drop, sql, Vec::new())
    }
}

/// `CREATE TABLE <table> (<schema>)`.
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateTable {
    table: String,
    schema: String,
}

impl CreateTable {
    /// ```ignore
    /// CreateTable::new("my_table", "id SERIAL PRIMARY KEY, name TEXT");
    /// ```
    pub fn new(table: &str, schema: &str) -> Self {
        Self {
            table: table.to_string(),
            schema: schema.to_string(),
        }
    }

    pub fn build(&self) -> Statement {
        Statement::new(
            StatementKind::Create,
            format!("CREATE TABLE {} ({})", self.table, self.schema),
            Vec::new(),
        )
    }
}

macro_rules! impl_to_statement {
    ($($ty:ty),*) => {
        $(
            impl ToStatement for $ty {
                fn to_statement(&self) -> DbResult<Statement> {
                    Ok(self.build())
                }
            }
        )*
    };
}

impl_to_statement!(Truncate, DropTable, CreateTable);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_variants() {
        assert_eq!(Truncate::new("t").build().sql(), "TRUNCATE t");
        assert_eq!(
            Truncate::new("t1, t2")
                .cascade(true)
                .restart_identity(true)
                .build()
                .sql(),
            "TRUNCATE t1, t2 RESTART IDENTITY CASCADE"
        );
        assert_eq!(
            Truncate::new("t").cascade(true).build().sql(),
            "TRUNCATE t CASCADE"
        );
    }

    #[test]
    fn test_drop() {
        assert_eq!(DropTable::new("t").build().sql(), "DROP TABLE IF EXISTS t");
        let stmt = DropTable::new("t").cascade(true).build();
        assert_eq!(stmt.sql(), "DROP TABLE IF EXISTS t CASCADE");
        assert!(stmt.params().is_empty());
    }

    #[test]
    fn test_create() {
        let stmt = CreateTable::new("my_table", "id SERIAL PRIMARY KEY, name TEXT").build();
        assert_eq!(
            stmt.sql(),
            "CREATE TABLE my_table (id SERIAL PRIMARY KEY, name TEXT)"
        );
        assert_eq!(stmt.kind(), StatementKind::Create);
    }
}
