//! Statement builders.
//!
//! Every builder is pure: it turns table names, column/value maps and clause
//! options into a [`Statement`](crate::Statement) without touching a
//! connection. Assembly problems (wrong JOIN arity, an empty UPDATE) are
//! reported from `build()` so they surface before anything is sent.
//!
//! # Usage
//!
//! ```ignore
//! use pgsimple::{params, qb};
//! use pgsimple::qb::{OrderSpec, WhereClause};
//!
//! // SELECT
//! let stmt = qb::select("users")
//!     .fields(["id", "name"])
//!     .filter(WhereClause::new("age > ?", params![18]))
//!     .order(OrderSpec::desc("created_at"))
//!     .limit(10)
//!     .build();
//!
//! // INSERT
//! let stmt = qb::insert("users")
//!     .set("name", "Alice")
//!     .set("age", 30)
//!     .returning("id")
//!     .build()?;
//!
//! // UPDATE
//! let stmt = qb::update("users")
//!     .set("age", 31)
//!     .filter(("id = ?", params![5]))
//!     .build()?;
//! ```
//!
//! Table names, field names and DDL schema text are written into the SQL as
//! given. Only values travel as parameters.

pub mod clause;
mod columns;
mod ddl;
mod delete;
mod insert;
mod join;
mod select;
mod traits;
mod update;

pub use clause::{
    Order, OrderSpec, WhereClause, build_insert_columns, build_limit, build_offset, build_order,
    build_returning, build_update_assignments, build_where,
};
pub use columns::Columns;
pub use ddl::{CreateTable, DropTable, Truncate};
pub use delete::Delete;
pub use insert::Insert;
pub use join::Join;
pub use select::Select;
pub use traits::ToStatement;
pub use update::Update;

/// Create a SELECT builder for the given table.
pub fn select(table: &str) -> Select {
    Select::new(table)
}

/// Create a two-table LEFT JOIN builder. See [`Join`].
pub fn join<T, G, F>(tables: T, field_groups: G, join_fields: F) -> Join
where
    T: IntoIterator,
    T::Item: Into<String>,
    G: IntoIterator,
    G::Item: IntoIterator,
    <G::Item as IntoIterator>::Item: Into<String>,
    F: IntoIterator,
    F::Item: Into<String>,
{
    Join::new(tables, field_groups, join_fields)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: &str) -> Insert {
    Insert::new(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: &str) -> Update {
    Update::new(table)
}

/// Create a DELETE builder for the given table.
pub fn delete(table: &str) -> Delete {
    Delete::new(table)
}

/// Create a TRUNCATE builder for the given table.
pub fn truncate(table: &str) -> Truncate {
    Truncate::new(table)
}

/// Create a `DROP TABLE IF EXISTS` builder for the given table.
pub fn drop_table(table: &str) -> DropTable {
    DropTable::new(table)
}

/// Create a CREATE TABLE builder. `schema` is the column list, written verbatim.
pub fn create_table(table: &str, schema: &str) -> CreateTable {
    CreateTable::new(table, schema)
}
