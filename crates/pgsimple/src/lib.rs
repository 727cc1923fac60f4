//! # pgsimple
//!
//! A small PostgreSQL statement builder with scoped transactions.
//!
//! ## Features
//!
//! - **Pure statement builders**: SELECT, two-table LEFT JOIN, INSERT,
//!   UPDATE, DELETE, TRUNCATE, DROP and CREATE produce a [`Statement`]
//!   (SQL text plus positional values) without touching a connection
//! - **Values, never interpolated**: every value travels as a bound parameter
//! - **Scoped transactions**: a [`TransactionScope`] commits or rolls back,
//!   and returns its connection to the pool exactly once
//! - **Logging that never fails**: statements and transaction events go to a
//!   [`QueryLogger`] (`tracing`, any `io::Write`, or nothing)
//!
//! ## Example
//!
//! ```ignore
//! use pgsimple::{params, qb, Database};
//! use pgsimple::qb::{OrderSpec, WhereClause};
//!
//! let db = Database::new(pgsimple::create_pool(&database_url)?);
//!
//! let users = pgsimple::transaction!(db, tx, {
//!     tx.insert(&qb::insert("users").set("name", "Alice").set("age", 30)).await?;
//!     tx.fetch_all(
//!         &qb::select("users")
//!             .filter(WhereClause::new("age > ?", params![18]))
//!             .order(OrderSpec::desc("age")),
//!     )
//!     .await
//! })?;
//! ```
//!
//! Table names, field names and DDL schema text are written into the SQL
//! verbatim. Only pass trusted identifiers.

pub mod client;
pub mod db;
pub mod error;
pub mod exec;
pub mod logging;
pub mod pool;
pub mod prelude;
pub mod qb;
pub mod result;
pub mod row;
pub mod statement;
pub mod transaction;
pub mod value;

pub use client::Connection;
pub use db::Database;
pub use error::{BoxError, DbError, DbResult};
pub use exec::Executor;
pub use logging::{LogConfig, LogFormatter, LogOutcome, LogRecord, NoopLogger, QueryLogger, WriteLogger};
pub use pool::Pool;
pub use result::ResultSet;
pub use row::{FromRow, Row};
pub use statement::{Statement, StatementKind};
pub use transaction::{ScopeState, TransactionScope};
pub use value::{FromValue, Value};

#[cfg(feature = "tracing")]
pub use logging::TracingLogger;

#[cfg(feature = "pool")]
pub use pool::{PoolConfig, create_pool, create_pool_with_config, create_pool_with_tls};

#[cfg(feature = "pool")]
pub use deadpool_postgres::RecyclingMethod;
