//! Convenient imports for typical `pgsimple` usage.
//!
//! ```ignore
//! use pgsimple::prelude::*;
//! ```

pub use crate::qb::{self, Columns, Order, OrderSpec, ToStatement, WhereClause};
pub use crate::{
    Connection, Database, DbError, DbResult, FromRow, FromValue, Pool, ResultSet, Row, Statement,
    TransactionScope, Value, params,
};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
