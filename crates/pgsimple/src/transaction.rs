//! Transaction scope: one pooled connection, one transaction.
//!
//! A [`TransactionScope`] acquires a connection and issues `BEGIN` when it
//! is created. It ends in exactly one of two ways:
//!
//! - [`TransactionScope::commit`], [`TransactionScope::rollback`] or
//!   [`TransactionScope::finish`] settle the transaction and return the
//!   connection to the pool;
//! - dropping the scope while still open (early return, panic, cancelled
//!   task) discards the connection. Closing the session makes the server
//!   roll the transaction back.
//!
//! For ergonomic commit/rollback handling, use the [`transaction!`] macro.
//!
//! # Example
//!
//! ```ignore
//! use pgsimple::{qb, params, DbResult, Database};
//!
//! # async fn demo(db: &Database<deadpool_postgres::Pool>) -> DbResult<()> {
//! pgsimple::transaction!(db, tx, {
//!     tx.update(&qb::update("accounts").set("balance", 0).filter(("id = ?", params![1])))
//!         .await?;
//!     Ok(())
//! })?;
//! # Ok(()) }
//! ```

use crate::client::Connection;
use crate::error::{DbError, DbResult};
use crate::exec::Executor;
use crate::pool::Pool;
use crate::qb::{CreateTable, Delete, DropTable, Insert, Join, Select, ToStatement, Truncate, Update};
use crate::result::ResultSet;
use crate::row::{FromRow, Row};

/// Runs the given block inside a transaction scope.
///
/// - Begins a scope via `$db.transaction().await`.
/// - Commits on `Ok(_)`.
/// - Rolls back on `Err(_)`; a failed rollback is reported as
///   [`DbError::RollbackFailed`] wrapping the original error.
///
/// The block must evaluate to `pgsimple::DbResult<T>`.
#[macro_export]
macro_rules! transaction {
    ($db:expr, $tx:ident, $body:block) => {{
        let mut $tx = ($db).transaction().await?;
        let __pgsimple_tx_body_result = async { $body }.await;
        $tx.finish(__pgsimple_tx_body_result).await
    }};
}

/// Lifecycle of a [`TransactionScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    Open,
    Committed,
    RolledBack,
}

/// An open transaction on a connection checked out from `P`.
///
/// All statements run on the same connection. The connection goes back to
/// the pool exactly once, when the scope is dropped: released after a
/// successful commit or rollback, discarded otherwise.
#[must_use = "a transaction scope that is dropped without commit or rollback discards its connection"]
pub struct TransactionScope<'p, P: Pool> {
    pool: &'p P,
    conn: Option<P::Connection>,
    executor: Executor,
    state: ScopeState,
}

impl<P: Pool> std::fmt::Debug for TransactionScope<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionScope")
            .field("state", &self.state)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl<'p, P: Pool> TransactionScope<'p, P> {
    /// Acquire a connection from `pool` and begin a transaction.
    ///
    /// If `BEGIN` fails the connection is discarded.
    pub async fn begin(pool: &'p P, executor: Executor) -> DbResult<Self> {
        let mut conn = pool.acquire().await?;
        if let Err(source) = conn.begin().await {
            pool.discard(conn);
            return Err(DbError::Transaction {
                action: "BEGIN",
                source,
            });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pgsimple.transaction", "transaction started");
        Ok(Self {
            pool,
            conn: Some(conn),
            executor,
            state: ScopeState::Open,
        })
    }

    pub fn state(&self) -> ScopeState {
        self.state
    }

    /// Whether the transaction is still open and its connection usable.
    pub fn is_open(&self) -> bool {
        self.state == ScopeState::Open && self.conn.as_ref().is_some_and(|c| !c.is_closed())
    }

    /// Execute any statement (builder output or [`Statement::raw`](crate::Statement::raw)).
    pub async fn execute(&mut self, stmt: impl ToStatement) -> DbResult<ResultSet> {
        let stmt = stmt.to_statement()?;
        self.executor.execute(leased(&mut self.conn), &stmt).await
    }

    /// First row of a SELECT, forcing `LIMIT 1`.
    pub async fn fetch_one(&mut self, select: &Select) -> DbResult<Option<Row>> {
        let stmt = select.clone().limit(1).build();
        Ok(self.execute(&stmt).await?.fetch_one())
    }

    pub async fn fetch_one_as<T: FromRow>(&mut self, select: &Select) -> DbResult<Option<T>> {
        let stmt = select.clone().limit(1).build();
        self.execute(&stmt).await?.fetch_one_as()
    }

    pub async fn fetch_all(&mut self, select: &Select) -> DbResult<Vec<Row>> {
        Ok(self.execute(select).await?.fetch_all())
    }

    pub async fn fetch_all_as<T: FromRow>(&mut self, select: &Select) -> DbResult<Vec<T>> {
        self.execute(select).await?.fetch_all_as()
    }

    /// Rows of a two-table LEFT JOIN. Arity is validated before anything is sent.
    pub async fn join(&mut self, join: &Join) -> DbResult<Vec<Row>> {
        Ok(self.execute(join).await?.fetch_all())
    }

    /// Run an INSERT; `RETURNING` rows and the affected count are in the result.
    pub async fn insert(&mut self, insert: &Insert) -> DbResult<ResultSet> {
        self.execute(insert).await
    }

    pub async fn update(&mut self, update: &Update) -> DbResult<ResultSet> {
        self.execute(update).await
    }

    pub async fn delete(&mut self, delete: &Delete) -> DbResult<ResultSet> {
        self.execute(delete).await
    }

    pub async fn truncate(&mut self, truncate: &Truncate) -> DbResult<()> {
        self.execute(truncate).await.map(drop)
    }

    pub async fn drop_table(&mut self, drop_table: &DropTable) -> DbResult<()> {
        self.execute(drop_table).await.map(drop)
    }

    pub async fn create_table(&mut self, create: &CreateTable) -> DbResult<()> {
        self.execute(create).await.map(drop)
    }

    /// Commit the transaction.
    ///
    /// When `COMMIT` fails the scope stays open, so its connection is
    /// discarded rather than reused.
    pub async fn commit(mut self) -> DbResult<()> {
        self.executor.log_message("Committing transaction");
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pgsimple.transaction", "committing transaction");
        leased(&mut self.conn)
            .commit()
            .await
            .map_err(|source| DbError::Transaction {
                action: "COMMIT",
                source,
            })?;
        self.state = ScopeState::Committed;
        Ok(())
    }

    /// Roll the transaction back.
    pub async fn rollback(mut self) -> DbResult<()> {
        self.executor.log_message("Rolling back transaction");
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pgsimple.transaction", "rolling back transaction");
        leased(&mut self.conn)
            .rollback()
            .await
            .map_err(|source| DbError::Transaction {
                action: "ROLLBACK",
                source,
            })?;
        self.state = ScopeState::RolledBack;
        Ok(())
    }

    /// Commit on `Ok`, roll back on `Err`, and pass the result through.
    pub async fn finish<T>(self, result: DbResult<T>) -> DbResult<T> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(error) => match self.rollback().await {
                Ok(()) => Err(error),
                Err(rollback) => Err(DbError::RollbackFailed {
                    error: Box::new(error),
                    rollback: Box::new(rollback),
                }),
            },
        }
    }
}

/// The scope's connection. It is only taken in `Drop`.
fn leased<C>(conn: &mut Option<C>) -> &mut C {
    match conn {
        Some(conn) => conn,
        None => unreachable!("transaction scope used after its connection was returned"),
    }
}

impl<P: Pool> Drop for TransactionScope<'_, P> {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };
        if self.state == ScopeState::Open {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "pgsimple.transaction",
                "transaction scope dropped while open; discarding its connection"
            );
            self.pool.discard(conn);
        } else if conn.is_closed() {
            self.pool.discard(conn);
        } else {
            self.pool.release(conn);
        }
    }
}
