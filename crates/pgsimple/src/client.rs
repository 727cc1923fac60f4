//! Connection trait: the seam between the crate and a database session.

use crate::error::BoxError;
use crate::result::ResultSet;
use crate::row::Row;
use crate::value::Value;
use futures_util::TryStreamExt;
use std::future::Future;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A single database session.
///
/// The crate only needs to run a statement and drive the transaction
/// lifecycle; errors are returned as driver errors and wrapped by the
/// caller. SQL passed to [`Connection::query`] already uses `$n`
/// placeholders.
pub trait Connection: Send {
    /// Run one statement and buffer its result.
    fn query(
        &mut self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Result<ResultSet, BoxError>> + Send;

    fn begin(&mut self) -> impl Future<Output = Result<(), BoxError>> + Send;

    fn commit(&mut self) -> impl Future<Output = Result<(), BoxError>> + Send;

    fn rollback(&mut self) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// Whether the session is known to be unusable.
    fn is_closed(&self) -> bool {
        false
    }
}

async fn run_query(
    client: &tokio_postgres::Client,
    sql: &str,
    params: &[Value],
) -> Result<ResultSet, BoxError> {
    let stmt = client.prepare(sql).await?;
    let columns: Arc<[String]> = stmt
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let bound: Vec<&(dyn ToSql + Sync)> = params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
    let stream = client.query_raw(&stmt, bound.iter().copied()).await?;
    let mut stream = std::pin::pin!(stream);

    let mut rows = Vec::new();
    while let Some(row) = stream.try_next().await? {
        rows.push(Row::from_pg(Arc::clone(&columns), &row)?);
    }
    let rows_affected = stream.rows_affected().unwrap_or(rows.len() as u64);
    Ok(ResultSet::new(columns, rows, rows_affected))
}

impl Connection for tokio_postgres::Client {
    async fn query(&mut self, sql: &str, params: &[Value]) -> Result<ResultSet, BoxError> {
        run_query(self, sql, params).await
    }

    async fn begin(&mut self) -> Result<(), BoxError> {
        self.batch_execute("BEGIN").await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BoxError> {
        self.batch_execute("COMMIT").await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), BoxError> {
        self.batch_execute("ROLLBACK").await?;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        tokio_postgres::Client::is_closed(self)
    }
}

// ===== deadpool-postgres support =====

#[cfg(feature = "pool")]
impl Connection for deadpool_postgres::Client {
    async fn query(&mut self, sql: &str, params: &[Value]) -> Result<ResultSet, BoxError> {
        // Delegate to the deref target (tokio_postgres::Client).
        run_query(self, sql, params).await
    }

    async fn begin(&mut self) -> Result<(), BoxError> {
        self.batch_execute("BEGIN").await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BoxError> {
        self.batch_execute("COMMIT").await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), BoxError> {
        self.batch_execute("ROLLBACK").await?;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        tokio_postgres::Client::is_closed(self)
    }
}
