//! Database handle: a pool plus execution settings.

use crate::error::DbResult;
use crate::exec::Executor;
use crate::logging::{LogConfig, QueryLogger};
use crate::pool::Pool;
use crate::transaction::TransactionScope;
use std::sync::Arc;

/// Entry point for running work against a pool.
///
/// ```ignore
/// let db = Database::new(pgsimple::create_pool(&url)?)
///     .with_logger(pgsimple::TracingLogger::new());
///
/// let mut tx = db.transaction().await?;
/// let rows = tx.fetch_all(&qb::select("users")).await?;
/// tx.commit().await?;
/// ```
#[derive(Debug)]
pub struct Database<P> {
    pool: P,
    executor: Executor,
}

impl<P: Pool> Database<P> {
    pub fn new(pool: P) -> Self {
        Self {
            pool,
            executor: Executor::new(),
        }
    }

    pub fn with_logger(mut self, logger: impl QueryLogger + 'static) -> Self {
        self.executor = self.executor.with_logger(logger);
        self
    }

    pub fn with_shared_logger(mut self, logger: Arc<dyn QueryLogger>) -> Self {
        self.executor = self.executor.with_shared_logger(logger);
        self
    }

    pub fn with_log_config(mut self, config: LogConfig) -> Self {
        self.executor = self.executor.with_log_config(config);
        self
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Check out a connection and begin a transaction on it.
    pub async fn transaction(&self) -> DbResult<TransactionScope<'_, P>> {
        TransactionScope::begin(&self.pool, self.executor.clone()).await
    }
}
