//! Statement execution.

use crate::client::Connection;
use crate::error::{DbError, DbResult};
use crate::logging::{LogConfig, LogOutcome, LogRecord, QueryLogger};
use crate::result::ResultSet;
use crate::statement::Statement;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runs statements on a connection and reports them to an optional logger.
///
/// Cheap to clone; clones share the logger. Statements are attempted once:
/// there is no retry.
#[derive(Clone, Default)]
pub struct Executor {
    logger: Option<Arc<dyn QueryLogger>>,
    config: LogConfig,
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("logger", &self.logger.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(mut self, logger: impl QueryLogger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn with_shared_logger(mut self, logger: Arc<dyn QueryLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_log_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.config
    }

    /// Execute `stmt` on `conn`.
    ///
    /// Driver failures are returned as [`DbError::Execution`] carrying the
    /// executed SQL and the bound values.
    pub async fn execute<C: Connection>(&self, conn: &mut C, stmt: &Statement) -> DbResult<ResultSet> {
        let sql = stmt.to_pg_sql();
        let start = Instant::now();
        let result = conn.query(&sql, stmt.params()).await;
        let elapsed = start.elapsed();

        match result {
            Ok(rs) => {
                self.log_statement(stmt, &sql, elapsed, LogOutcome::Success { rows: rs.row_count() });
                Ok(rs)
            }
            Err(source) => {
                if self.logging_enabled() {
                    let error = source.to_string();
                    self.log_statement(stmt, &sql, elapsed, LogOutcome::Failure { error: &error });
                }
                Err(DbError::Execution {
                    sql,
                    params: stmt.params().to_vec(),
                    source,
                })
            }
        }
    }

    /// Emit a free-form message (transaction lifecycle and the like).
    pub fn log_message(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.emit(message);
        }
    }

    fn logging_enabled(&self) -> bool {
        self.logger.is_some() && self.config.enabled
    }

    fn log_statement(&self, stmt: &Statement, sql: &str, elapsed: Duration, outcome: LogOutcome<'_>) {
        let Some(logger) = self.logger.as_deref().filter(|_| self.config.enabled) else {
            return;
        };
        let sql = self.config.truncate_sql(sql);
        let record = LogRecord {
            sql: &sql,
            kind: stmt.kind(),
            param_count: stmt.params().len(),
            elapsed: self.config.include_timing.then_some(elapsed),
            outcome,
        };
        logger.emit_record(&record, &self.config.format(&record));
        if self.config.is_slow(elapsed) {
            logger.emit(&self.config.format_slow(&record, elapsed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::params;
    use crate::value::Value;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture(Mutex<Vec<String>>);

    impl QueryLogger for Arc<Capture> {
        fn emit(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    impl Capture {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    /// Records the SQL it receives and answers from a script.
    struct ScriptedConn {
        seen: Vec<(String, Vec<Value>)>,
        fail: bool,
    }

    impl Connection for ScriptedConn {
        async fn query(&mut self, sql: &str, params: &[Value]) -> Result<ResultSet, BoxError> {
            self.seen.push((sql.to_string(), params.to_vec()));
            if self.fail {
                Err("relation \"missing\" does not exist".into())
            } else {
                Ok(ResultSet::affected(1))
            }
        }
        async fn begin(&mut self) -> Result<(), BoxError> {
            Ok(())
        }
        async fn commit(&mut self) -> Result<(), BoxError> {
            Ok(())
        }
        async fn rollback(&mut self) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn sends_numbered_sql_and_params() {
        let mut conn = ScriptedConn { seen: vec![], fail: false };
        let stmt = Statement::raw("SELECT * FROM t WHERE a = ? AND b = ?", params![1, "x"]);
        let rs = Executor::new().execute(&mut conn, &stmt).await.unwrap();
        assert_eq!(rs.row_count(), 1);
        assert_eq!(
            conn.seen,
            vec![("SELECT * FROM t WHERE a = $1 AND b = $2".to_string(), params![1, "x"])]
        );
    }

    #[tokio::test]
    async fn failure_carries_sql_and_params() {
        let capture = Arc::new(Capture::default());
        let executor = Executor::new().with_logger(Arc::clone(&capture));
        let mut conn = ScriptedConn { seen: vec![], fail: true };
        let stmt = Statement::raw("DELETE FROM missing WHERE id = ?", params![7]);

        let err = executor.execute(&mut conn, &stmt).await.unwrap_err();
        match &err {
            DbError::Execution { sql, params, source } => {
                assert_eq!(sql, "DELETE FROM missing WHERE id = $1");
                assert_eq!(params, &params![7]);
                assert!(source.to_string().contains("does not exist"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.sql(), Some("DELETE FROM missing WHERE id = $1"));

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[Raw] FAILED DELETE FROM missing WHERE id = $1"));
        assert_eq!(conn.seen.len(), 1, "no retry");
    }

    #[tokio::test]
    async fn logs_success_and_slow_statements() {
        let capture = Arc::new(Capture::default());
        let executor = Executor::new()
            .with_logger(Arc::clone(&capture))
            .with_log_config(
                LogConfig::new()
                    .include_timing(false)
                    .slow_threshold(Duration::ZERO),
            );
        let mut conn = ScriptedConn { seen: vec![], fail: false };
        executor
            .execute(&mut conn, &Statement::raw("SELECT 1", params![]))
            .await
            .unwrap();

        let lines = capture.lines();
        assert_eq!(lines[0], "[Raw] SELECT 1 | params: 0 | rows: 1");
        assert!(lines[1].starts_with("SLOW STATEMENT [Raw]"));
    }

    #[tokio::test]
    async fn disabled_config_logs_nothing() {
        let capture = Arc::new(Capture::default());
        let executor = Executor::new()
            .with_logger(Arc::clone(&capture))
            .with_log_config(LogConfig::disabled());
        let mut conn = ScriptedConn { seen: vec![], fail: false };
        executor
            .execute(&mut conn, &Statement::raw("SELECT 1", params![]))
            .await
            .unwrap();
        assert!(capture.lines().is_empty());

        executor.log_message("Committing transaction");
        assert_eq!(capture.lines(), ["Committing transaction"]);
    }
}
