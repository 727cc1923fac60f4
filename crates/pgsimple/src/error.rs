//! Error types for pgsimple

use crate::value::Value;
use thiserror::Error;

/// Result type alias for pgsimple operations
pub type DbResult<T> = Result<T, DbError>;

/// Boxed error produced by a driver or pool collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum DbError {
    /// A multi-table argument did not have the expected number of entries
    #[error("Arity error: {what} expects exactly {expected} entries, got {got}")]
    Arity {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// A structural precondition of a statement was violated
    #[error("Validation error: {0}")]
    Validation(String),

    /// The driver rejected or failed to run a statement
    #[error("Execution error: {source} (sql: {sql})")]
    Execution {
        sql: String,
        params: Vec<Value>,
        #[source]
        source: BoxError,
    },

    /// A connection could not be acquired from the pool
    #[error("Pool error: {0}")]
    Pool(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// BEGIN / COMMIT / ROLLBACK failed
    #[error("Transaction error: {action} failed: {source}")]
    Transaction {
        action: &'static str,
        #[source]
        source: BoxError,
    },

    /// A failed unit of work could not be rolled back
    #[error("{error} (rollback failed: {rollback})")]
    RollbackFailed {
        error: Box<DbError>,
        rollback: Box<DbError>,
    },

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DbError {
    /// Create an arity error.
    pub fn arity(what: &'static str, expected: usize, got: usize) -> Self {
        Self::Arity {
            what,
            expected,
            got,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Whether this error was raised before anything was sent to the database.
    pub fn is_build_error(&self) -> bool {
        matches!(self, Self::Arity { .. } | Self::Validation(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The SQL text of a failed statement, if this is an execution error.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::Execution { sql, .. } => Some(sql),
            Self::RollbackFailed { error, .. } => error.sql(),
            _ => None,
        }
    }

    /// The PostgreSQL SQLSTATE code reported by the server, if any.
    pub fn sql_state(&self) -> Option<&str> {
        let source = match self {
            Self::Execution { source, .. } | Self::Transaction { source, .. } => source,
            Self::RollbackFailed { error, .. } => return error.sql_state(),
            _ => return None,
        };
        source
            .downcast_ref::<tokio_postgres::Error>()?
            .as_db_error()
            .map(|db_err| db_err.code().code())
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        self.sql_state() == Some("23505")
    }

    /// Check if this is a foreign key violation error
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sql_state() == Some("23503")
    }

    /// Check if this is a check constraint violation error
    pub fn is_check_violation(&self) -> bool {
        self.sql_state() == Some("23514")
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for DbError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
