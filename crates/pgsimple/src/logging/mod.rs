//! Statement and transaction logging.
//!
//! The executor and transaction scope report through a [`QueryLogger`]. A
//! logger only receives finished messages and can never fail the caller:
//! implementations swallow their own I/O errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use pgsimple::{Database, LogConfig, WriteLogger};
//! use std::time::Duration;
//!
//! let db = Database::new(pool)
//!     .with_logger(WriteLogger::stderr())
//!     .with_log_config(
//!         LogConfig::new()
//!             .max_sql_length(500)
//!             .slow_threshold(Duration::from_millis(250)),
//!     );
//! ```

mod config;
mod loggers;

#[cfg(feature = "tracing")]
mod tracing_logger;

#[cfg(test)]
mod tests;

pub use config::{LogConfig, LogFormatter, LogOutcome, LogRecord};
pub use loggers::{NoopLogger, WriteLogger};

#[cfg(feature = "tracing")]
pub use tracing_logger::TracingLogger;

/// Sink for log messages.
pub trait QueryLogger: Send + Sync {
    /// Emit one message.
    fn emit(&self, message: &str);

    /// Emit a statement message along with its structured record.
    ///
    /// The default implementation ignores the record.
    fn emit_record(&self, record: &LogRecord<'_>, message: &str) {
        let _ = record;
        self.emit(message);
    }
}

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
