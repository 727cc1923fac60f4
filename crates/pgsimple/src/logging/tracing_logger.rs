use super::{LogOutcome, LogRecord, QueryLogger};
use tracing::Level;

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

/// A `tracing`-based logger emitting on target `pgsimple.sql`.
///
/// Statement events carry `kind`, `param_count`, `elapsed_us` and `sql`
/// fields. Failed statements are always emitted at `WARN`.
///
/// Enable via the crate feature: `pgsimple = { features = ["tracing"] }`.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    /// Tracing event level to emit at.
    pub level: Level,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
        }
    }
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl QueryLogger for TracingLogger {
    fn emit(&self, message: &str) {
        emit_at_level!(self.level, target: "pgsimple.sql", "{message}");
    }

    fn emit_record(&self, record: &LogRecord<'_>, message: &str) {
        let elapsed_us = record.elapsed.map(|d| d.as_micros() as u64);
        match record.outcome {
            LogOutcome::Success { rows } => emit_at_level!(
                self.level,
                target: "pgsimple.sql",
                kind = ?record.kind,
                param_count = record.param_count,
                rows,
                elapsed_us,
                sql = %record.sql,
                "{message}"
            ),
            LogOutcome::Failure { error } => tracing::warn!(
                target: "pgsimple.sql",
                kind = ?record.kind,
                param_count = record.param_count,
                elapsed_us,
                sql = %record.sql,
                error,
                "{message}"
            ),
        }
    }
}
