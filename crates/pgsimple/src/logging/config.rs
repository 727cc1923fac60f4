use super::truncate_sql_bytes;
use crate::statement::StatementKind;
use std::fmt::Write as _;
use std::time::Duration;

/// Custom message formatter.
pub type LogFormatter = fn(&LogRecord<'_>) -> String;

/// How an executed statement ended.
#[derive(Debug, Clone, Copy)]
pub enum LogOutcome<'a> {
    Success { rows: u64 },
    Failure { error: &'a str },
}

/// Everything known about one executed statement.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    /// Executed SQL, already truncated per [`LogConfig::max_sql_length`].
    pub sql: &'a str,
    pub kind: StatementKind,
    pub param_count: usize,
    /// Present when [`LogConfig::include_timing`] is on.
    pub elapsed: Option<Duration>,
    pub outcome: LogOutcome<'a>,
}

/// Statement logging configuration.
///
/// Logging is on by default, with timing and without SQL truncation. It
/// only has an effect when a logger is attached.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether statements are logged at all.
    pub enabled: bool,
    /// Append the elapsed time to each message.
    pub include_timing: bool,
    /// Truncate long SQL strings (in bytes, on a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
    /// Statements at least this slow get an extra "SLOW STATEMENT" message.
    pub slow_threshold: Option<Duration>,
    /// Replaces the default message layout.
    pub formatter: Option<LogFormatter>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_timing: true,
            max_sql_length: None,
            slow_threshold: None,
            formatter: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that logs no statements.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn include_timing(mut self, include: bool) -> Self {
        self.include_timing = include;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub fn slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = Some(threshold);
        self
    }

    pub fn formatter(mut self, formatter: LogFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    pub(crate) fn is_slow(&self, elapsed: Duration) -> bool {
        self.slow_threshold.is_some_and(|t| elapsed >= t)
    }

    /// Render the message for one record.
    pub fn format(&self, record: &LogRecord<'_>) -> String {
        if let Some(formatter) = self.formatter {
            return formatter(record);
        }
        let mut out = format!("[{:?}] ", record.kind);
        match record.outcome {
            LogOutcome::Success { rows } => {
                let _ = write!(out, "{} | params: {} | rows: {}", record.sql, record.param_count, rows);
            }
            LogOutcome::Failure { error } => {
                let _ = write!(
                    out,
                    "FAILED {} | params: {} | error: {}",
                    record.sql, record.param_count, error
                );
            }
        }
        if let Some(elapsed) = record.elapsed {
            let _ = write!(out, " | {elapsed:?}");
        }
        out
    }

    pub(crate) fn format_slow(&self, record: &LogRecord<'_>, elapsed: Duration) -> String {
        format!("SLOW STATEMENT [{:?}]: {:?} | {}", record.kind, elapsed, record.sql)
    }
}
