use super::QueryLogger;
use std::io::{self, Write};
use std::sync::Mutex;

/// A logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl QueryLogger for NoopLogger {
    fn emit(&self, _message: &str) {}
}

/// Writes one line per message to any `io::Write`.
///
/// Write errors and a poisoned lock are ignored.
#[derive(Debug)]
pub struct WriteLogger<W> {
    out: Mutex<W>,
    prefix: String,
}

impl<W: Write + Send> WriteLogger<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            prefix: "[pgsimple]".to_string(),
        }
    }

    /// Set prefix for log messages.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriteLogger<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> QueryLogger for WriteLogger<W> {
    fn emit(&self, message: &str) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        let _ = if self.prefix.is_empty() {
            writeln!(out, "{message}")
        } else {
            writeln!(out, "{} {message}", self.prefix)
        };
    }
}
