use super::*;
use crate::statement::StatementKind;
use std::io;
use std::time::Duration;

fn record<'a>(sql: &'a str, outcome: LogOutcome<'a>) -> LogRecord<'a> {
    LogRecord {
        sql,
        kind: StatementKind::Select,
        param_count: 2,
        elapsed: Some(Duration::from_millis(3)),
        outcome,
    }
}

#[test]
fn test_truncate_sql_bytes_respects_char_boundary() {
    assert_eq!(truncate_sql_bytes("abc", 10), "abc");
    assert_eq!(truncate_sql_bytes("abcdef", 3), "abc");
    // 'é' is two bytes; cutting inside it backs off to the boundary.
    assert_eq!(truncate_sql_bytes("aé", 2), "a");
}

#[test]
fn test_config_truncation() {
    let config = LogConfig::new().max_sql_length(10);
    assert_eq!(
        config.truncate_sql("SELECT * FROM users WHERE id = $1"),
        "SELECT * F..."
    );
    assert_eq!(config.truncate_sql("SELECT 1"), "SELECT 1");
    assert_eq!(
        config.no_truncate().truncate_sql("SELECT * FROM users"),
        "SELECT * FROM users"
    );
}

#[test]
fn test_default_format() {
    let config = LogConfig::new();
    let ok = config.format(&record("SELECT $1, $2", LogOutcome::Success { rows: 4 }));
    assert_eq!(ok, "[Select] SELECT $1, $2 | params: 2 | rows: 4 | 3ms");

    let failed = config.format(&LogRecord {
        elapsed: None,
        ..record("SELECT $1, $2", LogOutcome::Failure { error: "boom" })
    });
    assert_eq!(failed, "[Select] FAILED SELECT $1, $2 | params: 2 | error: boom");
}

#[test]
fn test_custom_formatter() {
    fn short(record: &LogRecord<'_>) -> String {
        format!("{} ({} params)", record.sql, record.param_count)
    }
    let config = LogConfig::new().formatter(short);
    let msg = config.format(&record("SELECT 1", LogOutcome::Success { rows: 1 }));
    assert_eq!(msg, "SELECT 1 (2 params)");
}

#[test]
fn test_slow_threshold() {
    let config = LogConfig::new().slow_threshold(Duration::from_millis(100));
    assert!(config.is_slow(Duration::from_millis(100)));
    assert!(!config.is_slow(Duration::from_millis(99)));
    assert!(!LogConfig::new().is_slow(Duration::from_secs(60)));
}

#[test]
fn test_disabled_config() {
    let config = LogConfig::disabled();
    assert!(!config.enabled);
    assert!(LogConfig::default().enabled);
}

#[test]
fn test_write_logger_writes_lines() {
    let logger = WriteLogger::new(Vec::new());
    logger.emit("Committing transaction");
    logger.emit("second");
    let out = String::from_utf8(logger.into_inner()).unwrap();
    assert_eq!(out, "[pgsimple] Committing transaction\n[pgsimple] second\n");
}

#[test]
fn test_write_logger_without_prefix() {
    let logger = WriteLogger::new(Vec::new()).prefix("");
    logger.emit("x");
    assert_eq!(logger.into_inner(), b"x\n");
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

#[test]
fn test_write_errors_are_swallowed() {
    let logger = WriteLogger::new(FailingWriter);
    logger.emit("ignored");
    logger.emit_record(&record("SELECT 1", LogOutcome::Success { rows: 0 }), "ignored");
}

#[test]
fn test_noop_logger() {
    NoopLogger.emit("anything");
}

#[cfg(feature = "tracing")]
#[test]
fn test_tracing_logger_without_subscriber() {
    let logger = TracingLogger::new().level(tracing::Level::INFO);
    logger.emit("Rolling back transaction");
    logger.emit_record(
        &record("SELECT 1", LogOutcome::Failure { error: "boom" }),
        "failed",
    );
}

#[cfg(feature = "tracing")]
mod tracing_fields {
    use super::record;
    use crate::logging::{LogOutcome, QueryLogger, TracingLogger};
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};

    #[derive(Clone, Default)]
    struct FieldNames(Arc<Mutex<Vec<Vec<&'static str>>>>);

    struct Names(Vec<&'static str>);

    impl Visit for Names {
        fn record_debug(&mut self, field: &Field, _value: &dyn std::fmt::Debug) {
            self.0.push(field.name());
        }
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FieldNames {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut names = Names(Vec::new());
            event.record(&mut names);
            self.0.lock().unwrap().push(names.0);
        }
    }

    #[test]
    fn test_tracing_logger_structured_fields() {
        let captured = FieldNames::default();
        let subscriber = tracing_subscriber::registry().with(captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            let logger = TracingLogger::new();
            logger.emit_record(
                &record("SELECT 1", LogOutcome::Success { rows: 1 }),
                "ok",
            );
            logger.emit_record(
                &record("SELECT 1", LogOutcome::Failure { error: "boom" }),
                "failed",
            );
        });

        let events = captured.0.lock().unwrap().clone();
        assert_eq!(events.len(), 2);
        for expected in ["kind", "param_count", "elapsed_us", "sql"] {
            assert!(events[0].contains(&expected), "success event lacks {expected}");
            assert!(events[1].contains(&expected), "failure event lacks {expected}");
        }
        assert!(events[0].contains(&"rows"));
        assert!(events[1].contains(&"error"));
    }
}
