//! Assembled statements.

use crate::qb::clause::PLACEHOLDER;
use crate::value::Value;
use std::fmt;

/// The kind of statement, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Truncate,
    Drop,
    Create,
    /// Caller-supplied SQL.
    Raw,
}

/// SQL text plus its positional parameters, ready to execute.
///
/// The canonical text uses `?` placeholders. [`Statement::to_pg_sql`] renders
/// the `$1, $2, ...` form PostgreSQL expects. A doubled `??` stands for a
/// literal `?` (e.g. the JSONB key-exists operator).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    kind: StatementKind,
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    pub(crate) fn new(kind: StatementKind, sql: String, params: Vec<Value>) -> Self {
        Self { kind, sql, params }
    }

    /// Wrap caller-written SQL that uses `?` placeholders.
    pub fn raw(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self::new(StatementKind::Raw, sql.into(), params)
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Canonical SQL text with `?` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Number of positional placeholders in the text.
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        scan(&self.sql, |piece| {
            if let Piece::Placeholder = piece {
                count += 1;
            }
        });
        count
    }

    /// Render the text with numbered `$n` placeholders.
    pub fn to_pg_sql(&self) -> String {
        let mut out = String::with_capacity(self.sql.len() + self.params.len() * 2);
        let mut n = 0usize;
        scan(&self.sql, |piece| match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Placeholder => {
                n += 1;
                out.push('$');
                out.push_str(&n.to_string());
            }
            Piece::Escaped => out.push(PLACEHOLDER),
        });
        out
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

enum Piece<'a> {
    Text(&'a str),
    Placeholder,
    Escaped,
}

/// Split SQL into text, placeholders and escaped `??`.
///
/// Quoted literals (including `E'..'` escapes and `$tag$..$tag$` bodies),
/// quoted identifiers and comments are copied as text.
fn scan<'a>(sql: &'a str, mut emit: impl FnMut(Piece<'a>)) {
    let bytes = sql.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => {
                let escapes = i > 0
                    && matches!(bytes[i - 1], b'e' | b'E')
                    && (i < 2 || !is_ident_byte(bytes[i - 2]));
                i += 1;
                while i < bytes.len() && bytes[i] != b'\'' {
                    i += if escapes && bytes[i] == b'\\' { 2 } else { 1 };
                }
                i += 1;
            }
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    i += 1;
                }
                i += 1;
            }
            b'$' if i == 0 || !is_ident_byte(bytes[i - 1]) => match dollar_tag(&bytes[i..]) {
                Some(tag_len) => {
                    let tag = &bytes[i..i + tag_len];
                    i += tag_len;
                    while i < bytes.len() && !bytes[i..].starts_with(tag) {
                        i += 1;
                    }
                    i += tag_len;
                }
                None => i += 1,
            },
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i += 2;
            }
            b'?' => {
                emit(Piece::Text(&sql[start..i]));
                if bytes.get(i + 1) == Some(&b'?') {
                    emit(Piece::Escaped);
                    i += 2;
                } else {
                    emit(Piece::Placeholder);
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    emit(Piece::Text(&sql[start.min(sql.len())..]));
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || !b.is_ascii()
}

/// Length of a `$tag$` opener at the start of `bytes`, if there is one.
///
/// Tags never start with a digit, so `$1` is not a tag.
fn dollar_tag(bytes: &[u8]) -> Option<usize> {
    let mut end = 1;
    while end < bytes.len() && bytes[end] != b'$' {
        let b = bytes[end];
        let valid = b == b'_' || b.is_ascii_alphabetic() || (end > 1 && b.is_ascii_digit());
        if !valid {
            return None;
        }
        end += 1;
    }
    (end < bytes.len()).then_some(end + 1)
}
