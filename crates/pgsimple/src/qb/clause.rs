//! Clause builders.
//!
//! Each function turns one structured fragment into SQL text (plus, for
//! WHERE, the values it contributes). They are pure and never touch a
//! connection. Positional placeholders are written as `?`; see
//! [`Statement::to_pg_sql`](crate::Statement::to_pg_sql) for numbering.

use crate::error::{DbError, DbResult};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Positional placeholder marker used in canonical statement text.
pub const PLACEHOLDER: char = '?';

/// A WHERE condition with its positional parameters.
///
/// The condition must contain exactly one `?` per value. This is not checked
/// here; a mismatch surfaces as an execution error from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    condition: String,
    params: Vec<Value>,
}

impl WhereClause {
    /// Create a condition with its values.
    ///
    /// ```ignore
    /// let w = WhereClause::new("id = ? AND name = ?", params![1, "test"]);
    /// ```
    pub fn new(condition: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            condition: condition.into(),
            params,
        }
    }

    /// Create a condition without parameters.
    pub fn raw(condition: impl Into<String>) -> Self {
        Self::new(condition, Vec::new())
    }

    /// Bind one more positional value.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl<S: Into<String>> From<(S, Vec<Value>)> for WhereClause {
    fn from((condition, params): (S, Vec<Value>)) -> Self {
        Self::new(condition, params)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ASC") {
            Ok(Order::Asc)
        } else if s.eq_ignore_ascii_case("DESC") {
            Ok(Order::Desc)
        } else {
            Err(DbError::validation(format!(
                "unsupported order direction '{s}' (expected ASC or DESC)"
            )))
        }
    }
}

/// A single ORDER BY field with an optional direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    field: String,
    direction: Option<Order>,
}

impl OrderSpec {
    /// Order by `field` without an explicit direction.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: None,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field).with_direction(Order::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field).with_direction(Order::Desc)
    }

    pub fn with_direction(mut self, direction: Order) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Parse `"field"` or `"field ASC|DESC"`.
    pub fn parse(spec: &str) -> DbResult<Self> {
        let mut parts = spec.split_whitespace();
        let field = parts
            .next()
            .ok_or_else(|| DbError::validation("order spec is empty"))?;
        let direction = parts.next().map(str::parse::<Order>).transpose()?;
        if parts.next().is_some() {
            return Err(DbError::validation(format!(
                "order spec '{spec}' must name a single field"
            )));
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> Option<Order> {
        self.direction
    }
}

/// `WHERE <condition>` and its values, or nothing.
pub fn build_where(filter: Option<&WhereClause>) -> (String, Vec<Value>) {
    match filter {
        Some(w) => (format!("WHERE {}", w.condition), w.params.clone()),
        None => (String::new(), Vec::new()),
    }
}

/// ` ORDER BY <field>[ <DIRECTION>]`, or nothing.
pub fn build_order(order: Option<&OrderSpec>) -> String {
    let Some(order) = order else {
        return String::new();
    };
    match order.direction {
        Some(direction) => format!(" ORDER BY {} {}", order.field, direction),
        None => format!(" ORDER BY {}", order.field),
    }
}

/// ` LIMIT n`; absent or zero yields nothing.
pub fn build_limit(limit: Option<u64>) -> String {
    match limit {
        Some(n) if n > 0 => format!(" LIMIT {n}"),
        _ => String::new(),
    }
}

/// ` OFFSET n`; absent or zero yields nothing.
pub fn build_offset(offset: Option<u64>) -> String {
    match offset {
        Some(n) if n > 0 => format!(" OFFSET {n}"),
        _ => String::new(),
    }
}

/// ` RETURNING <fields>` with the caller's text verbatim, or nothing.
pub fn build_returning(fields: Option<&str>) -> String {
    match fields {
        Some(fields) if !fields.is_empty() => format!(" RETURNING {fields}"),
        _ => String::new(),
    }
}

/// Comma-joined column list and one placeholder per column.
pub fn build_insert_columns<S: AsRef<str>>(columns: &[S]) -> (String, String) {
    let cols = join(columns.iter().map(AsRef::as_ref));
    let placeholders = join(std::iter::repeat_n("?", columns.len()));
    (cols, placeholders)
}

/// `col1=?,col2=?` in input order. UPDATE needs at least one column.
pub fn build_update_assignments<S: AsRef<str>>(columns: &[S]) -> DbResult<String> {
    if columns.is_empty() {
        return Err(DbError::validation(
            "UPDATE requires at least one column to set",
        ));
    }
    Ok(join(columns.iter().map(|c| format!("{}=?", c.as_ref()))))
}

fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Append a clause fragment separated by exactly one space.
pub(crate) fn push_clause(sql: &mut String, fragment: &str) {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return;
    }
    if !sql.is_empty() {
        sql.push(' ');
    }
    sql.push_str(fragment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_where_absent() {
        assert_eq!(build_where(None), (String::new(), vec![]));
    }

    #[test]
    fn test_where_present() {
        let w = WhereClause::new("id = ? AND name = ?", params![1, "test"]);
        let (sql, values) = build_where(Some(&w));
        assert_eq!(sql, "WHERE id = ? AND name = ?");
        assert_eq!(values, params![1, "test"]);
    }

    #[test]
    fn test_order() {
        assert_eq!(build_order(None), "");
        assert_eq!(build_order(Some(&OrderSpec::new("name"))), " ORDER BY name");
        assert_eq!(
            build_order(Some(&OrderSpec::desc("created_at"))),
            " ORDER BY created_at DESC"
        );
    }

    #[test]
    fn test_order_parse() {
        assert_eq!(OrderSpec::parse("id").unwrap(), OrderSpec::new("id"));
        assert_eq!(OrderSpec::parse("id asc").unwrap(), OrderSpec::asc("id"));
        assert!(matches!(
            OrderSpec::parse("id SIDEWAYS"),
            Err(DbError::Validation(_))
        ));
        assert!(OrderSpec::parse("a DESC b").is_err());
        assert!(OrderSpec::parse("  ").is_err());
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(build_limit(None), "");
        assert_eq!(build_limit(Some(0)), "");
        assert_eq!(build_limit(Some(5)), " LIMIT 5");
        assert_eq!(build_offset(Some(0)), "");
        assert_eq!(build_offset(Some(20)), " OFFSET 20");
    }

    #[test]
    fn test_returning() {
        assert_eq!(build_returning(None), "");
        assert_eq!(build_returning(Some("")), "");
        assert_eq!(build_returning(Some("id, name")), " RETURNING id, name");
    }

    #[test]
    fn test_insert_columns() {
        let (cols, ph) = build_insert_columns(&["name", "age", "email"]);
        assert_eq!(cols, "name,age,email");
        assert_eq!(ph, "?,?,?");
    }

    #[test]
    fn test_update_assignments() {
        assert_eq!(build_update_assignments(&["a", "b"]).unwrap(), "a=?,b=?");
        let empty: [&str; 0] = [];
        assert!(matches!(
            build_update_assignments(&empty),
            Err(DbError::Validation(_))
        ));
    }

    #[test]
    fn test_push_clause_collapses_spaces() {
        let mut sql = "SELECT * FROM t".to_string();
        push_clause(&mut sql, "");
        push_clause(&mut sql, " ORDER BY id");
        push_clause(&mut sql, "   ");
        assert_eq!(sql, "SELECT * FROM t ORDER BY id");
    }
}
