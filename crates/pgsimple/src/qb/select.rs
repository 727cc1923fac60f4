//! SELECT statement builder.

use crate::error::DbResult;
use crate::qb::clause::{
    WhereClause, OrderSpec, build_limit, build_offset, build_order, build_where, push_clause,
};
use crate::qb::traits::ToStatement;
use crate::statement::{Statement, StatementKind};

/// SELECT builder.
///
/// ```ignore
/// let stmt = pgsimple::qb::select("users")
///     .fields(["id", "name"])
///     .filter(WhereClause::new("age > ?", params![18]))
///     .order(OrderSpec::desc("created_at"))
///     .limit(10)
///     .build();
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Select {
    table: String,
    fields: Vec<String>,
    filter: Option<WhereClause>,
    order: Option<OrderSpec>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            fields: Vec::new(),
            filter: None,
            order: None,
            limit: None,
            offset: None,
        }
    }

    /// Columns to select. Empty means `*`.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: impl Into<WhereClause>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn order(mut self, order: OrderSpec) -> Self {
        self.order = Some(order);
        self
    }

    /// `LIMIT n`; zero means no limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// `OFFSET n`; zero means no offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn build(&self) -> Statement {
        let fields = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(",")
        };
        let mut sql = format!("SELECT {fields} FROM {}", self.table);
        let (where_sql, params) = build_where(self.filter.as_ref());
        push_clause(&mut sql, &where_sql);
        push_clause(&mut sql, &build_order(self.order.as_ref()));
        push_clause(&mut sql, &build_limit(self.limit));
        push_clause(&mut sql, &build_offset(self.offset));
        Statement::new(StatementKind::Select, sql, params)
    }

    /// Get the built SQL string (for debugging).
    pub fn to_sql(&self) -> String {
        self.build().sql().to_string()
    }
}

impl ToStatement for Select {
    fn to_statement(&self) -> DbResult<Statement> {
        Ok(self.build())
    }
}
