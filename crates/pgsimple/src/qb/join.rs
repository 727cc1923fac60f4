//! Two-table LEFT JOIN builder.

use crate::error::{DbError, DbResult};
use crate::qb::clause::{
    OrderSpec, WhereClause, build_limit, build_offset, build_order, build_where, push_clause,
};
use crate::qb::traits::ToStatement;
use crate::statement::{Statement, StatementKind};

const JOIN_ARITY: usize = 2;

/// `SELECT ... FROM t0 LEFT JOIN t1 ON (t0.k0 = t1.k1)`.
///
/// Takes exactly two tables, two field groups (one per table) and two join
/// keys (one per table). Every selected field and both keys are qualified
/// with their table name. Arity is checked in [`Join::build`].
#[derive(Debug, Clone)]
#[must_use]
pub struct Join {
    tables: Vec<String>,
    field_groups: Vec<Vec<String>>,
    join_fields: Vec<String>,
    filter: Option<WhereClause>,
    order: Option<OrderSpec>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Join {
    pub fn new<T, G, F>(tables: T, field_groups: G, join_fields: F) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        G: IntoIterator,
        G::Item: IntoIterator,
        <G::Item as IntoIterator>::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            tables: tables.into_iter().map(Into::into).collect(),
            field_groups: field_groups
                .into_iter()
                .map(|group| group.into_iter().map(Into::into).collect())
                .collect(),
            join_fields: join_fields.into_iter().map(Into::into).collect(),
            filter: None,
            order: None,
            limit: None,
            offset: None,
        }
    }

    pub fn filter(mut self, filter: impl Into<WhereClause>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn order(mut self, order: OrderSpec) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn check_arity(&self) -> DbResult<()> {
        let counts = [
            ("join tables", self.tables.len()),
            ("join field groups", self.field_groups.len()),
            ("join fields", self.join_fields.len()),
        ];
        for (what, got) in counts {
            if got != JOIN_ARITY {
                return Err(DbError::arity(what, JOIN_ARITY, got));
            }
        }
        Ok(())
    }

    pub fn build(&self) -> DbResult<Statement> {
        self.check_arity()?;

        let qualified: Vec<String> = self
            .tables
            .iter()
            .zip(&self.field_groups)
            .flat_map(|(table, group)| group.iter().map(move |f| format!("{table}.{f}")))
            .collect();
        if qualified.is_empty() {
            return Err(DbError::validation("join requires at least one selected field"));
        }

        let (t0, t1) = (&self.tables[0], &self.tables[1]);
        let (k0, k1) = (&self.join_fields[0], &self.join_fields[1]);
        let mut sql = format!(
            "SELECT {} FROM {t0} LEFT JOIN {t1} ON ({t0}.{k0} = {t1}.{k1})",
            qualified.join(",")
        );
        let (where_sql, params) = build_where(self.filter.as_ref());
        push_clause(&mut sql, &where_sql);
        push_clause(&mut sql, &build_order(self.order.as_ref()));
        push_clause(&mut sql, &build_limit(self.limit));
        push_clause(&mut sql, &build_offset(self.offset));
        Ok(Statement::new(StatementKind::Select, sql, params))
    }
}

impl ToStatement for Join {
    fn to_statement(&self) -> DbResult<Statement> {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_basic_join() {
        let stmt = Join::new(["t1", "t2"], [vec!["a"], vec!["b"]], ["k1", "k2"])
            .build()
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT t1.a,t2.b FROM t1 LEFT JOIN t2 ON (t1.k1 = t2.k2)"
        );
        assert!(stmt.params().is_empty());
    }

    #[test]
    fn test_join_with_clauses() {
        let stmt = Join::new(
            ["users", "orders"],
            [vec!["id", "name"], vec!["total"]],
            ["id", "user_id"],
        )
        .filter(WhereClause::new("orders.total > ?", params![100]))
        .order(OrderSpec::desc("orders.total"))
        .limit(5)
        .build()
        .unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT users.id,users.name,orders.total FROM users LEFT JOIN orders \
             ON (users.id = orders.user_id) WHERE orders.total > ? ORDER BY orders.total DESC LIMIT 5"
        );
        assert_eq!(stmt.params(), params![100].as_slice());
    }

    #[test]
    fn test_one_side_may_select_nothing() {
        let empty: Vec<&str> = Vec::new();
        let stmt = Join::new(["a", "b"], [vec!["x"], empty], ["id", "a_id"])
            .build()
            .unwrap();
        assert!(stmt.sql().starts_with("SELECT a.x FROM a LEFT JOIN b"));
    }

    #[test]
    fn test_no_fields_is_rejected() {
        let empty: Vec<&str> = Vec::new();
        let err = Join::new(["a", "b"], [empty.clone(), empty], ["id", "a_id"])
            .build()
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[test]
    fn test_arity_errors() {
        let three_tables = Join::new(["a", "b", "c"], [vec!["x"], vec!["y"]], ["k", "k"]);
        assert!(matches!(
            three_tables.build(),
            Err(DbError::Arity { what: "join tables", expected: 2, got: 3 })
        ));

        let one_group = Join::new(["a", "b"], [vec!["x"]], ["k", "k"]);
        assert!(matches!(
            one_group.build(),
            Err(DbError::Arity { what: "join field groups", got: 1, .. })
        ));

        let no_keys = Join::new(["a", "b"], [vec!["x"], vec!["y"]], Vec::<String>::new());
        assert!(matches!(
            no_keys.build(),
            Err(DbError::Arity { what: "join fields", got: 0, .. })
        ));
    }
}
