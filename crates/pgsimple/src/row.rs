//! Decoded result rows and row mapping traits

use crate::error::{DbError, DbResult};
use crate::value::{FromValue, Value};
use std::sync::Arc;

/// One result row: column names shared with its result set, plus values.
///
/// Supports the access styles callers expect from a cursor: by position,
/// by column name, and as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row. `values` must line up with `columns`.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Decode a driver row into values.
    pub fn from_pg(columns: Arc<[String]>, row: &tokio_postgres::Row) -> DbResult<Self> {
        let values = (0..row.len())
            .map(|i| {
                row.try_get::<_, Value>(i)
                    .map_err(|e| DbError::decode(columns[i].as_str(), e.to_string()))
            })
            .collect::<DbResult<Vec<_>>>()?;
        Ok(Self::new(columns, values))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    pub fn get_index(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Typed access by column name.
    pub fn try_get<T: FromValue>(&self, column: &str) -> DbResult<T> {
        let value = self
            .get(column)
            .ok_or_else(|| DbError::decode(column, "no such column"))?;
        T::from_value(value).map_err(|message| DbError::decode(column, message))
    }

    /// Typed access by position.
    pub fn try_get_index<T: FromValue>(&self, idx: usize) -> DbResult<T> {
        let column = self
            .columns
            .get(idx)
            .map_or_else(|| format!("#{idx}"), Clone::clone);
        let value = self
            .values
            .get(idx)
            .ok_or_else(|| DbError::decode(column.as_str(), "column index out of range"))?;
        T::from_value(value).map_err(|message| DbError::decode(column, message))
    }

    /// The row as a JSON object keyed by column name.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .columns
            .iter()
            .zip(&self.values)
            .map(|(name, value)| {
                let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                (name.clone(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Trait for converting a result row into a Rust type.
///
/// # Example
///
/// ```ignore
/// use pgsimple::{DbResult, FromRow, Row};
///
/// struct User {
///     id: i64,
///     name: String,
///     email: Option<String>,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &Row) -> DbResult<Self> {
///         Ok(Self {
///             id: row.try_get("id")?,
///             name: row.try_get("name")?,
///             email: row.try_get("email")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> DbResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(row.clone())
    }
}

impl FromRow for serde_json::Value {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(row.to_json())
    }
}

macro_rules! impl_from_row_tuple {
    ($($idx:tt => $ty:ident),+) => {
        impl<$($ty: FromValue),+> FromRow for ($($ty,)+) {
            fn from_row(row: &Row) -> DbResult<Self> {
                Ok(($(row.try_get_index::<$ty>($idx)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(0 => A);
impl_from_row_tuple!(0 => A, 1 => B);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C);
impl_from_row_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
