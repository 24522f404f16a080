//! Typed query parameters and binding onto sqlx queries.

use crate::filter::FieldValue;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value that can be bound to a PostgreSQL query. Status values travel as text and are cast in SQL.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Text(Option<String>),
    Int(Option<i32>),
    Float(Option<f64>),
}

impl From<FieldValue> for PgBindValue {
    fn from(v: FieldValue) -> Self {
        match v {
            FieldValue::Text(s) => PgBindValue::Text(Some(s)),
            FieldValue::Status(s) => PgBindValue::Text(Some(s.as_str().to_string())),
            FieldValue::Integer(n) => PgBindValue::Int(Some(n)),
            FieldValue::Float(n) => PgBindValue::Float(Some(n)),
        }
    }
}

/// Bind params in order ($1, $2, ...).
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[PgBindValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            PgBindValue::Text(v) => query.bind(v.clone()),
            PgBindValue::Int(v) => query.bind(*v),
            PgBindValue::Float(v) => query.bind(*v),
        };
    }
    query
}
