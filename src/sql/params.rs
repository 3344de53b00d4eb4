//! Typed bind values for the player queries.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use uuid::Uuid;

/// A value bound to a positional `$n` placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Text(String),
    Uuid(Uuid),
    I64(i64),
    F64(f64),
}

impl From<&str> for PgBindValue {
    fn from(s: &str) -> Self {
        PgBindValue::Text(s.to_string())
    }
}

impl From<String> for PgBindValue {
    fn from(s: String) -> Self {
        PgBindValue::Text(s)
    }
}

impl From<Uuid> for PgBindValue {
    fn from(u: Uuid) -> Self {
        PgBindValue::Uuid(u)
    }
}

impl From<i64> for PgBindValue {
    fn from(n: i64) -> Self {
        PgBindValue::I64(n)
    }
}

impl From<f64> for PgBindValue {
    fn from(n: f64) -> Self {
        PgBindValue::F64(n)
    }
}

/// Binds params in placeholder order.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [PgBindValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            PgBindValue::Text(s) => query.bind(s.as_str()),
            PgBindValue::Uuid(u) => query.bind(*u),
            PgBindValue::I64(n) => query.bind(*n),
            PgBindValue::F64(n) => query.bind(*n),
        };
    }
    query
}
