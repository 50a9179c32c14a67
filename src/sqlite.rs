use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Column as _, Row as _, TypeInfo as _, ValueRef as _};
use tracing::debug;

use crate::backend::{Backend, ExecResult};
use crate::error::Result;
use crate::row::Row;
use crate::value::Value;

/// SQLite adapter over an `sqlx` connection pool.
///
/// Statements are prepared by the driver and arguments are bound one
/// by one with their native types, so the pool's prepared-statement
/// cache applies per expanded statement text.
#[derive(Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn bind_args<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    args: &'q [Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(v) => query.bind(*v),
            Value::Real(v) => query.bind(*v),
            Value::Text(v) => query.bind(v.as_str()),
            Value::Blob(v) => query.bind(v.as_slice()),
        };
    }
    query
}

/// Decodes one driver row into the storage-class representation.
///
/// The value's own storage class decides the variant, so an INTEGER
/// column comes back as `Value::Integer(i64)` with full width.
fn decode_row(row: &SqliteRow) -> Result<Row> {
    let mut out = Row::new();
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => Value::Integer(row.try_get(index)?),
                "REAL" => Value::Real(row.try_get(index)?),
                "BLOB" => Value::Blob(row.try_get(index)?),
                _ => Value::Text(row.try_get(index)?),
            }
        };
        out.push(column.name(), value);
    }
    Ok(out)
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn fetch_one(&self, sql: &str, args: &[Value]) -> Result<Option<Row>> {
        debug!(sql, "fetch_one");
        let row = bind_args(sqlx::query(sql), args)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(decode_row).transpose()
    }

    async fn fetch_all(&self, sql: &str, args: &[Value]) -> Result<Vec<Row>> {
        debug!(sql, "fetch_all");
        let rows = bind_args(sqlx::query(sql), args)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute(&self, sql: &str, args: &[Value]) -> Result<ExecResult> {
        debug!(sql, "execute");
        let result = bind_args(sqlx::query(sql), args)
            .execute(&self.pool)
            .await?;
        let last_insert_id = result.last_insert_rowid();
        Ok(ExecResult {
            rows_affected: result.rows_affected(),
            last_insert_id: (last_insert_id != 0).then_some(last_insert_id),
        })
    }
}
