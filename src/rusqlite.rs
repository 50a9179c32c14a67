use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use tracing::debug;

use crate::backend::{Backend, ExecResult};
use crate::error::Result;
use crate::row::Row;
use crate::value::Value;

/// SQLite adapter over a `rusqlite` connection.
///
/// Where the `sqlx` adapter prepares and binds through a pool, this
/// one follows the synchronous exec-with-positional-array convention:
/// one connection behind a mutex, the flat argument list passed to
/// each call. The driver never suspends, so no lock is held across an
/// await point.
pub struct RusqliteBackend {
    conn: Mutex<Connection>,
}

impl RusqliteBackend {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Integer(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::Real(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
        })
    }
}

impl From<SqlValue> for Value {
    fn from(v: SqlValue) -> Self {
        match v {
            SqlValue::Null => Value::Null,
            SqlValue::Integer(i) => Value::Integer(i),
            SqlValue::Real(r) => Value::Real(r),
            SqlValue::Text(t) => Value::Text(t),
            SqlValue::Blob(b) => Value::Blob(b),
        }
    }
}

fn fetch(conn: &Connection, sql: &str, args: &[Value], limit: Option<usize>) -> Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let names: Vec<String> = stmt.column_names().iter().map(|s| (*s).to_owned()).collect();
    let mut rows = stmt.query(params_from_iter(args))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut mapped = Row::new();
        for (index, name) in names.iter().enumerate() {
            let value: SqlValue = row.get(index)?;
            mapped.push(name.clone(), Value::from(value));
        }
        out.push(mapped);
        if limit.is_some_and(|l| out.len() >= l) {
            break;
        }
    }
    Ok(out)
}

#[async_trait]
impl Backend for RusqliteBackend {
    async fn fetch_one(&self, sql: &str, args: &[Value]) -> Result<Option<Row>> {
        debug!(sql, "fetch_one");
        let conn = self.lock();
        Ok(fetch(&conn, sql, args, Some(1))?.into_iter().next())
    }

    async fn fetch_all(&self, sql: &str, args: &[Value]) -> Result<Vec<Row>> {
        debug!(sql, "fetch_all");
        let conn = self.lock();
        fetch(&conn, sql, args, None)
    }

    async fn execute(&self, sql: &str, args: &[Value]) -> Result<ExecResult> {
        debug!(sql, "execute");
        let conn = self.lock();
        let rows_affected = conn.execute(sql, params_from_iter(args))? as u64;
        let last_insert_id = conn.last_insert_rowid();
        Ok(ExecResult {
            rows_affected,
            last_insert_id: (last_insert_id != 0).then_some(last_insert_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> RusqliteBackend {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE account (
                pk INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                display_name TEXT NOT NULL,
                email TEXT
            )",
        )
        .unwrap();
        RusqliteBackend::new(conn)
    }

    #[tokio::test]
    async fn test_execute_reports_affected_rows() {
        let backend = backend();
        let result = backend
            .execute(
                "INSERT INTO account (id, display_name, email) VALUES (?1, ?2, ?3)",
                &[Value::from("u1"), Value::from("Ann"), Value::Null],
            )
            .await
            .unwrap();
        assert_eq!(result.rows_affected, 1);
        assert_eq!(result.last_insert_id, Some(1));
    }

    #[tokio::test]
    async fn test_fetch_one_preserves_storage_classes() {
        let backend = backend();
        backend
            .execute(
                "INSERT INTO account (id, display_name, email) VALUES (?1, ?2, ?3)",
                &[Value::from("u1"), Value::from("Ann"), Value::Null],
            )
            .await
            .unwrap();

        let row = backend
            .fetch_one(
                "SELECT pk, id, display_name, email FROM account WHERE id = ?1",
                &[Value::from("u1")],
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.i64("pk").unwrap(), 1);
        assert_eq!(row.text("display_name").unwrap(), "Ann");
        assert_eq!(row.opt_text("email").unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_one_absent_is_none() {
        let backend = backend();
        let row = backend
            .fetch_one(
                "SELECT pk FROM account WHERE id = ?1",
                &[Value::from("missing")],
            )
            .await
            .unwrap();
        assert!(row.is_none());
    }
}
