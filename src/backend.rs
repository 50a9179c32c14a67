use async_trait::async_trait;

use crate::error::Result;
use crate::row::Row;
use crate::value::Value;

/// Acknowledgement of a statement executed without fetching rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Number of rows the statement changed.
    pub rows_affected: u64,
    /// Rowid assigned by the last successful INSERT, when the backend
    /// reports one.
    pub last_insert_id: Option<i64>,
}

/// Execution contract every backend adapter implements.
///
/// Exactly three call shapes, matching the three façade shapes. The
/// statement text uses ordinal placeholders (`?1`, `?2`, …) and `args`
/// is bound strictly positionally. An adapter is chosen when the
/// connection is configured; nothing branches on the backend kind at
/// call time.
///
/// Adapters propagate their driver's errors unchanged and add no retry
/// and no timeout; both belong to the caller, which knows whether an
/// operation is idempotent.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Executes a statement expected to return at most one row.
    async fn fetch_one(&self, sql: &str, args: &[Value]) -> Result<Option<Row>>;

    /// Executes a statement and returns all rows in backend order.
    async fn fetch_all(&self, sql: &str, args: &[Value]) -> Result<Vec<Row>>;

    /// Executes a statement without fetching rows.
    async fn execute(&self, sql: &str, args: &[Value]) -> Result<ExecResult>;
}
