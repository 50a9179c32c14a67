//! # querybind
//!
//! The runtime under generated, typed SQL operations: positional parameter
//! binding, runtime IN-list expansion, and typed row mapping over pluggable
//! backends.
//!
//! Code generators that compile SQL templates into one function per named
//! query all need the same three mechanisms at runtime, and this crate is
//! those mechanisms:
//!
//! - **Slice expansion**: a template's `(/*SLICE:name*/?)` marker becomes
//!   `(?2, ?3, ?4)` once the list length is known, with every later ordinal
//!   shifted so the statement stays consistent
//! - **Positional binding**: declared parameters flatten into the ordered
//!   argument list the statement expects, nulls bound explicitly
//! - **Row mapping**: raw rows come back keyed by storage column name and map
//!   into your result structs through a declared correspondence, preserving
//!   NULL and full 64-bit integer width
//! - **Backend adapters**: one narrow [`Backend`] trait with the three call
//!   shapes every operation needs; `sqlx` SQLite built in, `rusqlite` behind
//!   a feature flag
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sqlx = { version = "0.8", features = ["sqlite", "runtime-tokio"] }
//! querybind = "0.1"
//! ```
//!
//! ## Examples
//!
//! ### A generated operation, end to end
//!
//! ```rust,no_run
//! use querybind::{FromRow, QueryAs, Result, Row, SqliteBackend};
//! use sqlx::sqlite::SqlitePool;
//!
//! const GET_ACCOUNT: &str = "-- name: GetAccount :one
//! SELECT pk, id, display_name, email FROM account WHERE id = ?1";
//!
//! pub struct AccountRow {
//!     pub pk: i64,
//!     pub id: String,
//!     pub display_name: String,
//!     pub email: Option<String>,
//! }
//!
//! impl FromRow for AccountRow {
//!     fn from_row(row: &Row) -> Result<Self> {
//!         Ok(Self {
//!             pk: row.i64("pk")?,
//!             id: row.text("id")?,
//!             display_name: row.text("display_name")?,
//!             email: row.opt_text("email")?,
//!         })
//!     }
//! }
//!
//! pub async fn get_account(
//!     backend: &SqliteBackend,
//!     account_id: &str,
//! ) -> Result<Option<AccountRow>> {
//!     QueryAs::new(GET_ACCOUNT).bind(account_id).fetch_one(backend).await
//! }
//!
//! # async fn example() -> Result<()> {
//! let pool = SqlitePool::connect("sqlite::memory:").await?;
//! let backend = SqliteBackend::new(pool);
//!
//! match get_account(&backend, "u1").await? {
//!     Some(account) => println!("{}", account.display_name),
//!     None => println!("no such account"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### IN-lists whose length is known at call time
//!
//! SQLite cannot bind an array to one placeholder, so a query like
//! `WHERE id IN (...)` is compiled with a slice marker and expanded per
//! call:
//!
//! ```rust,no_run
//! use querybind::{QueryAs, Row, SqliteBackend};
//!
//! const LIST_BY_IDS: &str = "-- name: ListAccountsByIds :many
//! SELECT pk, id, display_name, email FROM account WHERE id IN (/*SLICE:ids*/?)";
//!
//! # async fn example(backend: &SqliteBackend) -> querybind::Result<()> {
//! // Executes: ... WHERE id IN (?1, ?2, ?3)
//! let rows: Vec<Row> = QueryAs::new(LIST_BY_IDS)
//!     .bind_slice("ids", ["a", "b", "c"])
//!     .fetch_all(backend)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! An empty list is rejected with [`Error::InvalidArguments`] before the
//! backend is ever called.
//!
//! ### Mutations
//!
//! ```rust,no_run
//! use querybind::{Query, SqliteBackend};
//!
//! const CREATE_ACCOUNT: &str = "-- name: CreateAccount :exec
//! INSERT INTO account (id, display_name, email) VALUES (?1, ?2, ?3)";
//!
//! # async fn example(backend: &SqliteBackend) -> querybind::Result<()> {
//! let result = Query::new(CREATE_ACCOUNT)
//!     .bind("u2")
//!     .bind("Bo")
//!     .bind(None::<String>)   // nullable column, explicit NULL
//!     .execute(backend)
//!     .await?;
//! assert_eq!(result.rows_affected, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## How It Works
//!
//! Each operation call runs the same three-step pipeline:
//!
//! 1. **Bind**: declared parameters flatten in order into one argument
//!    list; each slice parameter expands the template exactly once, at the
//!    ordinal its declared position dictates
//! 2. **Execute**: the single suspension point — the statement and flat
//!    argument list go to the configured [`Backend`] adapter
//! 3. **Map**: only after the call resolves, raw rows map through
//!    [`FromRow`] into the result type, column by declared column
//!
//! Expansion is a pure function of template and length, so backends that
//! cache prepared statements by text see one entry per list length.
//!
//! ## Error kinds
//!
//! - [`Error::InvalidArguments`]: an empty slice; the backend is never
//!   touched
//! - [`Error::Backend`] (and `Error::Rusqlite` with the `rusqlite`
//!   feature): the backend call failed; propagated unchanged, no retry
//! - [`Error::MissingColumn`] / [`Error::ColumnType`]: the declared
//!   mapping and the statement have drifted apart; a programming error,
//!   distinct from backend failure
//!
//! ## Limitations
//!
//! - Placeholders are ordinal (`?1`, `?2`, …); unnumbered `?` is not
//!   supported
//! - Transactions, retries, and timeouts belong to the caller and the
//!   connection, not to this layer

pub mod backend;
pub mod bind;
pub mod error;
pub mod expand;
pub mod query;
pub mod query_as;
pub mod row;
pub mod sqlite;
pub mod value;

#[cfg(feature = "rusqlite")]
pub mod rusqlite;

pub use backend::{Backend, ExecResult};
pub use bind::{BoundStatement, Param};
pub use error::{Error, Result};
pub use query::Query;
pub use query_as::QueryAs;
pub use row::{FromRow, Row};
pub use sqlite::SqliteBackend;
pub use value::Value;

#[cfg(feature = "rusqlite")]
pub use crate::rusqlite::RusqliteBackend;

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::backend::{Backend, ExecResult};
    pub use crate::error::{Error, Result};
    pub use crate::row::{FromRow, Row};
    pub use crate::value::Value;
    pub use crate::Query;
    pub use crate::QueryAs;
}
