use std::marker::PhantomData;

use crate::backend::Backend;
use crate::bind::bind;
use crate::error::Result;
use crate::query::Query;
use crate::row::{map_rows, FromRow};
use crate::value::Value;

/// Builder for the fetch shapes of a generated operation, returning
/// rows mapped into `R`.
///
/// `QueryAs` shares [`Query`]'s binding surface and adds the two fetch
/// shapes: [`fetch_one`](QueryAs::fetch_one) for statements expected
/// to return at most one row, and [`fetch_all`](QueryAs::fetch_all)
/// for ordered result lists. Mapping runs only after the backend call
/// has fully resolved, so an abandoned call never observes a partially
/// mapped row.
///
/// # Examples
///
/// ```rust,no_run
/// use querybind::{FromRow, QueryAs, Result, Row, SqliteBackend};
///
/// struct Account {
///     pk: i64,
///     id: String,
///     display_name: String,
///     email: Option<String>,
/// }
///
/// impl FromRow for Account {
///     fn from_row(row: &Row) -> Result<Self> {
///         Ok(Self {
///             pk: row.i64("pk")?,
///             id: row.text("id")?,
///             display_name: row.text("display_name")?,
///             email: row.opt_text("email")?,
///         })
///     }
/// }
///
/// # async fn example(backend: &SqliteBackend) -> querybind::Result<()> {
/// let account = QueryAs::<Account>::new(
///     "SELECT pk, id, display_name, email FROM account WHERE id = ?1",
/// )
/// .bind("u1")
/// .fetch_one(backend)
/// .await?;
///
/// match account {
///     Some(account) => println!("{} ({})", account.display_name, account.pk),
///     None => println!("not found"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct QueryAs<R> {
    inner: Query,
    _pd: PhantomData<R>,
}

impl<R> QueryAs<R>
where
    R: FromRow,
{
    /// Creates a builder over an SQL template with ordinal
    /// placeholders and, optionally, `(/*SLICE:name*/?)` markers.
    pub fn new<T>(template: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            inner: Query::new(template),
            _pd: PhantomData,
        }
    }

    /// Binds the next declared parameter as a scalar.
    #[must_use]
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.inner = self.inner.bind(value);
        self
    }

    /// Binds the next declared parameter as a variable-arity list.
    #[must_use]
    pub fn bind_slice<I>(mut self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.inner = self.inner.bind_slice(name, values);
        self
    }

    /// Executes the statement and maps at most one row.
    ///
    /// `None` means the backend returned no row. A row whose columns
    /// are all NULL still maps to `Some`; absence and null fields are
    /// distinct outcomes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` for an empty slice (backend never
    /// called), the backend's error unchanged, or a mapping error when
    /// the row does not match `R`'s declared columns.
    pub async fn fetch_one<B>(self, backend: &B) -> Result<Option<R>>
    where
        B: Backend + ?Sized,
    {
        let (template, params) = self.inner.into_parts();
        let stmt = bind(&template, params)?;
        let row = backend.fetch_one(&stmt.sql, &stmt.args).await?;
        row.as_ref().map(R::from_row).transpose()
    }

    /// Executes the statement and maps every row, preserving backend
    /// return order. An empty result maps to an empty vector.
    ///
    /// # Errors
    ///
    /// Same kinds as [`fetch_one`](QueryAs::fetch_one).
    pub async fn fetch_all<B>(self, backend: &B) -> Result<Vec<R>>
    where
        B: Backend + ?Sized,
    {
        let (template, params) = self.inner.into_parts();
        let stmt = bind(&template, params)?;
        let rows = backend.fetch_all(&stmt.sql, &stmt.args).await?;
        map_rows(rows)
    }
}
