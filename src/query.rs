use crate::backend::{Backend, ExecResult};
use crate::bind::{bind, Param};
use crate::error::Result;
use crate::value::Value;

/// Builder for the mutation shape of a generated operation.
///
/// A `Query` pairs one immutable SQL template with the declared
/// parameters for a single invocation. Parameters are bound in
/// declared order with [`bind`](Query::bind) and
/// [`bind_slice`](Query::bind_slice); [`execute`](Query::execute)
/// flattens them, expands any slice markers, and runs the statement.
///
/// The result is the backend's acknowledgement only. A mutation façade
/// never surfaces row content, even when the underlying statement has
/// a RETURNING clause; use [`QueryAs`](crate::QueryAs) for statements
/// whose rows matter.
///
/// # Examples
///
/// ```rust,no_run
/// use querybind::{Query, SqliteBackend};
///
/// # async fn example(backend: &SqliteBackend) -> querybind::Result<()> {
/// let result = Query::new(
///     "INSERT INTO account (id, display_name, email) VALUES (?1, ?2, ?3)",
/// )
/// .bind("u2")
/// .bind("Bo")
/// .bind(None::<String>)
/// .execute(backend)
/// .await?;
///
/// assert_eq!(result.rows_affected, 1);
/// # Ok(())
/// # }
/// ```
pub struct Query {
    template: String,
    params: Vec<Param>,
}

impl Query {
    /// Creates a builder over an SQL template with ordinal
    /// placeholders and, optionally, `(/*SLICE:name*/?)` markers.
    pub fn new<T>(template: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            template: template.into(),
            params: Vec::new(),
        }
    }

    /// Binds the next declared parameter as a scalar.
    ///
    /// `Option::None` binds an explicit NULL.
    #[must_use]
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(Param::Scalar(value.into()));
        self
    }

    /// Binds the next declared parameter as a variable-arity list for
    /// the template's `(/*SLICE:name*/?)` marker.
    ///
    /// Elements are bound in the iterator's order. An empty list is
    /// rejected with `InvalidArguments` at execution, before the
    /// backend is touched; an IN-list over nothing is a predicate the
    /// caller has to special-case, not a statement.
    #[must_use]
    pub fn bind_slice<I>(mut self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.params.push(Param::Slice {
            name,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Param>) {
        (self.template, self.params)
    }

    /// Binds, expands, and executes the statement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` for an empty slice (backend never
    /// called), or the backend's error propagated unchanged.
    pub async fn execute<B>(self, backend: &B) -> Result<ExecResult>
    where
        B: Backend + ?Sized,
    {
        let (template, params) = self.into_parts();
        let stmt = bind(&template, params)?;
        backend.execute(&stmt.sql, &stmt.args).await
    }
}
