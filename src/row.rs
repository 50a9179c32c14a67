use crate::error::{Error, Result};
use crate::value::Value;

/// One raw result row as returned by a backend: column names in the
/// statement's select order, values in storage representation.
///
/// Rows are transient; they exist only between the backend call
/// resolving and the [`FromRow`] mapping, and are consumed by it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. Backends push columns in select order;
    /// lookups take the first match.
    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.columns.push((column.into(), value));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Looks up a column by its storage name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] when the row has no such
    /// column. A missing column means the template and the declared
    /// mapping have drifted apart; it is not a recoverable condition.
    pub fn get(&self, column: &str) -> Result<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::MissingColumn(column.to_owned()))
    }

    /// Reads a NOT NULL 64-bit integer column.
    pub fn i64(&self, column: &str) -> Result<i64> {
        self.get(column)?.as_i64().ok_or_else(|| Error::ColumnType {
            column: column.to_owned(),
            expected: "i64",
        })
    }

    /// Reads a nullable 64-bit integer column; NULL maps to `None`.
    pub fn opt_i64(&self, column: &str) -> Result<Option<i64>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            value => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| Error::ColumnType {
                    column: column.to_owned(),
                    expected: "i64",
                }),
        }
    }

    pub fn f64(&self, column: &str) -> Result<f64> {
        self.get(column)?.as_f64().ok_or_else(|| Error::ColumnType {
            column: column.to_owned(),
            expected: "f64",
        })
    }

    pub fn opt_f64(&self, column: &str) -> Result<Option<f64>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            value => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| Error::ColumnType {
                    column: column.to_owned(),
                    expected: "f64",
                }),
        }
    }

    pub fn text(&self, column: &str) -> Result<String> {
        self.get(column)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| Error::ColumnType {
                column: column.to_owned(),
                expected: "text",
            })
    }

    pub fn opt_text(&self, column: &str) -> Result<Option<String>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            value => value
                .as_str()
                .map(|s| Some(s.to_owned()))
                .ok_or_else(|| Error::ColumnType {
                    column: column.to_owned(),
                    expected: "text",
                }),
        }
    }

    pub fn blob(&self, column: &str) -> Result<Vec<u8>> {
        self.get(column)?
            .as_blob()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| Error::ColumnType {
                column: column.to_owned(),
                expected: "blob",
            })
    }

    pub fn opt_blob(&self, column: &str) -> Result<Option<Vec<u8>>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            value => value
                .as_blob()
                .map(|b| Some(b.to_vec()))
                .ok_or_else(|| Error::ColumnType {
                    column: column.to_owned(),
                    expected: "blob",
                }),
        }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Maps one raw [`Row`] into a query's result type.
///
/// Implementations read each column by its storage name, following the
/// column-to-field correspondence fixed when the query was declared.
/// The mapping is pure: NULL becomes `None`, never a default value,
/// and a missing column surfaces as [`Error::MissingColumn`].
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(row.clone())
    }
}

/// Maps a list of raw rows in order, with no filtering.
pub fn map_rows<R: FromRow>(rows: Vec<Row>) -> Result<Vec<R>> {
    rows.iter().map(R::from_row).collect()
}
