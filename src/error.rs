/// Error types for querybind
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error during SQL template parsing
    #[error("Failed to parse SQL template: {0}")]
    Parse(#[from] regex::Error),

    /// A declared parameter received a value it cannot bind.
    ///
    /// Raised before any backend call; the backend is never touched.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A declared slice marker is missing from the SQL template.
    ///
    /// This indicates drift between the template and its declared
    /// parameters, not a runtime condition.
    #[error("Template has no slice marker for parameter '{0}'")]
    MissingSliceMarker(String),

    /// Error from SQLx database operations, propagated unchanged
    #[error("Database error: {0}")]
    Backend(#[from] sqlx::Error),

    /// Error from rusqlite database operations, propagated unchanged
    #[cfg(feature = "rusqlite")]
    #[error("Database error: {0}")]
    Rusqlite(#[from] rusqlite::Error),

    /// A raw row is missing a column the declared mapping expects
    #[error("Row has no column '{0}'")]
    MissingColumn(String),

    /// A column's storage class does not match the declared mapping
    #[error("Column '{column}' cannot be read as {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },
}

/// Result type alias for querybind operations
pub type Result<T> = std::result::Result<T, Error>;
