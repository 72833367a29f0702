//! Catalog access error types.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while reading catalog metadata.
///
/// A requested object that does not exist is never an error: lookups
/// return an entity with empty fields instead.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The provider failed to execute a catalog statement.
    #[error("catalog query failed: {message}")]
    QueryFailed {
        /// Statement that failed.
        sql: String,
        /// Provider-reported reason.
        message: String,
    },

    /// A result row has no column with this label.
    #[error("column not found in result set: {0}")]
    ColumnNotFound(String),

    /// A column value could not be read as the requested type.
    #[error("invalid value in column {column}: {message}")]
    InvalidValue {
        /// Column label.
        column: String,
        /// What went wrong.
        message: String,
    },

    /// The connection is unusable.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CatalogError {
    /// Create a query failure for a statement.
    pub fn query_failed(sql: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueryFailed {
            sql: sql.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-value error for a column.
    pub fn invalid_value(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from the data-access layer rather than
    /// from the request itself.
    pub fn is_data_access(&self) -> bool {
        !matches!(self, Self::InvalidRequest(_))
    }
}
