//! Error types for ZQLZ

use thiserror::Error;

/// Core error type for ZQLZ operations
#[derive(Error, Debug)]
pub enum ZqlzError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A catalog query failed while serving a metadata request for a data source.
    #[error("Data access error in '{data_source}': {message}")]
    DataAccess {
        data_source: String,
        message: String,
        #[source]
        source: Option<Box<ZqlzError>>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl ZqlzError {
    /// Wrap a lower-level failure as a data access error owned by `data_source`.
    ///
    /// Errors that already carry a data source are passed through untouched so
    /// nested helpers don't stack the same context twice.
    pub fn data_access(data_source: impl Into<String>, err: ZqlzError) -> Self {
        match err {
            already @ ZqlzError::DataAccess { .. } => already,
            other => ZqlzError::DataAccess {
                data_source: data_source.into(),
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }

    /// Name of the data source this error is scoped to, if any
    pub fn data_source(&self) -> Option<&str> {
        match self {
            ZqlzError::DataAccess { data_source, .. } => Some(data_source),
            _ => None,
        }
    }

    pub fn is_data_access(&self) -> bool {
        matches!(self, ZqlzError::DataAccess { .. })
    }
}

/// Result type alias for ZQLZ operations
pub type Result<T> = std::result::Result<T, ZqlzError>;
