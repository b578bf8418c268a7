//! Error types for cql-grammar.

use thiserror::Error;

/// The main error type for compiling, binding and rewriting statements.
#[derive(Debug, Error)]
pub enum CqlError {
    /// Collection tag is not one of set, list or map.
    #[error("Invalid collection kind: '{0}'. Expected one of: set, list, map")]
    InvalidCollectionKind(String),

    /// Descriptor is missing what the requested operation needs.
    #[error("Malformed descriptor: {0}")]
    MalformedDescriptor(String),

    /// The statement has more `?` markers than bound values.
    #[error("Binding count mismatch: {placeholders} placeholder(s) but only {values} value(s)")]
    BindingCountMismatch { placeholders: usize, values: usize },

    /// No `from` or `update` clause names a table.
    #[error("Unable to find table name in the query: {0}")]
    TableNameNotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON descriptor could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CqlError {
    /// Create a malformed descriptor error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDescriptor(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for cql-grammar operations.
pub type CqlResult<T> = Result<T, CqlError>;
