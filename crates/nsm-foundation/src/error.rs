//! Error handling for the nsmigrate workspace

use thiserror::Error;

/// Core error type used throughout the migration engine
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MigrateError {
    /// Two identifiers in one file derived two different non-empty
    /// namespaces. A migrated file carries exactly one namespace, so this
    /// must be fixed manually in the offending file.
    #[error("two namespaces derived for {file}: {first} vs {second}")]
    AmbiguousNamespace {
        file: String,
        first: String,
        second: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MigrateError {
    /// Create a new ambiguous-namespace error
    pub fn ambiguous_namespace(
        file: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::AmbiguousNamespace {
            file: file.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type MigrateResult<T> = Result<T, MigrateError>;
