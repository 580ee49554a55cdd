//! Error types for directive registry loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for registry operations.
pub type DirectiveResult<T> = Result<T, DirectiveError>;

/// Registry load failures. All of them are fatal: no partial registry is exposed.
#[derive(Debug, Error)]
pub enum DirectiveError {
    #[error("structural integrity error in `{field}`: {message}")]
    StructuralIntegrity { field: String, message: String },

    #[error("invalid rule table at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    Parse { line: Option<usize>, message: String },

    #[error("failed to read rule table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DirectiveError {
    pub(crate) fn integrity(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StructuralIntegrity {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::integrity(field, "required field is missing")
    }
}

impl From<serde_yaml::Error> for DirectiveError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse {
            line: err.location().map(|l| l.line()),
            message: err.to_string(),
        }
    }
}
