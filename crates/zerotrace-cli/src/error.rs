//! CLI error handling and formatting.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use console::style;
use thiserror::Error;
use zerotrace_common_config::ConfigError;
use zerotrace_directive::DirectiveError;

use crate::cli::OutputFormat;

/// CLI error type with rich context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    #[error("{failed} of {total} test(s) failed")]
    TestFailures { failed: usize, total: usize },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::TestFailures { .. } => "E006",
            Self::User { .. } => "E010",
            Self::Other(_) => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        let code = match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Validation { .. } => 5,
            Self::NotFound { .. } => 6,
            Self::TestFailures { .. } => 1,
            Self::User { .. } => 1,
            Self::Other(_) => 1,
        };
        ExitCode::from(code)
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::User { hint, .. } => hint.as_deref(),
            Self::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                Some("See suggestions below")
            }
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(
        message: impl Into<String>,
        source: io::Error,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: Some(path.into()),
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a user error with hint
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Print this error to stderr in the requested format
    pub fn report(&self, format: OutputFormat) {
        match format {
            OutputFormat::Json => eprintln!("{}", self.format_json()),
            OutputFormat::Text => eprintln!("{}", self.format_text()),
        }
    }

    fn format_text(&self) -> String {
        let mut output = format!(
            "{} {self}",
            style(format!("error[{}]:", self.code())).red().bold()
        );

        if let Self::Io { path: Some(path), .. } = self {
            output.push_str(&format!("\n  {} {}", style("path:").dim(), path.display()));
        }

        if let Some(hint) = self.hint() {
            output.push_str(&format!("\n\n{} {hint}", style("hint:").cyan().bold()));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n\n{}", style("suggestions:").yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("\n  - {suggestion}"));
            }
        }

        output
    }

    fn format_json(&self) -> String {
        let json = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "hint": self.hint(),
                "suggestions": self.suggestions(),
            }
        });

        serde_json::to_string_pretty(&json).unwrap_or_else(|_| self.to_string())
    }
}

// Conversion implementations
impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
            path: None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::anyhow!("JSON serialization failed: {err}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check .zerotrace/config.yaml".to_string()),
        }
    }
}

impl From<DirectiveError> for CliError {
    fn from(err: DirectiveError) -> Self {
        match err {
            DirectiveError::Io { path, source } => Self::Io {
                message: format!("failed to read directive set {}", path.display()),
                source,
                path: Some(path),
            },
            other => Self::Config {
                message: format!("Invalid directive set: {other}"),
                source: Some(Box::new(other)),
                hint: Some("Check the file named by registry.path".to_string()),
            },
        }
    }
}
