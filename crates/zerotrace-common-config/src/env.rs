//! Environment variable handling.

use crate::loader::ConfigError;
use crate::types::ZerotraceConfig;
use std::env;
use std::path::PathBuf;

/// Environment variable names.
pub mod vars {
    /// Explicit config file path (also bound to `--config`).
    pub const ZEROTRACE_CONFIG: &str = "ZEROTRACE_CONFIG";
    /// Overrides `build.output_dir`.
    pub const ZEROTRACE_OUTPUT_DIR: &str = "ZEROTRACE_OUTPUT_DIR";
    /// Overrides `build.templates_dir`.
    pub const ZEROTRACE_TEMPLATES_DIR: &str = "ZEROTRACE_TEMPLATES_DIR";
    /// Overrides `registry.path`.
    pub const ZEROTRACE_REGISTRY: &str = "ZEROTRACE_REGISTRY";
    /// Overrides `registry.strict_emphasis`.
    pub const ZEROTRACE_STRICT_EMPHASIS: &str = "ZEROTRACE_STRICT_EMPHASIS";
}

/// Load `.env` and `.env.local` from the working directory, if present.
///
/// Variables already set in the process environment win.
pub fn load_dotenv() {
    for file in [".env", ".env.local"] {
        match dotenvy::from_filename(file) {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded env file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(file, error = %e, "ignoring unreadable env file"),
        }
    }
}

/// Apply `ZEROTRACE_*` overrides from the process environment.
pub fn apply_env_overrides(config: ZerotraceConfig) -> Result<ZerotraceConfig, ConfigError> {
    apply_overrides_from(config, |var| env::var(var).ok())
}

/// Apply overrides using an arbitrary variable lookup.
pub fn apply_overrides_from<F>(
    mut config: ZerotraceConfig,
    lookup: F,
) -> Result<ZerotraceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(vars::ZEROTRACE_OUTPUT_DIR) {
        config.build.output_dir = PathBuf::from(dir);
    }

    if let Some(dir) = lookup(vars::ZEROTRACE_TEMPLATES_DIR) {
        config.build.templates_dir = PathBuf::from(dir);
    }

    if let Some(path) = lookup(vars::ZEROTRACE_REGISTRY) {
        config.registry.path = Some(PathBuf::from(path));
    }

    if let Some(strict) = lookup(vars::ZEROTRACE_STRICT_EMPHASIS) {
        config.registry.strict_emphasis = parse_bool(&strict).ok_or_else(|| {
            ConfigError::ValidationError {
                message: format!(
                    "{} must be a boolean, got {strict:?}",
                    vars::ZEROTRACE_STRICT_EMPHASIS
                ),
            }
        })?;
    }

    Ok(config)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
