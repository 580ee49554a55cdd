//! Configuration file loading and parsing.

use crate::env::apply_env_overrides;
use crate::types::ZerotraceConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Config directory inside a project.
pub const CONFIG_DIR: &str = ".zerotrace";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env var pattern is a valid regex")
    })
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the config file this loader reads.
    pub fn config_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from `.zerotrace/config.yaml`, falling back to defaults.
    ///
    /// Environment overrides are applied on top in both cases.
    pub fn load(&self) -> Result<ZerotraceConfig, ConfigError> {
        let config_path = self.config_path();

        let config = if config_path.exists() {
            self.read(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            ZerotraceConfig::default()
        };

        let config = apply_env_overrides(config)?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Load an explicit config file. Unlike [`ConfigLoader::load`], a missing file is an error.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ZerotraceConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let config = apply_env_overrides(self.read(path)?)?;
        self.validate(&config)?;
        Ok(config)
    }

    fn read(&self, path: &Path) -> Result<ZerotraceConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let expanded = self.expand_env_vars(&contents)?;

        serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in env_var_pattern().captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &ZerotraceConfig) -> Result<(), ConfigError> {
        if config.build.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "build.output_dir must not be empty".to_string(),
            });
        }

        if config.build.templates_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "build.templates_dir must not be empty".to_string(),
            });
        }

        if let Some(path) = &config.registry.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "registry.path must not be empty when set".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Save configuration to `.zerotrace/config.yaml`.
    pub fn save(&self, config: &ZerotraceConfig) -> Result<(), ConfigError> {
        let config_dir = self.base_path.join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir)?;

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(config_dir.join(CONFIG_FILE), yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}
