//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZerotraceConfig {
    /// Artifact build configuration.
    pub build: BuildConfig,
    /// Directive registry selection.
    pub registry: RegistryConfig,
}

/// Where `zerotrace build` writes its artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory for generated directive variants (`<dir>/prompts/*.txt`).
    pub output_dir: PathBuf,
    /// Directory for integration documents (`<dir>/integrations/*.md`).
    pub templates_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            templates_dir: PathBuf::from("templates"),
        }
    }
}

/// Directive registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Alternate directive set (YAML). The built-in set is used when unset.
    pub path: Option<PathBuf>,
    /// Reject configurations whose emphasis has no suffix fragment.
    pub strict_emphasis: bool,
}
