//! Info command implementation.

use std::fmt::Write;

use clap::Parser;
use serde::Serialize;
use zerotrace_directive::Registry;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, IconContext};

const CORE_COMPONENTS: [&str; 5] = [
    "Verification protocols",
    "Labeling system",
    "Style humanization",
    "Anti-detection measures",
    "Correction protocols",
];

const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");

const SUPPORTED_MODELS: [&str; 3] = [
    "ChatGPT (GPT-3.5, GPT-4)",
    "Claude (Claude 1, 2 and 3)",
    "Other instruction-following models",
];

/// Show framework information and statistics
#[derive(Debug, Parser)]
pub struct InfoCommand {}

#[derive(Debug, Serialize)]
struct ConfigurationInfo {
    key: String,
    name: String,
    emphasis: String,
    modifiers: String,
}

#[derive(Debug, Serialize)]
struct FrameworkInfo {
    version: String,
    directive_length: usize,
    short_length: usize,
    core_components: Vec<&'static str>,
    supported_models: Vec<&'static str>,
    configurations: Vec<ConfigurationInfo>,
    repository: &'static str,
    #[serde(skip)]
    icons: IconContext,
}

impl FrameworkInfo {
    fn new(registry: &Registry, icons: IconContext) -> Self {
        Self {
            version: registry.version().to_string(),
            directive_length: registry.canonical().char_len(),
            short_length: registry.short().char_len(),
            core_components: CORE_COMPONENTS.to_vec(),
            supported_models: SUPPORTED_MODELS.to_vec(),
            configurations: registry
                .configurations()
                .iter()
                .map(|c| ConfigurationInfo {
                    key: c.key.clone(),
                    name: c.display_name.clone(),
                    emphasis: c.emphasis.to_string(),
                    modifiers: c.modifier_note.clone(),
                })
                .collect(),
            repository: REPOSITORY,
            icons,
        }
    }
}

impl FormattedOutput for FrameworkInfo {
    fn format_text(&self) -> String {
        let mut out = String::new();
        writeln!(out, "Version: {}", self.version).ok();
        writeln!(out, "Directive length: {} characters", self.directive_length).ok();
        writeln!(out, "Short variant length: {} characters", self.short_length).ok();

        out.push_str("\nCore components:\n");
        for component in &self.core_components {
            writeln!(out, "  {} {component}", self.icons.check()).ok();
        }

        out.push_str("\nSupported models:\n");
        for model in &self.supported_models {
            writeln!(out, "  {} {model}", self.icons.bullet()).ok();
        }

        out.push_str("\nConfigurations:\n");
        for c in &self.configurations {
            writeln!(out, "  {:<10} {} ({})", c.key, c.name, c.emphasis).ok();
        }

        writeln!(out, "\nRepository: {}", self.repository).ok();

        out.trim_end().to_string()
    }
}

impl InfoCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let registry = ctx.registry()?;
        let info = FrameworkInfo::new(&registry, IconContext::new());
        print_output(ctx, &info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_text() {
        let registry = Registry::builtin().unwrap();
        let info = FrameworkInfo::new(&registry, IconContext::ascii());
        let text = info.format_text();

        assert!(text.starts_with("Version: 1.0.0\n"));
        assert!(text.contains(&format!(
            "Directive length: {} characters",
            registry.canonical().char_len()
        )));
        assert!(text.contains("  [ok] Labeling system"));
        assert!(text.contains("  academic   Academic Writing (verification)"));
        assert!(text.ends_with("Repository: https://github.com/zerotrace-project/zerotrace"));
    }

    #[test]
    fn test_info_json() {
        let registry = Registry::builtin().unwrap();
        let info = FrameworkInfo::new(&registry, IconContext::ascii());
        let json: serde_json::Value = serde_json::from_str(&info.format_json().unwrap()).unwrap();

        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["configurations"].as_array().unwrap().len(), 4);
        assert_eq!(json["configurations"][1]["emphasis"], "precision");
        assert_eq!(json["repository"], REPOSITORY);
        assert!(json.get("icons").is_none());
    }
}
