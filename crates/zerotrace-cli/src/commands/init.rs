//! Init command implementation.

use std::path::{Path, PathBuf};

use clap::Parser;
use zerotrace_common_config::{ConfigLoader, ZerotraceConfig, CONFIG_DIR, CONFIG_FILE};

use crate::artifacts::api_document;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::Printer;
use crate::templates::{InitTemplate, RenderedFile, TemplateContext, TemplateRenderer};

/// Initialize a new project with the directive
#[derive(Debug, Parser)]
pub struct InitCommand {
    /// Project directory name
    #[arg(default_value = "my-zerotrace-project")]
    pub name: String,

    /// Project template
    #[arg(short, long, value_enum, default_value = "basic")]
    pub template: InitTemplate,
}

impl InitCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let registry = ctx.registry()?;
        let printer = Printer::new(ctx);
        let project_dir = PathBuf::from(&self.name);
        if let Ok(metadata) = tokio::fs::metadata(&project_dir).await {
            if !metadata.is_dir() {
                return Err(CliError::user_with_hint(
                    format!("{} exists and is not a directory", self.name),
                    "choose another project name",
                ));
            }
        }

        printer.heading(&format!("Creating project: {}\n", self.name));

        let mut context = TemplateContext::with_defaults(&self.name);
        context.set("version", registry.version());
        context.set("directive", registry.canonical().as_str());
        context.set("api_integration", api_document(registry.canonical().as_str()));

        let files = TemplateRenderer::new()
            .render(self.template, &context)
            .map_err(|e| CliError::Other(e.into()))?;

        let mut created = 0;
        for file in &files {
            if write_new(&project_dir, file).await? {
                printer.message(&format!("  created {}", file.path.display()));
                created += 1;
            } else {
                printer.warning(&format!("{} exists, left unchanged", file.path.display()));
            }
        }

        let config_path = project_dir.join(CONFIG_DIR).join(CONFIG_FILE);
        if tokio::fs::try_exists(&config_path).await.unwrap_or(false) {
            printer.warning(&format!("{} exists, left unchanged", config_path.display()));
        } else {
            ConfigLoader::new(&project_dir).save(&ZerotraceConfig::default())?;
            printer.message(&format!("  created {CONFIG_DIR}/{CONFIG_FILE}"));
            created += 1;
        }

        tracing::info!(
            project = %self.name,
            template = ?self.template,
            created,
            "project initialized"
        );

        printer.success(&format!("Project {} created", self.name));
        printer.message("\nNext steps:");
        printer.message(&format!("  cd {}", self.name));
        printer.message("  zerotrace validate --file directive.txt");
        printer.message("  zerotrace build");
        Ok(())
    }
}

/// Write `file` under `root` unless it already exists. Returns whether it was written.
async fn write_new(root: &Path, file: &RenderedFile) -> Result<bool, CliError> {
    let path = root.join(&file.path);
    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CliError::io_with_path("failed to create directory", e, parent))?;
    }

    tokio::fs::write(&path, &file.content)
        .await
        .map_err(|e| CliError::io_with_path("failed to write file", e, &path))?;
    Ok(true)
}
