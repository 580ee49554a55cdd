//! Build command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use serde::Serialize;
use zerotrace_common_log::spans::Timer;
use zerotrace_directive::VariantGenerator;

use crate::artifacts::{plan_artifacts, write_artifacts, Artifact, ArtifactKind};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, Printer};

/// Build directive variants and integration documents
#[derive(Debug, Parser)]
pub struct BuildCommand {
    /// Directory for directive variants (overrides build.output_dir)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Directory for integration documents (overrides build.templates_dir)
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub templates: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BuildSummary {
    version: String,
    variants: usize,
    integrations: usize,
    artifacts: Vec<Artifact>,
}

impl FormattedOutput for BuildSummary {
    fn format_text(&self) -> String {
        let mut out = format!(
            "Generated {} directive variants and {} integration documents:",
            self.variants, self.integrations
        );
        for artifact in &self.artifacts {
            out.push_str(&format!("\n  {}", artifact.path.display()));
        }
        out
    }
}

impl BuildCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let timer = Timer::start("build");
        let registry = ctx.registry()?;
        let printer = Printer::new(ctx);

        let output_dir = self.output.as_ref().unwrap_or(&ctx.config.build.output_dir);
        let templates_dir = self
            .templates
            .as_ref()
            .unwrap_or(&ctx.config.build.templates_dir);

        printer.heading(&format!("Building zerotrace directive v{}\n", registry.version()));

        let generator = VariantGenerator::new(registry.clone());
        let artifacts = plan_artifacts(&generator, output_dir, templates_dir);
        write_artifacts(&artifacts).await?;

        let count = |kind| artifacts.iter().filter(|a| a.kind == kind).count();
        let summary = BuildSummary {
            version: registry.version().to_string(),
            variants: count(ArtifactKind::Variant),
            integrations: count(ArtifactKind::Integration),
            artifacts,
        };

        if !ctx.quiet {
            print_output(ctx, &summary)?;
        }
        printer.success("Build completed");

        let elapsed = timer.finish();
        tracing::info!(
            artifacts = summary.artifacts.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "build finished"
        );
        Ok(())
    }
}
