//! Validate command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use serde::Serialize;
use zerotrace_common_log::spans::directive_span;
use zerotrace_directive::{Scenario, StructuralValidator, ValidationReport};

use crate::cli::{CommandContext, OutputFormat};
use crate::commands::resolve_variant;
use crate::error::CliError;
use crate::output::Printer;
use crate::render;

/// Validate a directive text against the structural checklist
#[derive(Debug, Parser)]
pub struct ValidateCommand {
    /// Validate the contents of a file instead of a registry variant
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "variant")]
    pub file: Option<PathBuf>,

    /// Variant to validate: core, short, or a configuration key
    #[arg(long, value_name = "NAME", default_value = "core")]
    pub variant: String,

    /// Fail when coverage is below the passing threshold or a structure marker is missing
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct ValidationOutput<'a> {
    source: String,
    report: &'a ValidationReport,
    scenarios: &'a [Scenario],
}

impl ValidateCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let registry = ctx.registry()?;

        let (source, text) = match &self.file {
            Some(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| CliError::io_with_path("failed to read directive file", e, path))?;
                (path.display().to_string(), text)
            }
            None => {
                let directive = resolve_variant(&registry, &self.variant)?;
                (self.variant.clone(), directive.into_string())
            }
        };

        let report = {
            let _span = directive_span(&source).entered();
            StructuralValidator::new(registry.clone()).validate(&text)
        };

        match ctx.format {
            OutputFormat::Json => {
                let output = ValidationOutput {
                    source,
                    report: &report,
                    scenarios: registry.scenarios(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                let printer = Printer::new(ctx);
                let icons = printer.icons();

                printer.heading(&format!("zerotrace validator v{}\n", registry.version()));
                printer.message(&format!("Directive ({source}):"));
                printer.message(&icons.rule(80));
                printer.message(text.trim_end());
                printer.message(&icons.rule(80));

                printer.heading("\nStatic checks:\n");
                printer.message(&render::validation_report(&report, icons));

                printer.heading("Manual testing instructions:\n");
                printer.message(&render::scenarios(registry.scenarios()));

                if report.is_passing() && report.all_structure_present() {
                    printer.success("Static validation passed");
                } else {
                    printer.warning("Static validation completed with warnings");
                }
                printer.hint("Manual testing against a real model is still required");
            }
        }

        if self.strict {
            enforce(&report)?;
        }
        Ok(())
    }
}

fn enforce(report: &ValidationReport) -> Result<(), CliError> {
    let mut problems = Vec::new();

    if !report.is_passing() {
        let missing: Vec<_> = report.missing_keywords().collect();
        problems.push(format!(
            "keyword coverage {:.1}% (missing: {})",
            report.keyword_coverage_pct,
            missing.join(", ")
        ));
    }

    let flags = &report.structure_flags;
    for (label, present) in [
        ("verification", flags.has_verification),
        ("labeling", flags.has_labeling),
        ("style", flags.has_style),
    ] {
        if !present {
            problems.push(format!("missing {label} marker"));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "strict validation failed: {}",
            problems.join("; ")
        )))
    }
}
