//! Output formatting utilities for CLI commands.

use clap::ColorChoice;
use console::style;
use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

pub mod icons;

pub use icons::IconContext;

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    let output = match ctx.format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value.format_json()?,
    };

    println!("{output}");
    Ok(())
}

/// Format-aware printer for progress and status lines.
///
/// Status lines are suppressed under `--quiet` and under `--format json` so
/// that stdout stays machine readable.
pub struct Printer {
    icons: IconContext,
    chatty: bool,
}

impl Printer {
    pub fn new(ctx: &CommandContext) -> Self {
        match ctx.color {
            ColorChoice::Always => console::set_colors_enabled(true),
            ColorChoice::Never => console::set_colors_enabled(false),
            ColorChoice::Auto => {}
        }

        Self {
            icons: IconContext::new(),
            chatty: !ctx.quiet && ctx.format == OutputFormat::Text,
        }
    }

    pub fn icons(&self) -> &IconContext {
        &self.icons
    }

    pub fn heading(&self, msg: &str) {
        if self.chatty {
            println!("{}", style(msg).bold().blue());
        }
    }

    pub fn message(&self, msg: &str) {
        if self.chatty {
            println!("{msg}");
        }
    }

    pub fn success(&self, msg: &str) {
        if self.chatty {
            println!("{} {}", style(self.icons.check()).green(), style(msg).green());
        }
    }

    pub fn warning(&self, msg: &str) {
        if self.chatty {
            println!("{} {}", style(self.icons.warning()).yellow(), style(msg).yellow());
        }
    }

    pub fn hint(&self, msg: &str) {
        if self.chatty {
            println!("{} {msg}", style("hint:").cyan().bold());
        }
    }
}
