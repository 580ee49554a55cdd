//! Show command implementation.

use clap::Parser;

use crate::cli::CommandContext;
use crate::commands::resolve_variant;
use crate::error::CliError;
use crate::output::Printer;
use crate::render::{self, ShowFormat};

/// Display the directive or one of its variants
#[derive(Debug, Parser)]
pub struct ShowCommand {
    /// Show the short variant
    #[arg(long, conflicts_with = "variant")]
    pub compact: bool,

    /// Variant to show: core, short, or a configuration key
    #[arg(long, value_name = "NAME")]
    pub variant: Option<String>,

    /// Rendering of the directive
    #[arg(short, long, value_enum, default_value = "text")]
    pub render: ShowFormat,
}

impl ShowCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let registry = ctx.registry()?;
        let name = match (&self.variant, self.compact) {
            (Some(name), _) => name.as_str(),
            (None, true) => zerotrace_directive::SHORT_VARIANT,
            (None, false) => zerotrace_directive::CORE_VARIANT,
        };
        let directive = resolve_variant(&registry, name)?;

        let printer = Printer::new(ctx);
        if self.render == ShowFormat::Text {
            printer.heading(&format!("zerotrace directive ({name})\n"));
        }

        let out = render::show(&directive, registry.version(), self.render, printer.icons())?;
        println!("{out}");
        Ok(())
    }
}
