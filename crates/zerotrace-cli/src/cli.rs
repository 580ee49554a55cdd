//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, ColorChoice, Parser, Subcommand, ValueHint};
use zerotrace_common_config::{ConfigLoader, ZerotraceConfig};
use zerotrace_directive::{Registry, RegistryOptions};

use crate::commands::{
    BuildCommand, InfoCommand, InitCommand, ShowCommand, TestCommand, ValidateCommand,
};
use crate::error::CliError;

/// zerotrace - directive framework for transparent, natural LLM output
///
/// Show, validate, test and build the zerotrace directive and its variants.
#[derive(Debug, Parser)]
#[command(
    name = "zerotrace",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    help_template = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "ZEROTRACE_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// When to use colors
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "When to use terminal colors"
    )]
    pub color: ColorChoice,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        help = "Output format (text, json)"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display the directive or one of its variants
    Show(ShowCommand),

    /// Show framework information and statistics
    Info(InfoCommand),

    /// Validate a directive text against the structural checklist
    Validate(ValidateCommand),

    /// Build directive variants and integration documents
    Build(BuildCommand),

    /// Run the framework test battery
    Test(TestCommand),

    /// Initialize a new project with the directive
    #[command(visible_alias = "new")]
    Init(InitCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsCommand),
}

/// Shell completions generation
#[derive(Debug, Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl Cli {
    /// Load configuration from file or default locations
    pub fn load_config(&self) -> Result<ZerotraceConfig, CliError> {
        let loader = ConfigLoader::default();
        let config = match &self.config {
            Some(path) => loader.load_file(path)?,
            None => loader.load()?,
        };
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Execute the selected command
    pub async fn execute(self, config: ZerotraceConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            format: self.format,
            color: self.color,
            verbose: self.verbose,
            quiet: self.quiet,
        };

        match self.command {
            Command::Show(cmd) => cmd.execute(&ctx).await,
            Command::Info(cmd) => cmd.execute(&ctx).await,
            Command::Validate(cmd) => cmd.execute(&ctx).await,
            Command::Build(cmd) => cmd.execute(&ctx).await,
            Command::Test(cmd) => cmd.execute(&ctx).await,
            Command::Init(cmd) => cmd.execute(&ctx).await,
            Command::Completions(cmd) => cmd.execute(&ctx),
        }
    }
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, _ctx: &CommandContext) -> Result<(), CliError> {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, &mut io::stdout());
        Ok(())
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: ZerotraceConfig,
    pub format: OutputFormat,
    pub color: ColorChoice,
    pub verbose: u8,
    pub quiet: bool,
}

impl CommandContext {
    /// The directive registry selected by configuration.
    pub fn registry(&self) -> Result<Arc<Registry>, CliError> {
        let options = RegistryOptions {
            strict_emphasis: self.config.registry.strict_emphasis,
        };

        let registry = match &self.config.registry.path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading directive set");
                Registry::load(path, options)?
            }
            None => Registry::builtin_with(options)?,
        };

        Ok(Arc::new(registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_with_render() {
        let cli = Cli::try_parse_from(["zerotrace", "show", "-r", "json", "--compact"]).unwrap();
        match cli.command {
            Command::Show(cmd) => {
                assert!(cmd.compact);
                assert_eq!(cmd.render, crate::render::ShowFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["zerotrace", "info", "--format", "json", "-vv"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["zerotrace", "info", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_registry_from_default_config() {
        let ctx = CommandContext {
            config: ZerotraceConfig::default(),
            format: OutputFormat::Text,
            color: ColorChoice::Never,
            verbose: 0,
            quiet: false,
        };
        let registry = ctx.registry().unwrap();
        assert_eq!(registry.configurations().len(), 4);
    }
}
