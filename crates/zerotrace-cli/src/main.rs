//! zerotrace CLI
//!
//! Main entry point for the `zerotrace` binary.

use std::process::ExitCode;

use clap::{ColorChoice, Parser};
use zerotrace_common_log::{LogConfig, LogLevel};

use zerotrace_cli::cli::Cli;
use zerotrace_cli::CliError;

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    zerotrace_common_config::load_dotenv();
    init_tracing(&cli);

    let format = cli.format;
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to create async runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            tracing::debug!(code = e.code(), error = %e, "command failed");
            e.report(format);
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config).await
}

fn init_tracing(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }
    if cli.color == ColorChoice::Never {
        config = config.with_ansi(false);
    }

    if let Err(e) = zerotrace_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
