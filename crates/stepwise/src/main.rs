mod catalog;
mod commands;
mod error;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stepwise_config::{DEFAULT_CONFIG_FILE, StepwiseConfig};

use crate::commands::Commands;
use crate::error::{CliError, Result};

#[derive(Parser)]
#[command(name = "stepwise")]
#[command(about = "Run method migrations with reverse-order rollback", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable debug logging on stderr (overridden by `RUST_LOG`)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = cli.command.execute(config) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn load_config(path: &std::path::Path) -> Result<StepwiseConfig> {
    let config = StepwiseConfig::load_or_default(path)?.with_env_overrides()?;
    tracing::debug!(
        config = %path.display(),
        methods = config.methods().len(),
        rollback_on_failure = config.rollback_on_failure(),
        "loaded configuration"
    );
    Ok(config)
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
