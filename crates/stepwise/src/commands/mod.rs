mod check;
mod methods;
mod run;

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use stepwise_config::StepwiseConfig;
use stepwise_saga::MigrationFile;

use crate::error::{CliError, Result};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the methods listed in a migration file
    Run(RunArgs),
    /// Validate a migration file and list its methods without running them
    Check(CheckArgs),
    /// List the configured methods
    Methods,
}

#[derive(Args)]
pub(crate) struct RunArgs {
    /// Migration file (`<version>_<name>.<up|down>.<ext>`), looked up in the
    /// migrations directory if not found as given
    pub file: PathBuf,

    /// Undo applied methods if one fails
    #[arg(long, conflicts_with = "no_rollback")]
    pub rollback: bool,

    /// Leave applied methods in place if one fails
    #[arg(long)]
    pub no_rollback: bool,

    /// Print a per-method summary after the run
    #[arg(long)]
    pub summary: bool,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Migration file to validate
    pub file: PathBuf,
}

impl Commands {
    pub(crate) fn execute(self, config: StepwiseConfig) -> Result<()> {
        match self {
            Self::Run(args) => run::run(args, config),
            Self::Check(args) => check::run(args, &config),
            Self::Methods => {
                methods::run(&config);
                Ok(())
            }
        }
    }
}

fn resolve_migration(file: &Path, config: &StepwiseConfig) -> Result<MigrationFile> {
    let path = if file.exists() || file.is_absolute() {
        file.to_path_buf()
    } else {
        config.migrations_dir().join(file)
    };

    MigrationFile::from_path(&path).ok_or(CliError::InvalidFileName(path))
}
