use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error")]
    Config(#[from] stepwise_config::ConfigError),

    #[error("migration failed")]
    Migrate(#[from] stepwise_saga::MigrateError),

    #[error("'{0}' is not a migration file (expected <version>_<name>.<up|down>.<ext>)")]
    InvalidFileName(PathBuf),
}

pub type Result<T> = std::result::Result<T, CliError>;
