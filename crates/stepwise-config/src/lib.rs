mod config;
mod error;
mod file;

pub use config::{MethodCommand, StepwiseConfig};
pub use error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "stepwise.toml";
pub const DEFAULT_MIGRATIONS_DIR: &str = "migrations";
pub const ROLLBACK_ENV_VAR: &str = "STEPWISE_ROLLBACK_ON_FAILURE";
