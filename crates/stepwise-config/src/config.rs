use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::file::{CommandValue, ConfigFile};
use crate::{DEFAULT_MIGRATIONS_DIR, ROLLBACK_ENV_VAR};

/// External command backing a migration method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCommand {
    program: String,
    args: Vec<String>,
}

impl MethodCommand {
    /// A script run through `sh -c`.
    #[must_use]
    pub fn shell(script: impl Into<String>) -> Self {
        Self {
            program: String::from("sh"),
            args: vec![String::from("-c"), script.into()],
        }
    }

    /// A program and its arguments. Returns `None` for an empty argv.
    #[must_use]
    pub fn argv(mut argv: Vec<String>) -> Option<Self> {
        if argv.is_empty() {
            return None;
        }
        let program = argv.remove(0);
        Some(Self {
            program,
            args: argv,
        })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for MethodCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Resolved configuration: file values, defaults, and environment overrides.
#[derive(Debug, Clone)]
pub struct StepwiseConfig {
    base_dir: PathBuf,
    rollback_on_failure: bool,
    migrations_dir: PathBuf,
    methods: IndexMap<String, MethodCommand>,
}

impl Default for StepwiseConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::new(),
            rollback_on_failure: false,
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            methods: IndexMap::new(),
        }
    }
}

impl StepwiseConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, or
    /// `ConfigError::Parse` if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Like [`Self::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load(path);
        }
        Ok(Self {
            base_dir: base_dir_of(path),
            ..Self::default()
        })
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut methods = IndexMap::with_capacity(file.methods.len());
        for (name, value) in file.methods {
            let command = match value {
                CommandValue::Shell(script) if script.trim().is_empty() => None,
                CommandValue::Shell(script) => Some(MethodCommand::shell(script)),
                CommandValue::Argv(argv) => MethodCommand::argv(argv),
            };
            let Some(command) = command else {
                return Err(ConfigError::EmptyCommand { name });
            };
            methods.insert(name, command);
        }

        Ok(Self {
            base_dir: base_dir_of(path),
            rollback_on_failure: file.migrate.rollback_on_failure.unwrap_or(false),
            migrations_dir: file
                .migrate
                .migrations_dir
                .map_or_else(|| PathBuf::from(DEFAULT_MIGRATIONS_DIR), PathBuf::from),
            methods,
        })
    }

    /// Apply `STEPWISE_ROLLBACK_ON_FAILURE` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnv` if the variable is set to something
    /// other than a boolean.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnv` if a variable holds an invalid value.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ROLLBACK_ENV_VAR) {
            self.rollback_on_failure = parse_bool(&value).ok_or(ConfigError::InvalidEnv {
                var: ROLLBACK_ENV_VAR,
                value,
            })?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_rollback_on_failure(mut self, enabled: bool) -> Self {
        self.rollback_on_failure = enabled;
        self
    }

    /// Directory containing the config file. Commands run from here.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn rollback_on_failure(&self) -> bool {
        self.rollback_on_failure
    }

    /// Migrations directory, resolved against [`Self::base_dir`].
    #[must_use]
    pub fn migrations_dir(&self) -> PathBuf {
        self.base_dir.join(&self.migrations_dir)
    }

    #[must_use]
    pub fn methods(&self) -> &IndexMap<String, MethodCommand> {
        &self.methods
    }
}

fn base_dir_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
