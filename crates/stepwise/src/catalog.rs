use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use indexmap::IndexMap;
use stepwise_config::{MethodCommand, StepwiseConfig};
use stepwise_saga::{BoxError, MethodInvoker};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("no command configured for method '{0}'")]
    Unknown(String),
}

/// Migration methods backed by external commands from the configuration.
///
/// Each command runs to completion, with no stdin, from the configuration
/// file's directory.
pub(crate) struct CommandCatalog {
    working_dir: PathBuf,
    methods: IndexMap<String, MethodCommand>,
}

impl CommandCatalog {
    pub(crate) fn from_config(config: &StepwiseConfig) -> Self {
        Self::new(config.base_dir(), config.methods().clone())
    }

    pub(crate) fn new(base_dir: &Path, methods: IndexMap<String, MethodCommand>) -> Self {
        let working_dir = if base_dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            base_dir.to_path_buf()
        };
        Self {
            working_dir,
            methods,
        }
    }

    fn run(&self, command: &MethodCommand) -> Result<(), CommandError> {
        let output = Command::new(command.program())
            .args(command.args())
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;

        debug!(
            command = %command,
            stdout = %String::from_utf8_lossy(&output.stdout).trim_end(),
            "command finished"
        );

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(CommandError::Failed {
            command: command.to_string(),
            status: output.status,
            stderr: if stderr.is_empty() {
                String::from("no error output")
            } else {
                stderr
            },
        })
    }
}

impl MethodInvoker for CommandCatalog {
    fn is_valid(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    fn invoke(&self, method: &str) -> Result<(), BoxError> {
        let command = self
            .methods
            .get(method)
            .ok_or_else(|| CommandError::Unknown(method.to_string()))?;
        self.run(command)?;
        Ok(())
    }
}
