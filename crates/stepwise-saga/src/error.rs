use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Error type returned by migration methods.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error from running a migration.
///
/// Cloneable so the same value can be emitted on the progress channel and
/// returned to the caller.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum MigrateError {
    /// A listed method is not known to the invoker. Raised before anything runs.
    #[error("non-existing migrate method: {0}")]
    MissingMethod(String),

    /// A known method reported a failure.
    #[error("method {method} returned an error")]
    Invocation {
        /// Name of the method that failed.
        method: String,
        /// The error reported by the method.
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The migration file could not be opened or read.
    #[error("failed to read migration file '{path}'")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl MigrateError {
    pub(crate) fn invocation(method: &str, cause: BoxError) -> Self {
        Self::Invocation {
            method: method.to_string(),
            source: Arc::from(cause),
        }
    }

    pub(crate) fn source_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::SourceRead {
            path,
            source: Arc::new(source),
        }
    }

    /// Name of the method this error is about, if any.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::MissingMethod(method) | Self::Invocation { method, .. } => Some(method),
            Self::SourceRead { .. } => None,
        }
    }
}

/// Error from building a [`crate::MethodRegistry`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("method '{0}' is already registered")]
    DuplicateMethod(String),
}
