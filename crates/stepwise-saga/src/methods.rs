use tracing::debug;

use crate::error::MigrateError;
use crate::invoker::MethodInvoker;
use crate::source::{MigrationFile, read_lines};

/// Lines starting with this marker are comments.
pub const COMMENT_PREFIX: &str = "--";

/// Extract the ordered list of method names from a migration file.
///
/// Blank lines and comments are skipped. Every other line, trimmed, must
/// name a method the invoker knows; the first one that does not aborts the
/// whole list.
///
/// # Errors
///
/// Returns `MigrateError::SourceRead` if the file cannot be read, or
/// `MigrateError::MissingMethod` for the first unknown method name.
pub fn migration_methods<I>(file: &MigrationFile, invoker: &I) -> Result<Vec<String>, MigrateError>
where
    I: MethodInvoker + ?Sized,
{
    let lines = read_lines(file)?;
    let mut methods = Vec::new();

    for line in &lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        if !invoker.is_valid(line) {
            return Err(MigrateError::MissingMethod(line.to_string()));
        }
        methods.push(line.to_string());
    }

    debug!(file = %file.file_name, count = methods.len(), "resolved migration methods");
    Ok(methods)
}
