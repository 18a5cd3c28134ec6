use tracing::{debug, warn};

use crate::audit::MigrationAuditLog;
use crate::error::MigrateError;
use crate::invoker::MethodInvoker;
use crate::methods::migration_methods;
use crate::progress::{Phase, Progress, ProgressSink};
use crate::reversal::rollback_method;
use crate::source::MigrationFile;

/// Runs the methods listed in a migration file, in order.
///
/// All names are checked against the invoker before the first method runs.
/// If a method fails and rollback is enabled, the methods already applied are
/// undone in reverse order (LIFO) by invoking their `_up`/`_down`
/// counterparts. Rollback is best-effort: a step with no known counterpart is
/// skipped, and the first compensating method that fails ends the rollback.
pub struct Migrator<I> {
    invoker: I,
    rollback_on_failure: bool,
}

impl<I: MethodInvoker> Migrator<I> {
    /// Create a migrator with rollback disabled.
    #[must_use]
    pub fn new(invoker: I) -> Self {
        Self {
            invoker,
            rollback_on_failure: false,
        }
    }

    /// Enable or disable undoing applied methods when one fails.
    #[must_use]
    pub fn with_rollback_on_failure(mut self, enabled: bool) -> Self {
        self.rollback_on_failure = enabled;
        self
    }

    /// Whether applied methods are undone on failure.
    #[must_use]
    pub fn rollback_on_failure(&self) -> bool {
        self.rollback_on_failure
    }

    /// Run the migration, reporting progress to `progress`.
    ///
    /// Every method about to be invoked and every error encountered, during
    /// the forward run and during rollback, is emitted on `progress` as it
    /// happens.
    ///
    /// # Errors
    ///
    /// Returns `MigrateError::SourceRead` or `MigrateError::MissingMethod` if
    /// the file cannot be turned into a method list; nothing is invoked in
    /// that case. Returns the `MigrateError::Invocation` of the method that
    /// failed otherwise, whether or not the rollback succeeded.
    pub fn migrate<P>(&self, file: &MigrationFile, progress: &P) -> Result<(), MigrateError>
    where
        P: ProgressSink + ?Sized,
    {
        let (result, _audit_log) = self.migrate_internal(file, progress);
        result
    }

    /// Run the migration and return both the result and an audit log.
    pub fn migrate_with_audit<P>(
        &self,
        file: &MigrationFile,
        progress: &P,
    ) -> (Result<(), MigrateError>, MigrationAuditLog)
    where
        P: ProgressSink + ?Sized,
    {
        self.migrate_internal(file, progress)
    }

    fn migrate_internal<P>(
        &self,
        file: &MigrationFile,
        progress: &P,
    ) -> (Result<(), MigrateError>, MigrationAuditLog)
    where
        P: ProgressSink + ?Sized,
    {
        let mut audit_log = MigrationAuditLog::new();

        let methods = match migration_methods(file, &self.invoker) {
            Ok(methods) => methods,
            Err(error) => {
                progress.emit(Progress::Failed {
                    error: error.clone(),
                    phase: Phase::Forward,
                });
                return (Err(error), audit_log);
            }
        };

        for (index, method) in methods.iter().enumerate() {
            progress.emit(Progress::Invoking {
                method: method.clone(),
                phase: Phase::Forward,
            });
            audit_log.record_start(method);
            debug!(method = %method, "invoking migration method");

            if let Err(cause) = self.invoker.invoke(method) {
                let error = MigrateError::invocation(method, cause);
                audit_log.record_failure();
                debug!(method = %method, error = %error, "migration method failed");
                progress.emit(Progress::Failed {
                    error: error.clone(),
                    phase: Phase::Forward,
                });

                if self.rollback_on_failure {
                    self.roll_back(&methods[..index], progress, &mut audit_log);
                }
                return (Err(error), audit_log);
            }

            audit_log.record_success();
        }

        (Ok(()), audit_log)
    }

    fn roll_back<P>(&self, applied: &[String], progress: &P, audit_log: &mut MigrationAuditLog)
    where
        P: ProgressSink + ?Sized,
    {
        for (index, method) in applied.iter().enumerate().rev() {
            let Some(compensating) = rollback_method(method) else {
                debug!(method = %method, "no rollback method for step, leaving it applied");
                audit_log.record_not_reversible(index);
                continue;
            };
            if !self.invoker.is_valid(&compensating) {
                debug!(
                    method = %method,
                    rollback = %compensating,
                    "rollback method does not exist, leaving step applied"
                );
                audit_log.record_not_reversible(index);
                continue;
            }

            progress.emit(Progress::Invoking {
                method: compensating.clone(),
                phase: Phase::Rollback,
            });
            debug!(method = %method, rollback = %compensating, "rolling back migration method");

            match self.invoker.invoke(&compensating) {
                Ok(()) => audit_log.record_compensated(index, &compensating),
                Err(cause) => {
                    let error = MigrateError::invocation(&compensating, cause);
                    warn!(
                        rollback = %compensating,
                        error = %error,
                        "rollback failed, abandoning remaining rollback"
                    );
                    audit_log.record_compensation_failed(index, &compensating);
                    progress.emit(Progress::Failed {
                        error,
                        phase: Phase::Rollback,
                    });
                    break;
                }
            }
        }
    }
}
