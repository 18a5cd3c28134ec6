//! Method migrations with reverse-order rollback.
//!
//! A migration file lists one method name per line. The [`Migrator`] checks
//! every name against a [`MethodInvoker`] before running anything, invokes the
//! methods in order, and when one fails it can undo the methods already
//! applied by invoking their `_up`/`_down` counterparts in reverse order.

mod audit;
mod error;
mod invoker;
mod methods;
mod migrator;
mod progress;
mod reversal;
mod source;

pub use audit::{MigrationAuditLog, StepRecord, StepStatus};
pub use error::{BoxError, MigrateError, RegistryError};
pub use invoker::{MethodInvoker, MethodRegistry, MigrationMethod};
pub use methods::{COMMENT_PREFIX, migration_methods};
pub use migrator::Migrator;
pub use progress::{Phase, Progress, ProgressSink};
pub use reversal::rollback_method;
pub use source::{Direction, MigrationFile, read_lines};
