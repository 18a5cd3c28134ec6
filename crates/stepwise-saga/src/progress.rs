use std::sync::mpsc::{Sender, SyncSender};

use crate::error::MigrateError;

/// Whether a message belongs to the forward run or to the rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Forward,
    Rollback,
}

/// A message on the progress channel.
///
/// Messages arrive in the order things happen. Consumers must not assume a
/// fixed count.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Progress {
    /// A method is about to be invoked.
    Invoking { method: String, phase: Phase },
    /// An error was encountered.
    Failed { error: MigrateError, phase: Phase },
}

impl Progress {
    /// The phase this message was emitted in.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Invoking { phase, .. } | Self::Failed { phase, .. } => *phase,
        }
    }
}

/// Receives progress messages from a running migration.
///
/// Emission happens on the migrator's thread, between invocations. A sink
/// that blocks holds up the migration until it returns.
pub trait ProgressSink {
    /// Deliver one message.
    fn emit(&self, progress: Progress);
}

/// Unbounded: never blocks. Messages sent after the receiver is dropped are
/// discarded, so a missing consumer does not fail the migration.
impl ProgressSink for Sender<Progress> {
    fn emit(&self, progress: Progress) {
        let _ = self.send(progress);
    }
}

/// Bounded: once the buffer is full the migrator waits at each emission until
/// the consumer drains a message. This is the only backpressure point of a
/// run. A dropped receiver is ignored as with [`Sender`].
impl ProgressSink for SyncSender<Progress> {
    fn emit(&self, progress: Progress) {
        let _ = self.send(progress);
    }
}

impl<T: ProgressSink + ?Sized> ProgressSink for &T {
    fn emit(&self, progress: Progress) {
        (**self).emit(progress);
    }
}
