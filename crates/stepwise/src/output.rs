use std::error::Error;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use stepwise_saga::{MigrateError, Phase, Progress};

/// Where a progress message is printed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Line {
    Stdout(String),
    Stderr(String),
}

/// Print progress messages as they arrive, until the sending side closes.
pub(crate) fn spawn_printer(rx: Receiver<Progress>) -> JoinHandle<()> {
    thread::spawn(move || {
        for progress in rx {
            match render(&progress) {
                Some(Line::Stdout(line)) => println!("{line}"),
                Some(Line::Stderr(line)) => eprintln!("{line}"),
                None => {}
            }
        }
    })
}

/// Forward-phase errors are skipped: the migration returns them and they are
/// reported once on exit.
pub(crate) fn render(progress: &Progress) -> Option<Line> {
    match progress {
        Progress::Invoking { .. } => Some(Line::Stdout(format_progress(progress))),
        Progress::Failed {
            phase: Phase::Rollback,
            ..
        } => Some(Line::Stderr(format_progress(progress))),
        _ => None,
    }
}

pub(crate) fn format_progress(progress: &Progress) -> String {
    match progress {
        Progress::Invoking {
            method,
            phase: Phase::Forward,
        } => format!("→ {method}"),
        Progress::Invoking {
            method,
            phase: Phase::Rollback,
        } => format!("↩ {method}"),
        Progress::Failed {
            error,
            phase: Phase::Forward,
        } => format!("✗ {}", format_error_chain(error)),
        Progress::Failed {
            error,
            phase: Phase::Rollback,
        } => format!("✗ rollback: {}", format_error_chain(error)),
        _ => String::new(),
    }
}

fn format_error_chain(error: &MigrateError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
