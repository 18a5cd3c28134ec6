//! Integration tests for rollback of partially applied migrations.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use stepwise_saga::{
    Direction, MethodRegistry, MigrateError, MigrationFile, Migrator, Phase, Progress, StepStatus,
};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TestError(String);

type CallLog = Rc<RefCell<Vec<String>>>;

fn succeeding(log: &CallLog, name: &'static str, registry: &mut MethodRegistry) {
    let log = Rc::clone(log);
    registry
        .register_fn(name, move || {
            log.borrow_mut().push(name.to_string());
            Ok(())
        })
        .expect("unique method name");
}

fn failing(log: &CallLog, name: &'static str, registry: &mut MethodRegistry) {
    let log = Rc::clone(log);
    registry
        .register_fn(name, move || {
            log.borrow_mut().push(name.to_string());
            Err(TestError(format!("{name} failed")).into())
        })
        .expect("unique method name");
}

fn migration(content: &str) -> MigrationFile {
    MigrationFile::in_memory(3, "add_orders", Direction::Up, content)
}

fn describe(progress: Progress) -> String {
    match progress {
        Progress::Invoking { method, .. } => method,
        Progress::Failed { error, .. } => format!("error: {}", error.method().unwrap_or("-")),
        _ => "unknown".to_string(),
    }
}

#[test]
fn compensating_methods_run_in_reverse_order() {
    let log = CallLog::default();
    let mut registry = MethodRegistry::new();
    succeeding(&log, "a_up", &mut registry);
    succeeding(&log, "b_up", &mut registry);
    failing(&log, "c_up", &mut registry);
    succeeding(&log, "a_down", &mut registry);
    succeeding(&log, "b_down", &mut registry);

    let migrator = Migrator::new(registry).with_rollback_on_failure(true);
    let (tx, rx) = mpsc::channel();

    let err = migrator
        .migrate(&migration("a_up\nb_up\nc_up\n"), &tx)
        .expect_err("c_up fails");
    drop(tx);

    assert!(matches!(err, MigrateError::Invocation { ref method, .. } if method == "c_up"));
    let messages: Vec<String> = rx.iter().map(describe).collect();
    assert_eq!(
        messages,
        vec!["a_up", "b_up", "c_up", "error: c_up", "b_down", "a_down"]
    );
    assert_eq!(
        *log.borrow(),
        vec!["a_up", "b_up", "c_up", "b_down", "a_down"]
    );
}

#[test]
fn returned_error_carries_method_cause() {
    let log = CallLog::default();
    let mut registry = MethodRegistry::new();
    failing(&log, "c_up", &mut registry);
    let migrator = Migrator::new(registry).with_rollback_on_failure(true);
    let (tx, _rx) = mpsc::channel();

    let err = migrator
        .migrate(&migration("c_up"), &tx)
        .expect_err("c_up fails");

    let cause = std::error::Error::source(&err).expect("invocation error has a cause");
    assert_eq!(cause.to_string(), "c_up failed");
}

#[test]
fn rollback_disabled_never_compensates() {
    let log = CallLog::default();
    let mut registry = MethodRegistry::new();
    succeeding(&log, "a_up", &mut registry);
    failing(&log, "b_up", &mut registry);
    succeeding(&log, "a_down", &mut registry);

    let migrator = Migrator::new(registry).with_rollback_on_failure(false);
    let (tx, rx) = mpsc::channel();

    let result = migrator.migrate(&migration("a_up\nb_up"), &tx);
    drop(tx);

    assert!(result.is_err());
    assert_eq!(*log.borrow(), vec!["a_up", "b_up"]);
    assert!(rx.iter().all(|p| p.phase() == Phase::Forward));
}

#[test]
fn repeated_method_is_compensated_once_per_occurrence() {
    let log = CallLog::default();
    let mut registry = MethodRegistry::new();
    succeeding(&log, "seed_up", &mut registry);
    succeeding(&log, "seed_down", &mut registry);
    failing(&log, "index_up", &mut registry);

    let migrator = Migrator::new(registry).with_rollback_on_failure(true);
    let (tx, _rx) = mpsc::channel();

    let (result, audit_log) =
        migrator.migrate_with_audit(&migration("seed_up\nseed_up\nindex_up"), &tx);

    assert!(result.is_err());
    assert_eq!(
        *log.borrow(),
        vec!["seed_up", "seed_up", "index_up", "seed_down", "seed_down"]
    );
    let statuses: Vec<StepStatus> = audit_log.records().iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            StepStatus::Compensated,
            StepStatus::Compensated,
            StepStatus::Failed
        ]
    );
}

#[test]
fn successful_rollback_does_not_change_reported_error() {
    let log = CallLog::default();
    let mut registry = MethodRegistry::new();
    succeeding(&log, "a_up", &mut registry);
    failing(&log, "b_up", &mut registry);
    succeeding(&log, "a_down", &mut registry);

    let migrator = Migrator::new(registry).with_rollback_on_failure(true);
    let (tx, _rx) = mpsc::channel();

    let err = migrator
        .migrate(&migration("a_up\nb_up"), &tx)
        .expect_err("b_up fails even though rollback succeeds");

    assert_eq!(err.method(), Some("b_up"));
}
