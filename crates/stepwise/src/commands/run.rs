use std::sync::mpsc;

use stepwise_config::StepwiseConfig;
use stepwise_saga::Migrator;
use tracing::warn;

use super::{RunArgs, resolve_migration};
use crate::catalog::CommandCatalog;
use crate::error::Result;
use crate::output;

pub(crate) fn run(args: RunArgs, config: StepwiseConfig) -> Result<()> {
    let config = if args.rollback {
        config.with_rollback_on_failure(true)
    } else if args.no_rollback {
        config.with_rollback_on_failure(false)
    } else {
        config
    };

    let file = resolve_migration(&args.file, &config)?;
    let migrator = Migrator::new(CommandCatalog::from_config(&config))
        .with_rollback_on_failure(config.rollback_on_failure());

    println!(
        "Migrating {} {} ({})",
        file.version, file.name, file.direction
    );

    let (tx, rx) = mpsc::channel();
    let printer = output::spawn_printer(rx);

    let (result, audit_log) = migrator.migrate_with_audit(&file, &tx);
    drop(tx);
    if printer.join().is_err() {
        warn!("progress printer panicked");
    }

    if args.summary {
        println!("Summary:\n{}", audit_log.summary());
    }

    result?;
    println!("Done");
    Ok(())
}
