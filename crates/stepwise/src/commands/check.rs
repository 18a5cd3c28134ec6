use stepwise_config::StepwiseConfig;
use stepwise_saga::{MethodInvoker, migration_methods, rollback_method};

use super::{CheckArgs, resolve_migration};
use crate::catalog::CommandCatalog;
use crate::error::Result;

pub(crate) fn run(args: CheckArgs, config: &StepwiseConfig) -> Result<()> {
    let file = resolve_migration(&args.file, config)?;
    let catalog = CommandCatalog::from_config(config);
    let methods = migration_methods(&file, &catalog)?;

    println!(
        "{} {} ({}): {} method(s)",
        file.version,
        file.name,
        file.direction,
        methods.len()
    );
    for (position, method) in methods.iter().enumerate() {
        let rollback = match rollback_method(method) {
            Some(compensating) if catalog.is_valid(&compensating) => {
                format!("rollback: {compensating}")
            }
            Some(compensating) => format!("not reversible: {compensating} is not configured"),
            None => String::from("not reversible"),
        };
        println!("  {}. {method} ({rollback})", position + 1);
    }
    Ok(())
}
