use stepwise_config::StepwiseConfig;

pub(crate) fn run(config: &StepwiseConfig) {
    if config.methods().is_empty() {
        println!("No methods configured");
        return;
    }

    let width = config.methods().keys().map(String::len).max().unwrap_or(0);
    for (name, command) in config.methods() {
        println!("{name:<width$}  {command}");
    }
}
