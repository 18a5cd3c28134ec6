use std::fs;
use std::path::PathBuf;

use stepwise_config::{ConfigError, DEFAULT_CONFIG_FILE, StepwiseConfig};
use tempfile::TempDir;

#[test]
fn loads_config_from_disk() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(
        &path,
        r#"
[migrate]
rollback-on-failure = true

[methods]
create_up = "touch created"
create_down = ["rm", "created"]
"#,
    )?;

    let config = StepwiseConfig::load(&path)?;

    assert!(config.rollback_on_failure());
    assert_eq!(config.base_dir(), dir.path());
    assert_eq!(config.methods().len(), 2);
    assert_eq!(config.migrations_dir(), dir.path().join("migrations"));
    Ok(())
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(DEFAULT_CONFIG_FILE);

    let err = StepwiseConfig::load(&path).expect_err("file does not exist");

    assert!(matches!(err, ConfigError::Read { path: ref p, .. } if *p == path));
}

#[test]
fn load_or_default_tolerates_missing_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join(DEFAULT_CONFIG_FILE);

    let config = StepwiseConfig::load_or_default(&path)?;

    assert!(!config.rollback_on_failure());
    assert!(config.methods().is_empty());
    assert_eq!(config.base_dir(), dir.path());
    Ok(())
}

#[test]
fn malformed_toml_is_a_parse_error_with_path() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, "[methods\nbroken")?;

    let err = StepwiseConfig::load_or_default(&path).expect_err("malformed toml");

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
    assert!(std::error::Error::source(&err).is_some());
    Ok(())
}

#[test]
fn relative_config_path_resolves_against_current_dir() -> anyhow::Result<()> {
    let config = StepwiseConfig::load_or_default(&PathBuf::from("does-not-exist.toml"))?;

    assert_eq!(config.base_dir(), PathBuf::new());
    assert_eq!(config.migrations_dir(), PathBuf::from("migrations"));
    Ok(())
}
