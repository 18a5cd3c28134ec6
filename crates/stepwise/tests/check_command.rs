use std::fs;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::{contains, is_match};
use tempfile::TempDir;

fn setup_project() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(
        dir.path().join("stepwise.toml"),
        r#"
[methods]
create_up = "touch created"
create_down = ["rm", "-f", "created"]
index_up = "touch indexed"
vacuum = "true"
"#,
    )
    .expect("write config");
    fs::create_dir_all(dir.path().join("migrations")).expect("create migrations dir");
    dir
}

#[test]
fn check_lists_methods_and_rollback_counterparts() {
    let dir = setup_project();
    fs::write(
        dir.path().join("migrations/0002_schema.up.mig"),
        "create_up\nindex_up\nvacuum\n",
    )
    .expect("write migration");

    assert_cmd::cargo::cargo_bin_cmd!("stepwise")
        .args(["check", "0002_schema.up.mig"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(contains("2 schema (up): 3 method(s)"))
        .stdout(contains("1. create_up (rollback: create_down)"))
        .stdout(contains("2. index_up (not reversible: index_down is not configured)"))
        .stdout(contains("3. vacuum (not reversible)"));

    assert!(!dir.path().join("created").exists(), "check must not run methods");
}

#[test]
fn check_reports_unknown_method() {
    let dir = setup_project();
    fs::write(
        dir.path().join("migrations/0003_bad.down.mig"),
        "create_down\nexplode_down\n",
    )
    .expect("write migration");

    assert_cmd::cargo::cargo_bin_cmd!("stepwise")
        .args(["check", "0003_bad.down.mig"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(contains("explode_down"));
}

#[test]
fn check_reports_missing_file() {
    let dir = setup_project();

    assert_cmd::cargo::cargo_bin_cmd!("stepwise")
        .args(["check", "0009_nothing.up.mig"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(contains("failed to read migration file"));
}

#[test]
fn methods_lists_configured_commands_in_order() {
    let dir = setup_project();

    assert_cmd::cargo::cargo_bin_cmd!("stepwise")
        .args(["methods"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(contains("create_up").and(contains("sh -c touch created")))
        .stdout(contains("rm -f created"));
}

#[test]
fn methods_are_listed_in_declaration_order_not_sorted() {
    let dir = setup_project();

    let declared_order = is_match("(?s)create_up.*create_down.*index_up.*vacuum")
        .expect("valid regex");
    assert_cmd::cargo::cargo_bin_cmd!("stepwise")
        .args(["methods"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(declared_order);
}

#[test]
fn methods_without_config_file() {
    let dir = TempDir::new().expect("create temp dir");

    assert_cmd::cargo::cargo_bin_cmd!("stepwise")
        .args(["methods"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(contains("No methods configured"));
}

#[test]
fn malformed_config_is_reported() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(dir.path().join("stepwise.toml"), "[migrate]\nrollback-on-failure = \"maybe\"\n")
        .expect("write config");

    assert_cmd::cargo::cargo_bin_cmd!("stepwise")
        .args(["methods"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(contains("error: configuration error"))
        .stderr(contains("caused by: failed to parse config"));
}
