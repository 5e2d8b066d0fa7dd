//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

const DB_VARS: [&str; 6] = [
    "TABLETAP_CONFIG",
    "TABLETAP_DB_NAME",
    "TABLETAP_DB_USER",
    "TABLETAP_DB_PASSWORD",
    "TABLETAP_DB_HOST",
    "TABLETAP_DB_PORT",
];

/// Command isolated from the caller's environment, home directory and .env files
fn isolated(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("tabletap").unwrap();
    for var in DB_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home).current_dir(home);
    cmd
}

// === Schema Command Tests ===

#[test]
fn test_schema_prints_ddl() {
    let home = tempfile::tempdir().unwrap();
    isolated(home.path())
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE IF NOT EXISTS records"))
        .stdout(predicate::str::contains("JSONB"));
}

// === Serve Command Tests ===

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("tabletap").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--client-errors"))
        .stdout(predicate::str::contains("--db-host"));
}

#[test]
fn test_serve_without_database_settings_fails() {
    let home = tempfile::tempdir().unwrap();
    isolated(home.path())
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing database setting(s)"));
}

#[test]
fn test_serve_rejects_unknown_error_policy() {
    let mut cmd = Command::cargo_bin("tabletap").unwrap();
    cmd.args(["serve", "--client-errors", "loose"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected 'collapsed' or 'split'"));
}

// === Check Command Tests ===

#[test]
fn test_check_reports_unreachable_database() {
    let home = tempfile::tempdir().unwrap();
    isolated(home.path())
        .args([
            "check",
            "--db-name",
            "tabletap",
            "--db-user",
            "tabletap",
            "--db-password",
            "tabletap",
            "--db-host",
            "127.0.0.1",
            "--db-port",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to connect to the database"));
}

#[test]
fn test_check_reads_config_file() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("tabletap.toml");
    std::fs::write(
        &config,
        "[database]\ndbname = \"t\"\nuser = \"t\"\npassword = \"t\"\nhost = \"127.0.0.1\"\nport = 1\n",
    )
    .unwrap();

    isolated(home.path())
        .arg("check")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("t@127.0.0.1:1/t"));
}
