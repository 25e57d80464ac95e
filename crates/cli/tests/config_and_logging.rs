use predicates::prelude::*;
use std::fs;
use assert_cmd::Command;
use tempfile::tempdir;

#[test]
fn test_explicit_missing_config_fails() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("t.j2"), "static").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tmplfill"));
    cmd.arg(root.join("t.j2"))
        .arg("--config")
        .arg(root.join("nope.toml"))
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: config file not found"));
}

#[test]
fn test_bad_config_version_fails() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("t.j2"), "static").unwrap();
    fs::write(root.join("config.toml"), "version = 2\n").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tmplfill"));
    cmd.arg(root.join("t.j2"))
        .arg("--config")
        .arg(root.join("config.toml"))
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("version 2 is unsupported"));
}

#[test]
fn test_logging_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("tmplfill.log");
    fs::write(root.join("t.j2"), "Hi {{ name }}").unwrap();

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1

[logging]
level = "warn"
file = "{}"
file_level = "debug"
"#,
        log_file.display()
    );
    fs::write(&config_path, &config_content).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tmplfill"));
    cmd.arg(root.join("t.j2"))
        .arg("--config")
        .arg(&config_path)
        .env_remove("RUST_LOG")
        .write_stdin("Ada\n")
        .assert()
        .success()
        .stdout("Hi Ada");

    assert!(log_file.exists(), "Log file should be created");
}

#[test]
fn test_log_file_is_flushed_on_failure() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("tmplfill.log");
    fs::write(
        root.join("t.j2"),
        "{#---\nvars:\n  host:\n    required: true\n---#}\n{{ host }}",
    )
    .unwrap();

    let config_path = root.join("config.toml");
    fs::write(
        &config_path,
        format!(
            "version = 1\n[logging]\nlevel = \"error\"\nfile = \"{}\"\nfile_level = \"debug\"\n",
            log_file.display()
        ),
    )
    .unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tmplfill"));
    cmd.arg(root.join("t.j2"))
        .arg("--config")
        .arg(&config_path)
        .arg("--batch")
        .env_remove("RUST_LOG")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: missing value for required variable(s): host"));

    let logged = fs::read_to_string(&log_file).unwrap();
    assert!(logged.contains("resolved variables"), "log was: {logged}");
    assert!(logged.contains("render failed"), "log was: {logged}");
}

#[test]
fn test_render_settings_from_config() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("t.j2"), "line {{ n }}\n").unwrap();
    fs::write(
        root.join("config.toml"),
        "version = 1\n[render]\nkeep_trailing_newline = true\n",
    )
    .unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tmplfill"));
    cmd.arg(root.join("t.j2"))
        .arg("--config")
        .arg(root.join("config.toml"))
        .args(["--batch", "--var", "n=1"])
        .assert()
        .success()
        .stdout("line 1\n");
}
