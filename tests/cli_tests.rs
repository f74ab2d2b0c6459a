//! CLI tests for the kiicli binary
//!
//! Runs the built binary with an isolated HOME and config file so nothing
//! from the developer's own `~/.kii` leaks in.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KII_VARS: [&str; 9] = [
    "KII_APP_ID",
    "KII_APP_KEY",
    "KII_CLIENT_ID",
    "KII_CLIENT_SECRET",
    "KII_SITE",
    "KII_ENDPOINT_URL",
    "KII_LOG_URL",
    "KII_CONFIG_FILE",
    "KII_LOG_LEVEL",
];

/// Binary command with a fresh HOME and no KII_* variables
fn kiicli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kiicli").unwrap();
    cmd.current_dir(home.path()).env("HOME", home.path()).env_remove("RUST_LOG");
    for var in KII_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_config(home: &TempDir, content: &str) -> String {
    let path = home.path().join("kii.ini");
    fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

/// Test that --version prints the binary name and a version number
#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    kiicli(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kiicli").and(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap()));
}

/// Test that --help lists the subcommands
#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    kiicli(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config").and(predicate::str::contains("log")));
}

/// Test `log format` conversion output
#[test]
fn test_log_format() {
    let home = TempDir::new().unwrap();
    kiicli(&home)
        .args(["log", "format", "${time} [${level}]"])
        .assert()
        .success()
        .stdout("{{.time}} [{{.level}}]\n");
}

/// Test `log render` reading records from stdin
#[test]
fn test_log_render_stdin() {
    let home = TempDir::new().unwrap();
    let input = concat!(
        r#"{"time":"t1","level":"INFO","message":"started"}"#,
        "\n\nnot json\n",
        r#"{"level":"WARN","message":"no time"}"#,
        "\n"
    );

    kiicli(&home)
        .args(["log", "render"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("t1 [INFO] started\n<no value> [WARN] no time\n")
        .stderr(predicate::str::contains("line 3"));
}

/// Test that a line with invalid UTF-8 is skipped and later records still render
#[test]
fn test_log_render_skips_invalid_utf8() {
    let home = TempDir::new().unwrap();
    let mut input = br#"{"time":"t1","level":"INFO","message":"a"}"#.to_vec();
    input.extend_from_slice(b"\n\xff\xfe garbage\n");
    input.extend_from_slice(br#"{"time":"t2","level":"INFO","message":"b"}"#);
    input.push(b'\n');

    kiicli(&home)
        .args(["log", "render"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("t1 [INFO] a\nt2 [INFO] b\n")
        .stderr(predicate::str::contains("line 2"));
}

/// Test `log render` with a custom format and a file
#[test]
fn test_log_render_file() {
    let home = TempDir::new().unwrap();
    let records = home.path().join("records.jsonl");
    fs::write(&records, "{\"level\":\"ERROR\",\"message\":\"boom\",\"code\":500}\n").unwrap();

    kiicli(&home)
        .args(["log", "render", "-f", "${level}(${code}): ${message}"])
        .arg(&records)
        .assert()
        .success()
        .stdout("ERROR(500): boom\n");
}

/// Test that `config init` creates the file once
#[test]
fn test_config_init() {
    let home = TempDir::new().unwrap();
    let config_file = home.path().join(".kii").join("config");

    kiicli(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(config_file.exists());

    kiicli(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

/// Test `config show` masks secrets and resolves endpoints
#[test]
fn test_config_show() {
    let home = TempDir::new().unwrap();
    let config_file = write_config(
        &home,
        "[default]\napp_id = my-app\napp_key = supersecretkey\nsite = sg\n",
    );

    kiicli(&home)
        .args(["--config-file", &config_file, "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("my-app")
                .and(predicate::str::contains("supersecretkey").not())
                .and(predicate::str::contains("https://api-sg.kii.com/api"))
                .and(predicate::str::contains("wss://apilog-sg.kii.com:443/logs")),
        );
}

/// Test that flags override the config file
#[test]
fn test_flag_overrides_file() {
    let home = TempDir::new().unwrap();
    let config_file = write_config(&home, "[default]\napp_id = a\napp_key = k\nsite = us\n");

    kiicli(&home)
        .args(["--config-file", &config_file, "--site", "cn", "log", "url"])
        .assert()
        .success()
        .stdout("wss://apilog-cn2.kii.com:443/logs\n");
}

/// Test that a missing site exits with the missing-parameter code
#[test]
fn test_missing_site_exit_code() {
    let home = TempDir::new().unwrap();
    let config_file = write_config(&home, "[default]\napp_id = a\napp_key = k\nsite =\n");

    kiicli(&home)
        .args(["--config-file", &config_file, "log", "url"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing site"));
}

/// Test that an unknown profile exits with the missing-parameter code
#[test]
fn test_unknown_profile_exit_code() {
    let home = TempDir::new().unwrap();
    let config_file = write_config(&home, "[default]\napp_id = a\napp_key = k\nsite = us\n");

    kiicli(&home)
        .args(["--config-file", &config_file, "--profile", "prod", "config", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("profile prod is not found"));
}

/// Test that `config validate` fails on an incomplete profile
#[test]
fn test_config_validate_failure() {
    let home = TempDir::new().unwrap();
    let config_file = write_config(&home, "[default]\napp_id =\napp_key =\nsite = us\n");

    kiicli(&home)
        .args(["--config-file", &config_file, "config", "validate"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("validation failed with 2 error(s)")
                .and(predicate::function(|err: &str| err.matches("app_id is not set").count() == 1)),
        );
}

/// Test that `auth token` without a stored token fails cleanly
#[test]
fn test_auth_token_missing() {
    let home = TempDir::new().unwrap();
    let config_file = write_config(&home, "[default]\napp_id = a\napp_key = k\nsite = us\n");

    kiicli(&home)
        .args(["--config-file", &config_file, "auth", "token"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Authentication error"));
}
