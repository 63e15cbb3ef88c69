use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("homework-notifier").unwrap();
    cmd.current_dir(dir.path())
        .env_clear()
        .env("PRACTICUM_TOKEN", "p")
        .env("TELEGRAM_TOKEN", "t")
        .env("TELEGRAM_CHAT_ID", "42");
    cmd
}

#[test]
fn validate_rejects_malformed_config_with_logged_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.toml"), "[poller\nretry_period_secs = = 5\n").unwrap();

    cmd(&dir)
        .args(["-c", "bad.toml", "validate"])
        .assert()
        .failure()
        .stderr(contains("CRITICAL: Config load failed from bad.toml"))
        .stderr(contains("TOML parse error"))
        .stderr(contains("Configuration OK").not());
}

#[test]
fn validate_accepts_missing_config_file() {
    let dir = TempDir::new().unwrap();

    cmd(&dir)
        .args(["-c", "absent.toml", "validate"])
        .assert()
        .success()
        .stderr(contains("No configuration at absent.toml"))
        .stderr(contains("Configuration OK"));
}

#[test]
fn validate_reads_log_level_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[logging]\nlevel = \"warn\"\n",
    )
    .unwrap();

    cmd(&dir)
        .arg("validate")
        .assert()
        .success()
        .stderr(contains("Configuration OK").not());
}

#[test]
fn validate_lists_missing_telegram_token() {
    let dir = TempDir::new().unwrap();

    cmd(&dir)
        .env_remove("TELEGRAM_TOKEN")
        .arg("validate")
        .assert()
        .failure()
        .stderr(contains(
            "CRITICAL: Missing required environment variables: TELEGRAM_TOKEN",
        ));
}
