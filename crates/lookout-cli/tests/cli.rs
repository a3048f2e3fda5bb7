//! Offline CLI behavior: settings file handling and argument validation.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn lookout(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lookout").unwrap();
    cmd.arg("--config").arg(config).env_remove("LOOKOUT_RESOLVER");
    cmd
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("lookout")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("whois"))
        .stdout(predicate::str::contains("providers"));
}

#[test]
fn config_path_honors_flag_and_env() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");

    lookout(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));

    Command::cargo_bin("lookout")
        .unwrap()
        .env("LOOKOUT_CONFIG", dir.path().join("from-env.toml"))
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env.toml"));
}

#[test]
fn first_listing_persists_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    lookout(&path)
        .args(["providers", "list", "ip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ip-api.com"));

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("ipwho.is"));
}

#[test]
fn set_and_reset_providers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    lookout(&path)
        .args(["providers", "set", "ip", "https://geo.example.net/lookup/{ip}"])
        .assert()
        .success();

    lookout(&path)
        .args(["-o", "json", "providers", "list", "ip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://geo.example.net/lookup/{ip}"))
        .stdout(predicate::str::contains("ip-api.com").not());

    lookout(&path)
        .args(["-o", "csv", "providers", "reset", "ip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("priority,adapter,url"))
        .stdout(predicate::str::contains("https://ip-api.com/json/{ip}"));
}

#[test]
fn template_without_placeholder_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    lookout(&path)
        .args(["providers", "set", "whois", "https://whois.example.net/lookup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("placeholder"));
}

#[test]
fn theme_round_trips_through_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    lookout(&path)
        .args(["-o", "json", "theme", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dark\""));

    lookout(&path).args(["theme", "set", "light"]).assert().success();

    lookout(&path)
        .args(["theme", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("light"));
}

#[test]
fn unknown_theme_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    lookout(&dir.path().join("settings.toml"))
        .args(["theme", "set", "sepia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}

#[test]
fn ip_command_rejects_non_ip_input() {
    let dir = TempDir::new().unwrap();
    lookout(&dir.path().join("settings.toml"))
        .args(["ip", "not-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid IP address"));
}
