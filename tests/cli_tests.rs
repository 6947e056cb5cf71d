//! CLI interface tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PROXY_VARS: [&str; 6] = [
    "HTTPS_PROXY",
    "https_proxy",
    "HTTP_PROXY",
    "http_proxy",
    "ALL_PROXY",
    "all_proxy",
];

fn nios_leases() -> Command {
    let mut cmd = Command::cargo_bin("nios-leases").unwrap();
    for var in PROXY_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("gm.ini");
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_owned()
}

#[test]
fn test_version_flag() {
    nios_leases()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nios-leases"));
}

#[test]
fn test_help_flag() {
    nios_leases()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Retrieve DHCP leases"))
        .stdout(predicate::str::contains("by-address"))
        .stdout(predicate::str::contains("by-object"));
}

#[test]
fn test_subcommand_required() {
    nios_leases().assert().failure().code(2);
}

#[test]
fn test_missing_config_error() {
    nios_leases()
        .args(["--config", "nonexistent.ini", "by-address", "-i", "10.0.0.5"])
        .assert()
        .failure()
        .code(1) // Configuration error
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_ip_rejected_before_config() {
    nios_leases()
        .args(["--config", "nonexistent.ini", "by-address", "-i", "10.0.0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid IPv4 address"));
}

#[test]
fn test_invalid_network_rejected() {
    nios_leases()
        .args(["by-object", "--network", "10.0.0.0/40"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid network"));
}

#[test]
fn test_config_without_nios_section() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, "[BloxOne]\napi_key = 'abc'\n");

    nios_leases()
        .args(["-c", config.as_str(), "by-address", "-i", "10.0.0.5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No [NIOS] section"));
}

#[test]
fn test_config_missing_user() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, "[NIOS]\ngm = '127.0.0.1'\napi_version = 'v2.11'\n");

    nios_leases()
        .args(["-c", config.as_str(), "by-address", "-i", "10.0.0.5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Key user not found"))
        .stderr(predicate::str::contains("Required key 'user'"));
}

#[test]
fn test_unreachable_grid_master() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(
        &temp_dir,
        "[NIOS]\ngm = '127.0.0.1:9'\napi_version = 'v2.11'\nvalid_cert = 'false'\nuser = 'admin'\npass = 'infoblox'\n",
    );

    nios_leases()
        .args(["-c", config.as_str(), "by-address", "-i", "10.0.0.5"])
        .assert()
        .failure()
        .code(2) // Connection error
        .stderr(predicate::str::contains("Retrieving network for IP: 10.0.0.5"))
        .stdout(predicate::str::is_empty());
}
