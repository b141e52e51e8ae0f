//! CLI integration tests. None of these reach the network.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn gapscan() -> Command {
    let mut cmd = cargo_bin_cmd!("gapscan");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    gapscan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--min-gap"))
        .stdout(predicate::str::contains("--max-cap-b"))
        .stdout(predicate::str::contains("--symbols"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_version() {
    gapscan()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gapscan"));
}

#[test]
fn test_min_gap_out_of_range_fails() {
    gapscan()
        .args(["--min-gap", "25"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be between 1 and 20"));
}

#[test]
fn test_unknown_flag_fails() {
    gapscan().arg("--bogus").assert().code(1);
}

#[test]
fn test_inverted_price_band_fails() {
    gapscan()
        .args(["--min-price", "60", "--max-price", "50", "--no-progress"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid scan settings"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_oversized_max_cap_fails_cleanly() {
    gapscan()
        .args(["--max-cap-b", "100000000000000000000", "--no-progress"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid scan settings"))
        .stderr(predicate::str::contains("panicked").not());
}
