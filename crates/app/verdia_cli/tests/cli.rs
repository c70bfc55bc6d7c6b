//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn version_prints_name_and_version() {
    let mut cmd = Command::cargo_bin("verdia").expect("binary built");
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("verdia_cli"));
}

#[test]
fn unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("verdia").expect("binary built");
    cmd.arg("frobnicate").assert().failure();
}
