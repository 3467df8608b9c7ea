use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn missing_start_tag_prints_usage_and_fails() {
    let mut cmd = Command::cargo_bin("orgstats").unwrap();
    let assert = cmd.assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("--start-tag"), "usage should name the missing flag: {stderr}");
    // Nothing of the report may be printed on a usage error.
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(!stdout.contains("Contributors"));
}

#[test]
fn help_describes_the_report() {
    let mut cmd = Command::cargo_bin("orgstats").unwrap();
    let assert = cmd.arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("external contributors"));
    assert!(stdout.contains("--end-tag"));
    assert!(stdout.contains("--verbose"));
}

#[test]
fn version_flag_works() {
    let mut cmd = Command::cargo_bin("orgstats").unwrap();
    cmd.arg("--version").assert().success();
}
