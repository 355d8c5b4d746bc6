use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn cli_analyze_prints_equity() {
    let mut cmd = Command::cargo_bin("range-equity").expect("binary exists");
    cmd.arg("analyze")
        .arg("--hero")
        .arg("AA")
        .arg("--villain")
        .arg("KK")
        .arg("--board")
        .arg("Th 8d 2c")
        .arg("--iterations")
        .arg("20")
        .arg("--seed")
        .arg("7")
        .arg("--no-color");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Equity"))
        .stdout(predicates::str::contains("Scare"));
}

#[test]
fn cli_analyze_json_is_parseable() {
    let output = Command::cargo_bin("range-equity")
        .expect("binary exists")
        .args(["analyze", "--hero", "QQ", "--villain", "AKs", "--iterations", "50"])
        .args(["--seed", "3", "--equity-only", "--json"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["hero"]["combos"], 6);
    assert_eq!(report["street"], "preflop");
    assert!(report["runouts"].is_null());
}

#[test]
fn cli_rejects_bad_board() {
    let mut cmd = Command::cargo_bin("range-equity").expect("binary exists");
    cmd.args(["analyze", "--hero", "AA", "--villain", "KK", "--board", "Th Th"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("invalid board"));
}

#[test]
fn cli_parse_lists_combos_and_skips() {
    let mut cmd = Command::cargo_bin("range-equity").expect("binary exists");
    cmd.args(["parse", "AKs, nope"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("4 combos"))
        .stdout(predicates::str::contains("skipped: nope"));
}

#[test]
fn cli_top_prints_the_strongest_classes() {
    let mut cmd = Command::cargo_bin("range-equity").expect("binary exists");
    cmd.args(["top", "0", "2"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("AA, KK, QQ"));
}

#[test]
fn cli_top_with_nan_bound_prints_nothing() {
    let mut cmd = Command::cargo_bin("range-equity").expect("binary exists");
    cmd.args(["top", "10", "NaN"]);
    cmd.assert().success().stdout("\n");
}
