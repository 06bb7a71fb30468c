use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn lagrange_bin_prints_all_five_points_for_moon() {
    let assert = Command::cargo_bin("lagrange")
        .expect("lagrange bin")
        .args(["--body", "Moon"])
        .assert()
        .success();

    let output = assert.get_output().stdout.clone();
    let text = String::from_utf8(output).expect("utf8");
    for label in ["L1", "L2", "L3", "L4", "L5"] {
        assert!(text.contains(label), "missing {label} in output");
    }
    assert!(text.contains("Earth"));
}

#[test]
fn lagrange_bin_accepts_explicit_masses() {
    Command::cargo_bin("lagrange")
        .expect("lagrange bin")
        .args(["--m1", "1.0", "--m2", "1.0", "--dist", "1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("phi="));
}

#[test]
fn lagrange_bin_requires_a_system() {
    Command::cargo_bin("lagrange")
        .expect("lagrange bin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--body"));
}

#[test]
fn library_reports_a_version() {
    assert!(!roche_viz::version().is_empty());
}
