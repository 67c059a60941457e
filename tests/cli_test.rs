// Command-line contract tests for the primer binary

use assert_cmd::Command;
use predicates::prelude::*;

fn primer() -> Command {
    let mut cmd = Command::cargo_bin("primer").expect("binary builds");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn functions_without_argument_exits_silently() {
    primer()
        .args(["run", "functions"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn functions_with_two_arguments_exits_silently() {
    primer()
        .args(["run", "functions", "a", "b"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error").not());
}

#[test]
fn functions_argument_error_stays_silent_under_tiny_snapshot_limit() {
    primer()
        .args(["--snapshot-limit", "10", "run", "functions"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error").not());
}

#[test]
fn functions_with_one_argument_echoes_it() {
    primer()
        .args(["run", "functions", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "its over hello\nits over 5 times\nwell its not over\n",
        ))
        .stderr(predicate::str::contains("LESGOO"));
}

#[test]
fn pointers_lesson_prints_both_power_levels() {
    primer()
        .args(["run", "pointers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("goku.PowerLevel after copy: 15000"))
        .stdout(predicate::str::contains("goku.PowerLevel: 18000"));
}

#[test]
fn collections_lesson_is_reproducible_with_a_seed() {
    let first = primer()
        .args(["--seed", "42", "run", "collections"])
        .output()
        .expect("runs");
    let second = primer()
        .args(["--seed", "42", "run", "collections"])
        .output()
        .expect("runs");

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn list_names_every_lesson() {
    let assert = primer().arg("list").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for name in ["functions", "pointers", "collections", "interfaces"] {
        assert!(stdout.contains(name), "missing {}", name);
    }
}

#[test]
fn unknown_lesson_is_a_usage_error() {
    primer()
        .args(["run", "generics"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
