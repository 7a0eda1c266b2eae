//! Binary smoke tests using assert_cmd.
//!
//! These drive the compiled `matexpr` and `sweep` binaries to check the
//! argument contract, exit codes and output shape end-to-end.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("matexpr").unwrap()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn no_args_exits_1_with_usage() {
    cmd()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn out_of_range_order_exits_1() {
    for order in ["0", "5000"] {
        cmd()
            .args([order, "2", "simple", "false"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn non_positive_width_exits_1() {
    cmd().args(["8", "0", "simple", "false"]).assert().code(1);
    cmd().args(["8", "-3", "simple", "false"]).assert().code(1);
}

#[test]
fn unknown_strategy_exits_1() {
    cmd()
        .args(["8", "2", "bogus", "false"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("simple"));
}

#[test]
fn unparsable_flag_exits_1() {
    cmd().args(["8", "2", "tasks", "maybe"]).assert().code(1);
}

#[test]
fn wrong_argument_count_exits_1() {
    cmd().args(["8", "2", "tasks"]).assert().code(1);
    cmd().args(["8", "2", "tasks", "true", "extra"]).assert().code(1);
}

#[test]
fn help_exits_0() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sections"));
}

// ---------------------------------------------------------------------------
// Output modes
// ---------------------------------------------------------------------------

#[test]
fn timing_mode_prints_only_seconds() {
    for strategy in ["simple", "tasks", "sections"] {
        let output = cmd()
            .args(["16", "2", strategy, "false"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8(output.stdout).unwrap();
        let tokens: Vec<&str> = stdout.split_whitespace().collect();
        assert_eq!(tokens.len(), 1, "{strategy}: {stdout:?}");
        assert!(tokens[0].parse::<f64>().is_ok());
    }
}

#[test]
fn print_mode_is_case_insensitive_and_labelled() {
    cmd()
        .args(["3", "1", "simple", "TRUE", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elements of the matrix B:"))
        .stdout(predicate::str::contains("Elements of the matrix C:"))
        .stdout(predicate::str::contains("Elements of the matrix A:"))
        .stdout(predicate::str::contains("The time spent on the calculation: "));
}

#[test]
fn seeded_print_runs_are_reproducible() {
    let matrices = |strategy: &str| {
        let output = cmd()
            .args(["4", "2", strategy, "true", "--seed", "99"])
            .output()
            .unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();
        stdout
            .lines()
            .filter(|line| !line.starts_with("The time spent"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let simple = matrices("simple");
    assert_eq!(simple, matrices("tasks"));
    assert_eq!(simple, matrices("sections"));
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

#[test]
fn sweep_writes_csv() {
    Command::cargo_bin("sweep")
        .unwrap()
        .args([
            "--order-start",
            "8",
            "--order-stop",
            "16",
            "--order-step",
            "8",
            "--threads-start",
            "1",
            "--threads-stop",
            "2",
            "--strategy",
            "tasks",
            "--runs",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "order,width,strategy,mean_seconds,variance,speedup",
        ))
        .stdout(predicate::str::contains("16,2,tasks,"));
}

#[test]
fn sweep_bad_arguments_exit_1() {
    for args in [["--runs", "abc"], ["--order-step", "0"]] {
        Command::cargo_bin("sweep")
            .unwrap()
            .args(args)
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn sweep_help_exits_0() {
    Command::cargo_bin("sweep")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--runs"));
}
