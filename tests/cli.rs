use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn factors_output_right_divisors() {
    let mut cmd = Command::cargo_bin("factors").unwrap();
    cmd.arg("28").arg("36").arg("17");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("28: 1 2 4 7 14 28"))
        .stdout(predicate::str::contains("36: 1 2 3 4 6 9 12 18 36"))
        .stdout(predicate::str::contains("17: 1 17"));
}

#[test]
fn factors_output_trivial_divisor_of_one() {
    let mut cmd = Command::cargo_bin("factors").unwrap();
    cmd.arg("1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1: 1"));
}

#[test]
fn factors_report_elapsed_time() {
    let mut cmd = Command::cargo_bin("factors").unwrap();
    cmd.arg("28");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Operation took"));
}

#[test]
fn factors_halt_batch_at_first_invalid_number() {
    let mut cmd = Command::cargo_bin("factors").unwrap();
    cmd.arg("28").arg("-1").arg("36");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("28: 1 2 4 7 14 28"))
        .stdout(predicate::str::contains("36:").not())
        .stderr(predicate::str::contains("positive integer"));
}

#[test]
fn factors_reject_zero() {
    let mut cmd = Command::cargo_bin("factors").unwrap();
    cmd.arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("positive integer"));
}

#[test]
fn factors_reject_unparsable_text() {
    let mut cmd = Command::cargo_bin("factors").unwrap();
    cmd.arg("28").arg("seven");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("28: 1 2 4 7 14 28"))
        .stderr(predicate::str::contains("Failed to parse number"));
}

#[test]
fn factors_output_same_divisors_with_other_worker_count() {
    let mut cmd = Command::cargo_bin("factors").unwrap();
    cmd.arg("--workers").arg("3").arg("36");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("36: 1 2 3 4 6 9 12 18 36"));
}
