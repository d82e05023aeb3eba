use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the user's saved settings.
fn otpbox(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("otpbox").unwrap();
    cmd.env("HOME", home.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn typing_first_digit_pads_value_and_advances() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["simulate", "--cells", "6", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value: \"1     \""))
        .stdout(predicate::str::contains("sink:  \"1     \""))
        .stdout(predicate::str::contains("focus: 1"));
}

#[test]
fn custom_empty_char() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["simulate", "--cells", "4", "--empty-char", "_", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value: \"12__\""));
}

#[test]
fn delete_shifts_left() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["simulate", "--cells", "4", "set:1234", "focus:0", "caret:0", "<del>"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value: \"234 \""))
        .stdout(predicate::str::contains("focus: 0"));
}

#[test]
fn paste_overflow_is_discarded() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["simulate", "--cells", "4", "paste:56789"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value: \"5678\""))
        .stdout(predicate::str::contains("focus: 3"));
}

#[test]
fn non_digit_rolls_back() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["simulate", "--cells", "4", "focus:1", "5", "focus:1", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value: \" 5  \""))
        .stdout(predicate::str::contains("sink:  \" 5  \""));
}

#[test]
fn set_value_clears_trailing_cells() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["simulate", "--cells", "4", "--table", "9999", "set:42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value: \"42  \""))
        .stdout(predicate::str::contains("Committed"));
}

#[test]
fn strict_mode_rejects_set() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["simulate", "--strict", "set:42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Programmatic set is disabled"));
}

#[test]
fn non_numeric_set_fails() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["simulate", "set:4a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a numeric value"));
}

#[test]
fn unknown_step_fails() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["simulate", "<tab>"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown step: <tab>"));
}

#[test]
fn saved_settings_apply_to_simulate() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .args(["config", "--cells", "3", "--empty-char", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved settings"))
        .stdout(predicate::str::contains("Cells:       3"));
    assert!(home.path().join(".config/otpbox/settings.json").exists());

    otpbox(&home)
        .args(["simulate", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value: \"7..\""));
}

#[test]
fn config_without_flags_shows_defaults() {
    let home = TempDir::new().unwrap();
    otpbox(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cells:       6"))
        .stdout(predicate::str::contains("Saved").not());
}
