//! Interactive screen tests driving the binary through stdin

use assert_cmd::Command;
use predicates::prelude::*;

fn screen() -> Command {
    let mut cmd = Command::cargo_bin("voice-recorder").unwrap();
    cmd.env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .arg("--no-prompt");
    cmd
}

#[test]
fn shows_ready_screen_and_quits() {
    screen()
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Ready"))
        .stdout(predicate::str::contains("[start] [stop] [play]"));
}

#[test]
fn play_without_recording() {
    screen()
        .write_stdin("play\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recording to play"));
}

#[test]
fn stop_without_recording_changes_nothing() {
    screen()
        .write_stdin("stop\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("state: idle"))
        .stdout(predicate::str::contains("last recording: (none)"))
        .stdout(predicate::str::contains("Recording stopped").not());
}

#[test]
fn unknown_command_is_reported() {
    screen()
        .write_stdin("rewind\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command 'rewind'"));
}

#[test]
fn end_of_input_exits_cleanly() {
    screen().write_stdin("").assert().success();
}
