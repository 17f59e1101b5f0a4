//! CLI integration tests

use std::process::Command;

fn voice_recorder_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_voice-recorder"));
    // Keep the user's real config out of the way
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("voice-recorder-tests"))
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0");
    cmd
}

#[test]
fn help_output() {
    let output = voice_recorder_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("microphone"));
    assert!(stdout.contains("--output-root"));
    assert!(stdout.contains("--notify"));
    assert!(stdout.contains("--no-prompt"));
    assert!(stdout.contains("--verbose"));
}

#[test]
fn version_output() {
    let output = voice_recorder_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("voice-recorder"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let output = voice_recorder_bin()
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("voice-recorder"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let output = voice_recorder_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn config_set_then_get() {
    let home = tempfile::tempdir().unwrap();

    let output = voice_recorder_bin()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "set", "ffmpeg.bitrate", "192k"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let output = voice_recorder_bin()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "get", "ffmpeg.bitrate"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "192k");
}

#[test]
fn config_list_shows_every_key() {
    let home = tempfile::tempdir().unwrap();

    let output = voice_recorder_bin()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in [
        "output_root",
        "directory_name",
        "notify",
        "permission_prompt",
        "ffmpeg.input_format",
        "ffmpeg.input_device",
        "ffmpeg.bitrate",
    ] {
        assert!(stdout.contains(key), "missing {} in: {}", key, stdout);
    }
}
