//! Domain error types

use thiserror::Error;

/// Error when the output directory cannot be prepared
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Output root unavailable: {0}")]
    RootUnavailable(String),

    #[error("Failed to create directory '{path}': {message}")]
    CreateFailed { path: String, message: String },
}

/// Error when audio capture permission cannot be obtained
#[derive(Debug, Clone, Error)]
pub enum PermissionError {
    #[error("Audio permission denied")]
    Denied,

    #[error("No permission method available")]
    Unavailable,

    #[error("Capture probe failed: {0}")]
    ProbeFailed(String),

    #[error("Permission check failed: {0}")]
    CheckFailed(String),
}

/// Error reported by the capture facility
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("ffmpeg not found. Please install ffmpeg.")]
    FfmpegNotFound,

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Failed to stop capture: {0}")]
    StopFailed(String),

    #[error("Capture failed: {0}")]
    Failed(String),

    #[error("No capture in progress")]
    NotCapturing,
}

/// Error reported by the playback facility
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Failed to open '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),

    #[error("Audio output error: {0}")]
    Failed(String),
}

/// Error from the start sequence, before capture is running
#[derive(Debug, Clone, Error)]
pub enum RecorderError {
    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_message() {
        assert_eq!(PermissionError::Denied.to_string(), "Audio permission denied");
        assert_eq!(
            PermissionError::Unavailable.to_string(),
            "No permission method available"
        );
    }

    #[test]
    fn playback_failure_text_does_not_repeat_alert_prefix() {
        let err = PlaybackError::Failed("sink closed".to_string());
        assert_eq!(err.to_string(), "Audio output error: sink closed");
    }

    #[test]
    fn recorder_error_is_transparent() {
        let err: RecorderError = DirectoryError::RootUnavailable("no data dir".to_string()).into();
        assert_eq!(err.to_string(), "Output root unavailable: no data dir");
    }

    #[test]
    fn directory_error_includes_path() {
        let err = DirectoryError::CreateFailed {
            path: "/data/VoiceRecorder".to_string(),
            message: "read-only file system".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/VoiceRecorder"));
        assert!(msg.contains("read-only"));
    }
}
