//! User-visible status and control state

use std::fmt;

/// Enabled state of the three screen controls.
///
/// Controls are guidance for the user only. The controller never refuses
/// an operation because its control is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub play: bool,
}

impl Controls {
    /// Nothing playable yet, or the last capture failed
    pub const IDLE: Self = Self {
        start: true,
        stop: false,
        play: false,
    };

    /// A capture is being set up or is running
    pub const RECORDING: Self = Self {
        start: false,
        stop: true,
        play: false,
    };

    /// A recording exists and can be played
    pub const PLAYABLE: Self = Self {
        start: true,
        stop: false,
        play: true,
    };
}

impl Default for Controls {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Status line shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    AlreadyRecording,
    Recording,
    Saved,
    Failed,
    Stopped,
    Playing,
    PlaybackFinished,
    PlaybackFailed,
    NothingToPlay,
    Error(String),
}

impl Status {
    /// Whether this status reports a problem
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed | Self::PlaybackFailed | Self::Error(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready"),
            Self::AlreadyRecording => write!(f, "Already recording"),
            Self::Recording => write!(f, "Recording..."),
            Self::Saved => write!(f, "Recording saved"),
            Self::Failed => write!(f, "Recording failed"),
            Self::Stopped => write!(f, "Recording stopped"),
            Self::Playing => write!(f, "Playing..."),
            Self::PlaybackFinished => write!(f, "Playback finished"),
            Self::PlaybackFailed => write!(f, "Playback failed"),
            Self::NothingToPlay => write!(f, "No recording to play"),
            Self::Error(message) => write!(f, "Error: {}", message),
        }
    }
}
