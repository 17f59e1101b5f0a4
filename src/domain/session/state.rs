//! Recorder session state

use std::fmt;

use super::status::{Controls, Status};
use crate::domain::recording::RecordingLocation;

/// Recorder phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecorderPhase {
    #[default]
    Idle,
    /// Permission and directory work in flight
    Starting,
    Recording,
    /// Native stop call in flight
    Stopping,
}

impl RecorderPhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Recording => "recording",
            Self::Stopping => "stopping",
        }
    }
}

impl fmt::Display for RecorderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a capture ended, as reported by the capture facility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Saved,
    Failed,
}

/// Point-in-time copy of the session, for display and inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: RecorderPhase,
    pub is_recording: bool,
    pub last_recording: Option<RecordingLocation>,
    pub controls: Controls,
    pub status: Status,
}

/// Recorder session entity.
///
/// Holds everything the screen knows: the recording flag, the last
/// recording location, the current controls and status line.
///
/// State machine:
///   IDLE -> STARTING (begin_start)
///   STARTING -> IDLE (abort_start)
///   STARTING -> RECORDING (capture_started)
///   RECORDING -> STOPPING (begin_stop)
///   STOPPING -> IDLE (finish_stop)
///   RECORDING -> IDLE (complete_capture, current generation only)
///
/// Every capture gets a new generation. A completion carrying a generation
/// other than the active one is stale and leaves the session untouched.
#[derive(Debug, Default)]
pub struct RecorderSession {
    phase: RecorderPhase,
    is_recording: bool,
    last_recording: Option<RecordingLocation>,
    generation: u64,
    active_capture: Option<u64>,
    controls: Controls,
    status: Status,
}

impl RecorderSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current phase
    pub fn phase(&self) -> RecorderPhase {
        self.phase
    }

    /// Check if a capture is running
    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Location of the most recent successfully started capture
    pub fn last_recording(&self) -> Option<&RecordingLocation> {
        self.last_recording.as_ref()
    }

    /// Current control state
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Current status line
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Copy the observable state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            is_recording: self.is_recording,
            last_recording: self.last_recording.clone(),
            controls: self.controls,
            status: self.status.clone(),
        }
    }

    /// Replace the status line
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Replace the control state
    pub fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    /// Transition from IDLE to STARTING.
    ///
    /// Returns false (and changes nothing) if another start or a capture
    /// already owns the session.
    pub fn begin_start(&mut self) -> bool {
        if self.phase != RecorderPhase::Idle {
            return false;
        }
        self.phase = RecorderPhase::Starting;
        true
    }

    /// Transition from STARTING back to IDLE after a failed start
    pub fn abort_start(&mut self, message: impl Into<String>) {
        if self.phase == RecorderPhase::Starting {
            self.phase = RecorderPhase::Idle;
        }
        self.is_recording = false;
        self.controls = Controls::IDLE;
        self.status = Status::Error(message.into());
    }

    /// Transition from STARTING to RECORDING once the capture is running.
    ///
    /// Returns the generation assigned to this capture.
    pub fn capture_started(&mut self, location: RecordingLocation) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.active_capture = Some(self.generation);
        self.phase = RecorderPhase::Recording;
        self.is_recording = true;
        self.last_recording = Some(location);
        self.controls = Controls::RECORDING;
        self.status = Status::Recording;
        self.generation
    }

    /// Transition from RECORDING to STOPPING.
    ///
    /// Returns the generation being stopped, or None when there is nothing
    /// to stop.
    pub fn begin_stop(&mut self) -> Option<u64> {
        if self.phase != RecorderPhase::Recording || !self.is_recording {
            return None;
        }
        let generation = self.active_capture?;
        self.phase = RecorderPhase::Stopping;
        Some(generation)
    }

    /// Transition from STOPPING to IDLE
    pub fn finish_stop(&mut self) {
        self.phase = RecorderPhase::Idle;
        self.is_recording = false;
        self.active_capture = None;
        self.controls = Controls::PLAYABLE;
        self.status = Status::Stopped;
    }

    /// Apply a capture completion.
    ///
    /// Returns false if the completion is stale (superseded by a stop or a
    /// newer capture) and was ignored.
    pub fn complete_capture(&mut self, generation: u64, outcome: CaptureOutcome) -> bool {
        if self.active_capture != Some(generation) || self.phase != RecorderPhase::Recording {
            return false;
        }
        self.phase = RecorderPhase::Idle;
        self.is_recording = false;
        self.active_capture = None;
        match outcome {
            CaptureOutcome::Saved => {
                self.controls = Controls::PLAYABLE;
                self.status = Status::Saved;
            }
            CaptureOutcome::Failed => {
                self.controls = Controls::IDLE;
                self.status = Status::Failed;
            }
        }
        true
    }
}
