//! Media capture and playback port interfaces

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::error::{CaptureError, PlaybackError};
use crate::domain::recording::RecordingLocation;

/// Resolves exactly once when a capture or playback ends.
///
/// A dropped sender is treated as a failure by the controller.
pub type Completion<E> = oneshot::Receiver<Result<(), E>>;

/// Port for the native audio capture facility
#[async_trait]
pub trait MediaCapture: Send + Sync {
    /// Begin capturing audio into `location`.
    ///
    /// # Returns
    /// A completion that resolves when the capture ends, either because
    /// `stop_capture` was called or because the facility gave up.
    async fn start_capture(
        &self,
        location: &RecordingLocation,
    ) -> Result<Completion<CaptureError>, CaptureError>;

    /// Ask the running capture to finish and finalize its file.
    ///
    /// Returns once the capture has stopped writing, so the file can be
    /// played right after.
    async fn stop_capture(&self) -> Result<(), CaptureError>;
}

/// Port for the native audio playback facility
#[async_trait]
pub trait MediaPlayer: Send + Sync {
    /// Begin playing the file at `location`.
    ///
    /// # Returns
    /// A completion that resolves when playback ends
    async fn play(
        &self,
        location: &RecordingLocation,
    ) -> Result<Completion<PlaybackError>, PlaybackError>;
}
