//! Rodio-based playback adapter

use std::fs::File;
use std::io::BufReader;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::oneshot;

use crate::application::ports::{Completion, MediaPlayer};
use crate::domain::error::PlaybackError;
use crate::domain::recording::RecordingLocation;

/// Plays recordings on the default output device using rodio
pub struct RodioPlayer;

impl RodioPlayer {
    /// Create a new rodio player
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Play a file to the end (called from spawn_blocking)
fn play_file_sync(file: File) -> Result<(), PlaybackError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;

    let sink =
        Sink::try_new(&stream_handle).map_err(|e| PlaybackError::Failed(e.to_string()))?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| PlaybackError::DecodeFailed(e.to_string()))?;

    sink.append(source);
    sink.sleep_until_end();

    Ok(())
}

#[async_trait]
impl MediaPlayer for RodioPlayer {
    async fn play(
        &self,
        location: &RecordingLocation,
    ) -> Result<Completion<PlaybackError>, PlaybackError> {
        let file = tokio::fs::File::open(location.path())
            .await
            .map_err(|e| PlaybackError::OpenFailed {
                path: location.to_string(),
                message: e.to_string(),
            })?
            .into_std()
            .await;

        let (tx, rx) = oneshot::channel();
        // The output stream is not Send, so it lives entirely on a blocking thread
        tokio::task::spawn_blocking(move || {
            let _ = tx.send(play_file_sync(file));
        });

        Ok(rx)
    }
}
