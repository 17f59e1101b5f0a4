//! Media infrastructure module
//!
//! Capture goes through an ffmpeg child process that encodes MP3 directly;
//! playback decodes with rodio on a blocking thread.

mod ffmpeg_capture;
mod rodio_player;

pub use ffmpeg_capture::{FfmpegCapture, FfmpegSettings};
pub use rodio_player::RodioPlayer;
