//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with ffmpeg, rodio, cpal, the filesystem and the desktop.

pub mod clock;
pub mod config;
pub mod media;
pub mod notification;
pub mod permission;
pub mod storage;

// Re-export adapters
pub use clock::SystemClock;
pub use config::XdgConfigStore;
pub use media::{FfmpegCapture, FfmpegSettings, RodioPlayer};
pub use notification::{create_notifier, NoOpNotifier, NotifyRustNotifier};
pub use permission::{AnswerSlot, CpalCaptureProbe, TerminalPermissionPrompt};
pub use storage::DataDirectory;
