//! Application layer - Use cases and port interfaces
//!
//! Contains the recording session controller and the trait definitions
//! for external system interactions.

pub mod permission;
pub mod ports;
pub mod recorder;

// Re-export use cases
pub use permission::PermissionGate;
pub use recorder::{PlayOutcome, RecorderConfig, RecordingSessionController, StartOutcome};
