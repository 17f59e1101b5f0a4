//! Recorder view port interface

use crate::domain::session::{Controls, Status};

/// Port for the screen showing the recorder controls and status.
///
/// Calls are cheap and never block; implementations render immediately.
pub trait RecorderView: Send + Sync {
    /// Update which controls are enabled
    fn set_controls(&self, controls: Controls);

    /// Replace the status line
    fn show_status(&self, status: &Status);

    /// Show a prominent error message
    fn alert(&self, message: &str);
}
