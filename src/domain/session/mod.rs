//! Recorder session domain module

mod state;
mod status;

pub use state::{CaptureOutcome, RecorderPhase, RecorderSession, SessionSnapshot};
pub use status::{Controls, Status};
