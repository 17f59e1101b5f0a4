//! Permission infrastructure module
//!
//! Provides the interactive terminal prompt as the permission facility and
//! a cpal device probe as the fallback when prompting is not possible.

mod cpal_probe;
mod terminal_prompt;

pub use cpal_probe::CpalCaptureProbe;
pub use terminal_prompt::{AnswerSlot, TerminalPermissionPrompt};
