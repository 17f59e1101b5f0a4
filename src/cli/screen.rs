//! Interactive recorder screen: typed commands and the terminal view

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::application::ports::RecorderView;
use crate::domain::session::{Controls, Status};

use super::presenter::Presenter;

/// A command typed on the recorder screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    Start,
    Stop,
    Play,
    Status,
    Help,
    Quit,
}

/// Input line that is not a screen command
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown command '{0}'. Type 'help' for the list of commands")]
pub struct UnknownCommand(pub String);

impl FromStr for ScreenCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" | "s" | "record" | "r" => Ok(Self::Start),
            "stop" | "x" => Ok(Self::Stop),
            "play" | "p" => Ok(Self::Play),
            "status" | "?" => Ok(Self::Status),
            "help" | "h" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

/// Terminal rendering of the recorder controls and status
pub struct TerminalView {
    presenter: Arc<Presenter>,
    shown_controls: Mutex<Option<Controls>>,
}

impl TerminalView {
    /// Create a view drawing through the given presenter
    pub fn new(presenter: Arc<Presenter>) -> Self {
        Self {
            presenter,
            shown_controls: Mutex::new(None),
        }
    }

    /// Record the controls as shown, returning whether they changed
    fn controls_changed(&self, controls: Controls) -> bool {
        let mut shown = self
            .shown_controls
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if *shown == Some(controls) {
            return false;
        }
        *shown = Some(controls);
        true
    }
}

impl RecorderView for TerminalView {
    fn set_controls(&self, controls: Controls) {
        if self.controls_changed(controls) {
            self.presenter.controls(controls);
        }
    }

    fn show_status(&self, status: &Status) {
        self.presenter.status(status);
    }

    fn alert(&self, message: &str) {
        self.presenter.alert(message);
    }
}
