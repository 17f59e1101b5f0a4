//! CLI presenter for output formatting

use colored::*;

use crate::domain::session::{Controls, SessionSnapshot, Status};

/// Presenter for CLI output formatting.
///
/// The recorder screen (status line, controls) goes to stdout;
/// diagnostics go to stderr.
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the status line
    pub fn status(&self, status: &Status) {
        let text = status.to_string();
        let styled = match status {
            s if s.is_error() => text.red(),
            Status::Recording => text.red().bold(),
            Status::Saved | Status::PlaybackFinished => text.green(),
            Status::Playing => text.cyan(),
            _ => text.normal(),
        };
        println!("{} {}", "●".cyan(), styled);
    }

    /// Print the control bar
    pub fn controls(&self, controls: Controls) {
        println!("  {}", Self::format_controls(controls));
    }

    /// Print a prominent alert
    pub fn alert(&self, message: &str) {
        eprintln!("{} {}", "!".red().bold(), message.red().bold());
    }

    /// Print the full session state
    pub fn snapshot(&self, snapshot: &SessionSnapshot) {
        self.key_value("state", snapshot.phase.as_str());
        self.key_value("recording", &snapshot.is_recording.to_string());
        self.key_value(
            "last recording",
            &snapshot
                .last_recording
                .as_ref()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "(none)".to_string()),
        );
        self.status(&snapshot.status);
        self.controls(snapshot.controls);
    }

    /// Print the list of screen commands
    pub fn help(&self) {
        println!("{}", "Commands:".bold());
        println!("  {}   start recording", "start (s)".cyan());
        println!("  {}    stop recording", "stop (x)".cyan());
        println!("  {}    play the last recording", "play (p)".cyan());
        println!("  {}  show recorder state", "status (?)".cyan());
        println!("  {}    show this help", "help (h)".cyan());
        println!("  {}    quit", "quit (q)".cyan());
    }

    /// Format the control bar, dimming disabled controls
    pub fn format_controls(controls: Controls) -> String {
        let render = |label: &str, enabled: bool| {
            let text = format!("[{}]", label);
            if enabled {
                text.bold().to_string()
            } else {
                text.dimmed().to_string()
            }
        };
        format!(
            "{} {} {}",
            render("start", controls.start),
            render("stop", controls.stop),
            render("play", controls.play)
        )
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
