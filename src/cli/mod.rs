//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! the interactive recorder screen and its runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod screen;
pub mod signals;

// Re-export commonly used types
pub use app::{
    init_logging, load_merged_config, run_screen, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction, ScreenOptions};
pub use config_cmd::handle_config_command;
pub use presenter::Presenter;
pub use screen::{ScreenCommand, TerminalView};
