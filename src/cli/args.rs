//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::config::AppConfig;
use crate::infrastructure::FfmpegSettings;

/// Voice Recorder - record the microphone to MP3 and play it back
#[derive(Parser, Debug)]
#[command(name = "voice-recorder")]
#[command(version)]
#[command(about = "Record audio from the microphone to MP3 and play it back")]
#[command(long_about = None)]
pub struct Cli {
    /// Root directory recordings are stored under
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_root: Option<String>,

    /// Name of the recordings subdirectory
    #[arg(long, value_name = "NAME")]
    pub directory_name: Option<String>,

    /// Show alerts as desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Skip the permission prompt and probe the input device instead
    #[arg(long)]
    pub no_prompt: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config overrides given on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            output_root: self.output_root.clone(),
            directory_name: self.directory_name.clone(),
            notify: self.notify.then_some(true),
            permission_prompt: self.no_prompt.then_some(false),
            ffmpeg: None,
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Resolved options for the recorder screen
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    pub output_root: Option<PathBuf>,
    pub directory_name: String,
    pub notify: bool,
    pub permission_prompt: bool,
    pub ffmpeg: FfmpegSettings,
}

impl ScreenOptions {
    /// Resolve options from a merged config
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            output_root: config.output_root(),
            directory_name: config.directory_name_or_default().to_string(),
            notify: config.notify_or_default(),
            permission_prompt: config.permission_prompt_or_default(),
            ffmpeg: FfmpegSettings::from_config(config),
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "output_root",
    "directory_name",
    "notify",
    "permission_prompt",
    "ffmpeg.input_format",
    "ffmpeg.input_device",
    "ffmpeg.bitrate",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["voice-recorder"]);
        assert!(cli.output_root.is_none());
        assert!(cli.directory_name.is_none());
        assert!(!cli.notify);
        assert!(!cli.no_prompt);
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["voice-recorder", "-n", "--no-prompt", "-vv"]);
        assert!(cli.notify);
        assert!(cli.no_prompt);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parses_output_root() {
        let cli = Cli::parse_from(["voice-recorder", "-o", "/tmp/rec"]);
        assert_eq!(cli.output_root, Some("/tmp/rec".to_string()));
    }

    #[test]
    fn unset_flags_do_not_override_config() {
        let cli = Cli::parse_from(["voice-recorder"]);
        let config = cli.to_config();
        assert!(config.notify.is_none());
        assert!(config.permission_prompt.is_none());
        assert!(config.output_root.is_none());
    }

    #[test]
    fn no_prompt_disables_permission_prompt() {
        let cli = Cli::parse_from(["voice-recorder", "--no-prompt"]);
        assert_eq!(cli.to_config().permission_prompt, Some(false));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["voice-recorder", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["voice-recorder", "config", "set", "ffmpeg.bitrate", "192k"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "ffmpeg.bitrate");
            assert_eq!(value, "192k");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn screen_options_use_defaults() {
        let options = ScreenOptions::from_config(&AppConfig::defaults());
        assert_eq!(options.directory_name, "VoiceRecorder");
        assert!(!options.notify);
        assert!(options.permission_prompt);
        assert_eq!(options.ffmpeg.bitrate, "128k");
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("output_root"));
        assert!(is_valid_config_key("ffmpeg.input_device"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
