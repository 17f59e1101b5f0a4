//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the subdirectory recordings are written to
pub const DEFAULT_DIRECTORY_NAME: &str = "VoiceRecorder";

/// Default MP3 bitrate passed to ffmpeg
pub const DEFAULT_BITRATE: &str = "128k";

/// Default ffmpeg input format for the current platform
#[cfg(target_os = "macos")]
pub const DEFAULT_INPUT_FORMAT: &str = "avfoundation";
#[cfg(target_os = "windows")]
pub const DEFAULT_INPUT_FORMAT: &str = "dshow";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub const DEFAULT_INPUT_FORMAT: &str = "pulse";

/// Default ffmpeg input device for the current platform
#[cfg(target_os = "macos")]
pub const DEFAULT_INPUT_DEVICE: &str = ":0";
#[cfg(target_os = "windows")]
pub const DEFAULT_INPUT_DEVICE: &str = "audio=default";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub const DEFAULT_INPUT_DEVICE: &str = "default";

/// FFmpeg capture settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FfmpegConfig {
    pub input_format: Option<String>,
    pub input_device: Option<String>,
    pub bitrate: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub output_root: Option<String>,
    pub directory_name: Option<String>,
    pub notify: Option<bool>,
    pub permission_prompt: Option<bool>,
    pub ffmpeg: Option<FfmpegConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            output_root: None,
            directory_name: Some(DEFAULT_DIRECTORY_NAME.to_string()),
            notify: Some(false),
            permission_prompt: Some(true),
            ffmpeg: Some(FfmpegConfig {
                input_format: Some(DEFAULT_INPUT_FORMAT.to_string()),
                input_device: Some(DEFAULT_INPUT_DEVICE.to_string()),
                bitrate: Some(DEFAULT_BITRATE.to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            output_root: other.output_root.or(self.output_root),
            directory_name: other.directory_name.or(self.directory_name),
            notify: other.notify.or(self.notify),
            permission_prompt: other.permission_prompt.or(self.permission_prompt),
            ffmpeg: Self::merge_ffmpeg_config(self.ffmpeg, other.ffmpeg),
        }
    }

    /// Merge ffmpeg config sections
    fn merge_ffmpeg_config(
        base: Option<FfmpegConfig>,
        other: Option<FfmpegConfig>,
    ) -> Option<FfmpegConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(FfmpegConfig {
                input_format: o.input_format.or(b.input_format),
                input_device: o.input_device.or(b.input_device),
                bitrate: o.bitrate.or(b.bitrate),
            }),
        }
    }

    /// Get the configured output root, if any
    pub fn output_root(&self) -> Option<PathBuf> {
        self.output_root
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    /// Get the recordings subdirectory name, or "VoiceRecorder" if not set
    pub fn directory_name_or_default(&self) -> &str {
        self.directory_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DIRECTORY_NAME)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get permission prompt setting, or true if not set
    pub fn permission_prompt_or_default(&self) -> bool {
        self.permission_prompt.unwrap_or(true)
    }

    /// Get ffmpeg input format, or the platform default
    pub fn input_format_or_default(&self) -> &str {
        self.ffmpeg
            .as_ref()
            .and_then(|f| f.input_format.as_deref())
            .unwrap_or(DEFAULT_INPUT_FORMAT)
    }

    /// Get ffmpeg input device, or the platform default
    pub fn input_device_or_default(&self) -> &str {
        self.ffmpeg
            .as_ref()
            .and_then(|f| f.input_device.as_deref())
            .unwrap_or(DEFAULT_INPUT_DEVICE)
    }

    /// Get MP3 bitrate, or "128k" if not set
    pub fn bitrate_or_default(&self) -> &str {
        self.ffmpeg
            .as_ref()
            .and_then(|f| f.bitrate.as_deref())
            .unwrap_or(DEFAULT_BITRATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.output_root.is_none());
        assert_eq!(config.directory_name, Some("VoiceRecorder".to_string()));
        assert_eq!(config.notify, Some(false));
        assert_eq!(config.permission_prompt, Some(true));
        let ffmpeg = config.ffmpeg.as_ref().unwrap();
        assert_eq!(ffmpeg.bitrate, Some("128k".to_string()));
        assert_eq!(ffmpeg.input_format.as_deref(), Some(DEFAULT_INPUT_FORMAT));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.output_root.is_none());
        assert!(config.directory_name.is_none());
        assert!(config.notify.is_none());
        assert!(config.permission_prompt.is_none());
        assert!(config.ffmpeg.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            output_root: Some("/base".to_string()),
            directory_name: Some("Base".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            output_root: Some("/other".to_string()),
            directory_name: None,
            notify: Some(true),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.output_root, Some("/other".to_string()));
        assert_eq!(merged.directory_name, Some("Base".to_string()));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn merge_ffmpeg_fields_individually() {
        let base = AppConfig::defaults();
        let other = AppConfig {
            ffmpeg: Some(FfmpegConfig {
                bitrate: Some("64k".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.bitrate_or_default(), "64k");
        assert_eq!(merged.input_format_or_default(), DEFAULT_INPUT_FORMAT);
    }

    #[test]
    fn accessor_defaults_on_empty() {
        let config = AppConfig::empty();
        assert!(config.output_root().is_none());
        assert_eq!(config.directory_name_or_default(), "VoiceRecorder");
        assert!(!config.notify_or_default());
        assert!(config.permission_prompt_or_default());
        assert_eq!(config.input_device_or_default(), DEFAULT_INPUT_DEVICE);
        assert_eq!(config.bitrate_or_default(), "128k");
    }

    #[test]
    fn empty_strings_fall_back() {
        let config = AppConfig {
            output_root: Some(String::new()),
            directory_name: Some(String::new()),
            ..Default::default()
        };
        assert!(config.output_root().is_none());
        assert_eq!(config.directory_name_or_default(), "VoiceRecorder");
    }
}
