//! Recording location value object

use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix of every recording file name
pub const RECORDING_FILE_PREFIX: &str = "recording_";

/// Extension of every recording file
pub const RECORDING_FILE_EXTENSION: &str = "mp3";

/// Where a single recording is written.
///
/// Built from the output directory and a millisecond timestamp as
/// `<dir>/recording_<millis>.mp3`. Two locations built from the same
/// directory and millisecond are equal, so a second capture started within
/// the same millisecond overwrites the first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingLocation {
    path: PathBuf,
}

impl RecordingLocation {
    /// Build the location for a capture started at `timestamp_ms`
    pub fn at(directory: &Path, timestamp_ms: u64) -> Self {
        Self {
            path: directory.join(Self::file_name(timestamp_ms)),
        }
    }

    /// File name for a capture started at `timestamp_ms`
    pub fn file_name(timestamp_ms: u64) -> String {
        format!(
            "{}{}.{}",
            RECORDING_FILE_PREFIX, timestamp_ms, RECORDING_FILE_EXTENSION
        )
    }

    /// The absolute path of the recording
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for RecordingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for RecordingLocation {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_format() {
        assert_eq!(
            RecordingLocation::file_name(1_700_000_000_123),
            "recording_1700000000123.mp3"
        );
    }

    #[test]
    fn location_joins_directory() {
        let loc = RecordingLocation::at(Path::new("/data/VoiceRecorder"), 42);
        assert_eq!(
            loc.path(),
            Path::new("/data/VoiceRecorder/recording_42.mp3")
        );
    }

    #[test]
    fn same_millisecond_collides() {
        let dir = Path::new("/data/VoiceRecorder");
        assert_eq!(
            RecordingLocation::at(dir, 1000),
            RecordingLocation::at(dir, 1000)
        );
        assert_ne!(
            RecordingLocation::at(dir, 1000),
            RecordingLocation::at(dir, 1001)
        );
    }

    #[test]
    fn display_is_path() {
        let loc = RecordingLocation::at(Path::new("/tmp"), 7);
        assert_eq!(loc.to_string(), "/tmp/recording_7.mp3");
    }
}
