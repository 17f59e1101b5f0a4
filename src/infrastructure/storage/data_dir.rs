//! Platform data directory adapter

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::OutputDirectory;
use crate::domain::error::DirectoryError;

/// Name of the per-application folder under the platform data directory
const APP_DIR_NAME: &str = "voice-recorder";

/// Output directory rooted in the platform data directory
/// (`~/.local/share/voice-recorder` on Linux) or a user-chosen root.
pub struct DataDirectory {
    root: Option<PathBuf>,
    /// The default root belongs to us and may be created on first use;
    /// a user-chosen root must already exist.
    owned: bool,
}

impl DataDirectory {
    /// Create with the platform default root
    pub fn new() -> Self {
        Self {
            root: dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)),
            owned: true,
        }
    }

    /// Create with a user-chosen root
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            owned: false,
        }
    }

    /// The root this adapter resolves, if known
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

impl Default for DataDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputDirectory for DataDirectory {
    async fn resolve_root(&self) -> Result<PathBuf, DirectoryError> {
        let root = self.root.as_ref().ok_or_else(|| {
            DirectoryError::RootUnavailable("platform data directory not found".to_string())
        })?;

        if self.owned {
            fs::create_dir_all(root)
                .await
                .map_err(|e| DirectoryError::RootUnavailable(format!("{}: {}", root.display(), e)))?;
        }

        let metadata = fs::metadata(root)
            .await
            .map_err(|e| DirectoryError::RootUnavailable(format!("{}: {}", root.display(), e)))?;
        if !metadata.is_dir() {
            return Err(DirectoryError::RootUnavailable(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        fs::canonicalize(root)
            .await
            .map_err(|e| DirectoryError::RootUnavailable(format!("{}: {}", root.display(), e)))
    }

    async fn get_or_create_subdirectory(
        &self,
        root: &Path,
        name: &str,
    ) -> Result<PathBuf, DirectoryError> {
        let dir = root.join(name);
        let create_failed = |message: String| DirectoryError::CreateFailed {
            path: dir.to_string_lossy().to_string(),
            message,
        };

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| create_failed(e.to_string()))?;

        let metadata = fs::metadata(&dir)
            .await
            .map_err(|e| create_failed(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(create_failed("exists and is not a directory".to_string()));
        }

        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_root_is_under_data_dir() {
        let store = DataDirectory::new();
        if let Some(root) = store.root() {
            assert!(root.ends_with("voice-recorder"));
        }
    }

    #[tokio::test]
    async fn creates_subdirectory_once() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DataDirectory::with_root(tmp.path());

        let root = store.resolve_root().await.unwrap();
        let first = store
            .get_or_create_subdirectory(&root, "VoiceRecorder")
            .await
            .unwrap();
        let second = store
            .get_or_create_subdirectory(&root, "VoiceRecorder")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert!(first.is_dir());
        assert!(first.is_absolute());
        assert!(first.ends_with("VoiceRecorder"));
    }

    #[tokio::test]
    async fn missing_custom_root_is_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DataDirectory::with_root(tmp.path().join("missing"));

        let err = store.resolve_root().await.unwrap_err();
        assert!(matches!(err, DirectoryError::RootUnavailable(_)));
    }

    #[tokio::test]
    async fn file_in_place_of_subdirectory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("VoiceRecorder"), b"not a dir").unwrap();
        let store = DataDirectory::with_root(tmp.path());

        let root = store.resolve_root().await.unwrap();
        let err = store
            .get_or_create_subdirectory(&root, "VoiceRecorder")
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::CreateFailed { .. }));
    }

    #[tokio::test]
    async fn root_that_is_a_file_is_unavailable() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let store = DataDirectory::with_root(tmp.path());

        let err = store.resolve_root().await.unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
