//! Output directory port interface

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::error::DirectoryError;

/// Port for resolving and preparing the recordings directory
#[async_trait]
pub trait OutputDirectory: Send + Sync {
    /// Resolve the externally accessible root recordings live under.
    async fn resolve_root(&self) -> Result<PathBuf, DirectoryError>;

    /// Create `name` under `root` if absent and return its absolute path.
    ///
    /// Idempotent: an existing directory is returned as-is.
    async fn get_or_create_subdirectory(
        &self,
        root: &Path,
        name: &str,
    ) -> Result<PathBuf, DirectoryError>;
}
