//! Local filesystem storage
//!
//! Objects are plain files under a base directory, named by their key.

use super::traits::{DownloadResult, Storage};
use crate::domain::{NadError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use url::{form_urlencoded, Url};
use uuid::Uuid;

/// Storage backed by a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a store rooted at `base_path`
    ///
    /// Relative paths are resolved against the current directory so that file
    /// URLs are always absolute. The directory is created on first upload.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        let base_path = if base_path.is_absolute() {
            base_path
        } else {
            std::env::current_dir()?.join(base_path)
        };
        Ok(Self { base_path })
    }

    /// Root directory of the store
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        Ok(self.base_path.join(object_file_name(key)?))
    }
}

/// File name an object key is stored under
///
/// Keys are form-urlencoded into a single path component, so a key may contain
/// path separators without escaping the store.
pub(crate) fn object_file_name(key: &str) -> Result<String> {
    if key.is_empty() || key == "." || key == ".." {
        return Err(NadError::Storage(format!("Invalid object key: '{key}'")));
    }
    Ok(form_urlencoded::byte_serialize(key.as_bytes()).collect())
}

/// Create a uniquely named directory under the system temp dir
pub(crate) async fn create_temp_dir() -> Result<PathBuf> {
    let temp_dir = std::env::temp_dir().join(format!("nad_ch_{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(&temp_dir).await?;
    Ok(temp_dir)
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, source: &str, destination: &str) -> Result<bool> {
        let target = self.object_path(destination)?;

        if !tokio::fs::try_exists(source).await.unwrap_or(false) {
            tracing::error!(source = %source, "Upload source does not exist");
            return Ok(false);
        }

        tokio::fs::create_dir_all(&self.base_path).await?;
        tokio::fs::copy(source, &target)
            .await
            .map_err(|e| NadError::Storage(format!("Failed to upload {source}: {e}")))?;

        tracing::debug!(source = %source, key = %destination, "Uploaded object");
        Ok(true)
    }

    async fn get_file_url(&self, key: &str) -> Result<String> {
        let path = self.object_path(key)?;
        Url::from_file_path(&path)
            .map(|url| url.to_string())
            .map_err(|_| NadError::Storage(format!("Cannot build URL for {}", path.display())))
    }

    async fn download_temp(&self, key: &str) -> Result<Option<DownloadResult>> {
        let source = self.object_path(key)?;
        if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
            return Ok(None);
        }

        let temp_dir = create_temp_dir().await?;
        let extracted_dir = temp_dir.join(object_file_name(key)?);
        tokio::fs::copy(&source, &extracted_dir)
            .await
            .map_err(|e| NadError::Storage(format!("Failed to download {key}: {e}")))?;

        Ok(Some(DownloadResult {
            temp_dir,
            extracted_dir,
        }))
    }

    async fn cleanup_temp_dir(&self, temp_dir: &Path) -> Result<()> {
        if tokio::fs::try_exists(temp_dir).await.unwrap_or(false) {
            tokio::fs::remove_dir_all(temp_dir).await?;
        }
        Ok(())
    }
}
