//! Object storage abstraction
//!
//! Submitted files are copied into an object store under a string key. The
//! validation pipeline later pulls an object back into a temporary directory,
//! reads it, and removes the directory.

use crate::domain::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Location of an object fetched by [`Storage::download_temp`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    /// Temporary directory owning the download; pass it to
    /// [`Storage::cleanup_temp_dir`] when done
    pub temp_dir: PathBuf,

    /// Path of the downloaded content inside `temp_dir`
    pub extracted_dir: PathBuf,
}

/// Object storage port
#[async_trait]
pub trait Storage: Send + Sync {
    /// Copy the local file at `source` into storage under `destination`
    ///
    /// Returns `Ok(false)` if the source file cannot be read.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the store rejects the write.
    async fn upload(&self, source: &str, destination: &str) -> Result<bool>;

    /// Reference URL for an object key
    ///
    /// The key does not have to exist yet.
    async fn get_file_url(&self, key: &str) -> Result<String>;

    /// Fetch an object into a fresh temporary directory
    ///
    /// Returns `Ok(None)` if no object is stored under `key`.
    async fn download_temp(&self, key: &str) -> Result<Option<DownloadResult>>;

    /// Remove a directory previously returned by [`Storage::download_temp`]
    async fn cleanup_temp_dir(&self, temp_dir: &Path) -> Result<()>;
}
