//! In-memory object storage
//!
//! Object bytes are kept in a map keyed by object key. Downloads are still
//! written to a real temporary directory so that readers can open them.

use crate::adapters::storage::local::{create_temp_dir, object_file_name};
use crate::adapters::storage::{DownloadResult, Storage};
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;

/// Storage that never touches a persistent medium
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` directly under `key`
    pub async fn put(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.objects.write().await.insert(key.into(), bytes.into());
    }

    /// Stored keys in sorted order
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    /// Returns `true` if an object is stored under `key`
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn upload(&self, source: &str, destination: &str) -> Result<bool> {
        object_file_name(destination)?;
        match tokio::fs::read(source).await {
            Ok(bytes) => {
                self.put(destination, bytes).await;
                Ok(true)
            }
            Err(e) => {
                tracing::error!(source = %source, error = %e, "Failed to read upload source");
                Ok(false)
            }
        }
    }

    async fn get_file_url(&self, key: &str) -> Result<String> {
        object_file_name(key)?;
        Ok(format!("memory://{key}"))
    }

    async fn download_temp(&self, key: &str) -> Result<Option<DownloadResult>> {
        let bytes = match self.objects.read().await.get(key) {
            Some(bytes) => bytes.clone(),
            None => return Ok(None),
        };

        let temp_dir = create_temp_dir().await?;
        let extracted_dir = temp_dir.join(object_file_name(key)?);
        tokio::fs::write(&extracted_dir, bytes).await?;

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
