//! Application context
//!
//! The context is built once per process and passed by reference to every use
//! case. It owns the repositories, the object store and the validation task.

use crate::adapters::memory::InMemoryStorage;
use crate::adapters::repository::traits::{
    ColumnMapRepository, DataProviderRepository, DataSubmissionRepository, ProducerRepository,
    UserRepository,
};
use crate::adapters::repository::{create_repositories, create_storage, Repositories};
use crate::adapters::storage::Storage;
use crate::config::NadConfig;
use crate::core::tasks::{LocalValidationTask, ValidationTask};
use crate::domain::Result;
use std::sync::Arc;
use std::time::Duration;

/// Default wait for a task result
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(300);

/// Everything a use case needs
#[derive(Clone)]
pub struct ApplicationContext {
    repositories: Repositories,
    storage: Arc<dyn Storage + Send + Sync>,
    validation_task: Arc<dyn ValidationTask>,
    task_timeout: Duration,
}

impl ApplicationContext {
    /// Assemble a context from its parts
    pub fn new(
        repositories: Repositories,
        storage: Arc<dyn Storage + Send + Sync>,
        validation_task: Arc<dyn ValidationTask>,
        task_timeout: Duration,
    ) -> Self {
        Self {
            repositories,
            storage,
            validation_task,
            task_timeout,
        }
    }

    /// Build the context described by configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a backend cannot be created.
    pub async fn from_config(config: &NadConfig) -> Result<Self> {
        let repositories = create_repositories(config).await?;
        let storage = create_storage(config)?;

        Ok(Self::new(
            repositories,
            storage,
            Arc::new(LocalValidationTask),
            Duration::from_secs(config.tasks.timeout_seconds),
        ))
    }

    /// In-memory repositories and storage with the local validation task
    pub fn in_memory() -> Self {
        Self::new(
            Repositories::in_memory(),
            Arc::new(InMemoryStorage::new()),
            Arc::new(LocalValidationTask),
            DEFAULT_TASK_TIMEOUT,
        )
    }

    /// Replace the object store
    pub fn with_storage(mut self, storage: Arc<dyn Storage + Send + Sync>) -> Self {
        self.storage = storage;
        self
    }

    /// Replace the validation task
    pub fn with_validation_task(mut self, task: Arc<dyn ValidationTask>) -> Self {
        self.validation_task = task;
        self
    }

    pub fn producers(&self) -> &dyn ProducerRepository {
        self.repositories.producers.as_ref()
    }

    /// Same repository as [`ApplicationContext::producers`]
    pub fn providers(&self) -> &dyn DataProviderRepository {
        self.repositories.producers.as_ref()
    }

    pub fn users(&self) -> &dyn UserRepository {
        self.repositories.users.as_ref()
    }

    pub fn submissions(&self) -> &dyn DataSubmissionRepository {
        self.repositories.submissions.as_ref()
    }

    pub fn column_maps(&self) -> &dyn ColumnMapRepository {
        self.repositories.column_maps.as_ref()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn validation_task(&self) -> &dyn ValidationTask {
        self.validation_task.as_ref()
    }

    /// How long use cases wait on a task result
    pub fn task_timeout(&self) -> Duration {
        self.task_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use crate::domain::DataProducer;

    #[tokio::test]
    async fn test_providers_alias_shares_state() {
        let ctx = ApplicationContext::in_memory();
        ctx.producers().add(DataProducer::new("NJ")).await.unwrap();
        assert!(ctx.providers().get_by_name("NJ").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_from_config() {
        let mut config = NadConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.tasks.timeout_seconds = 12;

        let ctx = ApplicationContext::from_config(&config).await.unwrap();
        assert_eq!(ctx.task_timeout(), Duration::from_secs(12));
        assert!(ctx.producers().get_all().await.unwrap().is_empty());
    }
}
