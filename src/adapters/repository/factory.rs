//! Repository and storage factory
//!
//! Builds the backends named in configuration and hands them back as trait
//! objects.

use crate::adapters::memory::{
    InMemoryColumnMapRepository, InMemoryDataSubmissionRepository, InMemoryProducerRepository,
    InMemoryStorage, InMemoryUserRepository,
};
use crate::adapters::postgresql::{
    PostgreSQLClient, PostgreSQLColumnMapRepository, PostgreSQLDataSubmissionRepository,
    PostgreSQLProducerRepository, PostgreSQLUserRepository,
};
use crate::adapters::repository::traits::{
    ColumnMapRepository, DataSubmissionRepository, ProducerRepository, UserRepository,
};
use crate::adapters::storage::{LocalStorage, Storage};
use crate::config::schema::{NadConfig, RepositoryBackend, StorageBackend};
use crate::domain::{NadError, Result};
use std::sync::Arc;

/// One repository per entity, all from the same backend
#[derive(Clone)]
pub struct Repositories {
    /// Producer (provider) persistence
    pub producers: Arc<dyn ProducerRepository + Send + Sync>,

    /// User persistence
    pub users: Arc<dyn UserRepository + Send + Sync>,

    /// Submission persistence
    pub submissions: Arc<dyn DataSubmissionRepository + Send + Sync>,

    /// Column map persistence
    pub column_maps: Arc<dyn ColumnMapRepository + Send + Sync>,
}

impl Repositories {
    /// Fresh, empty in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            producers: Arc::new(InMemoryProducerRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            submissions: Arc::new(InMemoryDataSubmissionRepository::new()),
            column_maps: Arc::new(InMemoryColumnMapRepository::new()),
        }
    }

    /// PostgreSQL repositories sharing one connection pool
    pub fn postgresql(client: Arc<PostgreSQLClient>) -> Self {
        Self {
            producers: Arc::new(PostgreSQLProducerRepository::new(client.clone())),
            users: Arc::new(PostgreSQLUserRepository::new(client.clone())),
            submissions: Arc::new(PostgreSQLDataSubmissionRepository::new(client.clone())),
            column_maps: Arc::new(PostgreSQLColumnMapRepository::new(client)),
        }
    }
}

/// Create the repositories selected by `repository_backend`
///
/// For PostgreSQL the connection is tested and the schema applied before the
/// repositories are returned.
///
/// # Errors
///
/// Returns [`NadError::Configuration`] if the PostgreSQL section is missing, or a
/// database error if the connection or migration fails.
pub async fn create_repositories(config: &NadConfig) -> Result<Repositories> {
    match config.repository_backend {
        RepositoryBackend::Memory => {
            tracing::info!("Creating in-memory repositories");
            Ok(Repositories::in_memory())
        }
        RepositoryBackend::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                NadError::Configuration(
                    "postgresql configuration is required when repository_backend = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL repositories");
            let client = PostgreSQLClient::new(pg_config.clone()).await?;
            tracing::debug!(connection = %client.connection_string_safe(), "Connecting");
            client.test_connection().await?;
            client.ensure_schema().await?;

            Ok(Repositories::postgresql(Arc::new(client)))
        }
    }
}

/// Create the object store selected by `storage.backend`
///
/// # Errors
///
/// Returns an error if the local base path cannot be resolved.
pub fn create_storage(config: &NadConfig) -> Result<Arc<dyn Storage + Send + Sync>> {
    match config.storage.backend {
        StorageBackend::Local => {
            let storage = LocalStorage::new(&config.storage.base_path)?;
            tracing::info!(base_path = %storage.base_path().display(), "Using local storage");
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(InMemoryStorage::new()))
        }
    }
}
