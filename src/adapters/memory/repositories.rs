//! In-memory repository implementations
//!
//! Records live in a `Vec` behind a `tokio::sync::RwLock`, so insertion order and
//! id order coincide. Ids start at 1 and are never reused.

use crate::adapters::repository::traits::{
    duplicate_producer, ColumnMapRepository, DataSubmissionRepository, ProducerRepository, UserRepository,
};
use crate::domain::{
    ColumnMap, DataProducer, DataSubmission, DataSubmissionReport, NadError, Result, User,
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// Records plus the next id to hand out
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory [`ProducerRepository`]
#[derive(Debug, Default)]
pub struct InMemoryProducerRepository {
    table: RwLock<Table<DataProducer>>,
}

impl InMemoryProducerRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProducerRepository for InMemoryProducerRepository {
    async fn add(&self, mut producer: DataProducer) -> Result<DataProducer> {
        let mut table = self.table.write().await;
        if table.rows.iter().any(|p| p.name == producer.name) {
            return Err(duplicate_producer(&producer.name));
        }
        producer.id = Some(table.allocate_id());
        table.rows.push(producer.clone());
        Ok(producer)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<DataProducer>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<DataProducer>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.name == name).cloned())
    }

    async fn get_all(&self) -> Result<Vec<DataProducer>> {
        Ok(self.table.read().await.rows.clone())
    }
}

/// In-memory [`UserRepository`]
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, mut user: User) -> Result<User> {
        let mut table = self.table.write().await;
        user.id = Some(table.allocate_id());
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        Ok(self.table.read().await.rows.clone())
    }
}

/// In-memory [`DataSubmissionRepository`]
#[derive(Debug, Default)]
pub struct InMemoryDataSubmissionRepository {
    table: RwLock<Table<DataSubmission>>,
}

impl InMemoryDataSubmissionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSubmissionRepository for InMemoryDataSubmissionRepository {
    async fn add(&self, mut submission: DataSubmission) -> Result<DataSubmission> {
        let mut table = self.table.write().await;
        submission.id = Some(table.allocate_id());
        table.rows.push(submission.clone());
        Ok(submission)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<DataSubmission>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn get_by_producer(&self, producer: &DataProducer) -> Result<Vec<DataSubmission>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|s| s.producer.name == producer.name)
            .cloned()
            .collect())
    }

    async fn get_by_file_name(&self, file_name: &str) -> Result<Option<DataSubmission>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|s| s.file_name == file_name).cloned())
    }

    async fn get_all(&self) -> Result<Vec<DataSubmission>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn update_report(
        &self,
        submission_id: i64,
        report: &DataSubmissionReport,
    ) -> Result<()> {
        let mut table = self.table.write().await;
        let submission = table
            .rows
            .iter_mut()
            .find(|s| s.id == Some(submission_id))
            .ok_or_else(|| NadError::NotFound(format!("Data submission {submission_id}")))?;

        submission.report = Some(report.clone());
        submission.updated_at = Utc::now();
        Ok(())
    }
}

/// In-memory [`ColumnMapRepository`]
#[derive(Debug, Default)]
pub struct InMemoryColumnMapRepository {
    table: RwLock<Table<ColumnMap>>,
}

impl InMemoryColumnMapRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ColumnMapRepository for InMemoryColumnMapRepository {
    async fn add(&self, mut column_map: ColumnMap) -> Result<ColumnMap> {
        let mut table = self.table.write().await;
        column_map.id = Some(table.allocate_id());
        table.rows.push(column_map.clone());
        Ok(column_map)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ColumnMap>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|c| c.id == Some(id)).cloned())
    }

    async fn get_by_producer(&self, producer: &DataProducer) -> Result<Vec<ColumnMap>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|c| c.producer.name == producer.name)
            .cloned()
            .collect())
    }

    async fn get_by_name_and_producer(
        &self,
        name: &str,
        producer: &DataProducer,
    ) -> Result<Option<ColumnMap>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|c| c.name == name && c.producer.name == producer.name)
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<ColumnMap>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn update(&self, column_map: ColumnMap) -> Result<ColumnMap> {
        let id = column_map
            .id
            .ok_or_else(|| NadError::NotFound("Column map has not been saved".to_string()))?;

        let mut table = self.table.write().await;
        let slot = table
            .rows
            .iter_mut()
            .find(|c| c.id == Some(id))
            .ok_or_else(|| NadError::NotFound(format!("Column map {id}")))?;

        *slot = column_map.clone();
        Ok(column_map)
    }
}
