//! PostgreSQL repository implementations
//!
//! All four repositories share one [`PostgreSQLClient`] and therefore one pool.
//! Reports are stored as JSONB. Mappings are stored as JSON so that their key
//! order survives a round trip.

use super::client::PostgreSQLClient;
use super::models::{
    column_map_from_row, persisted_producer_id, producer_from_row, returned_id, submission_from_row,
    user_from_row, PRODUCER_COLUMNS,
};
use crate::adapters::repository::traits::{
    duplicate_producer, ColumnMapRepository, DataSubmissionRepository, ProducerRepository, UserRepository,
};
use crate::domain::{
    ColumnMap, DataProducer, DataSubmission, DataSubmissionReport, NadError, Result, User,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio_postgres::types::Json;

/// PostgreSQL [`ProducerRepository`]
pub struct PostgreSQLProducerRepository {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLProducerRepository {
    /// Create a repository over a shared client
    pub fn new(client: Arc<PostgreSQLClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProducerRepository for PostgreSQLProducerRepository {
    async fn add(&self, mut producer: DataProducer) -> Result<DataProducer> {
        let rows = self
            .client
            .query(
                "INSERT INTO producers (name, created_at, updated_at) VALUES ($1, $2, $3) \
                 ON CONFLICT (name) DO NOTHING RETURNING id",
                &[&producer.name, &producer.created_at, &producer.updated_at],
            )
            .await?;
        let Some(row) = rows.first() else {
            return Err(duplicate_producer(&producer.name));
        };
        producer.id = Some(returned_id(row)?);
        Ok(producer)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<DataProducer>> {
        let rows = self
            .client
            .query(
                "SELECT id, name, created_at, updated_at FROM producers WHERE id = $1",
                &[&id],
            )
            .await?;
        rows.first().map(producer_from_row).transpose()
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<DataProducer>> {
        let rows = self
            .client
            .query(
                "SELECT id, name, created_at, updated_at FROM producers WHERE name = $1",
                &[&name],
            )
            .await?;
        rows.first().map(producer_from_row).transpose()
    }

    async fn get_all(&self) -> Result<Vec<DataProducer>> {
        let rows = self
            .client
            .query(
                "SELECT id, name, created_at, updated_at FROM producers ORDER BY id",
                &[],
            )
            .await?;
        rows.iter().map(producer_from_row).collect()
    }
}

/// PostgreSQL [`UserRepository`]
pub struct PostgreSQLUserRepository {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLUserRepository {
    /// Create a repository over a shared client
    pub fn new(client: Arc<PostgreSQLClient>) -> Self {
        Self { client }
    }

    fn select(filter: &str) -> String {
        format!(
            "SELECT u.id, u.email, u.first_name, u.last_name, u.is_active, \
             u.created_at, u.updated_at, {PRODUCER_COLUMNS} \
             FROM users u JOIN producers p ON p.id = u.producer_id {filter} ORDER BY u.id"
        )
    }
}

#[async_trait]
impl UserRepository for PostgreSQLUserRepository {
    async fn add(&self, mut user: User) -> Result<User> {
        let producer_id = persisted_producer_id(&user.producer)?;
        let row = self
            .client
            .query_one(
                "INSERT INTO users (email, first_name, last_name, is_active, producer_id, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
                &[
                    &user.email,
                    &user.first_name,
                    &user.last_name,
                    &user.is_active,
                    &producer_id,
                    &user.created_at,
                    &user.updated_at,
                ],
            )
            .await?;
        user.id = Some(returned_id(&row)?);
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let rows = self
            .client
            .query(&Self::select("WHERE u.id = $1"), &[&id])
            .await?;
        rows.first().map(user_from_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let rows = self
            .client
            .query(&Self::select("WHERE u.email = $1"), &[&email])
            .await?;
        rows.first().map(user_from_row).transpose()
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        let rows = self.client.query(&Self::select(""), &[]).await?;
        rows.iter().map(user_from_row).collect()
    }
}

/// PostgreSQL [`DataSubmissionRepository`]
pub struct PostgreSQLDataSubmissionRepository {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLDataSubmissionRepository {
    /// Create a repository over a shared client
    pub fn new(client: Arc<PostgreSQLClient>) -> Self {
        Self { client }
    }

    fn select(filter: &str) -> String {
        format!(
            "SELECT s.id, s.file_name, s.url, s.report, s.created_at, s.updated_at, \
             {PRODUCER_COLUMNS} \
             FROM data_submissions s JOIN producers p ON p.id = s.producer_id {filter} ORDER BY s.id"
        )
    }
}

#[async_trait]
impl DataSubmissionRepository for PostgreSQLDataSubmissionRepository {
    async fn add(&self, mut submission: DataSubmission) -> Result<DataSubmission> {
        let producer_id = persisted_producer_id(&submission.producer)?;
        let report = submission
            .report
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        let row = self
            .client
            .query_one(
                "INSERT INTO data_submissions (file_name, url, producer_id, report, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
                &[
                    &submission.file_name,
                    &submission.url,
                    &producer_id,
                    &report,
                    &submission.created_at,
                    &submission.updated_at,
                ],
            )
            .await?;
        submission.id = Some(returned_id(&row)?);
        Ok(submission)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<DataSubmission>> {
        let rows = self
            .client
            .query(&Self::select("WHERE s.id = $1"), &[&id])
            .await?;
        rows.first().map(submission_from_row).transpose()
    }

    async fn get_by_producer(&self, producer: &DataProducer) -> Result<Vec<DataSubmission>> {
        let rows = self
            .client
            .query(&Self::select("WHERE p.name = $1"), &[&producer.name])
            .await?;
        rows.iter().map(submission_from_row).collect()
    }

    async fn get_by_file_name(&self, file_name: &str) -> Result<Option<DataSubmission>> {
        let rows = self
            .client
            .query(&Self::select("WHERE s.file_name = $1"), &[&file_name])
            .await?;
        rows.first().map(submission_from_row).transpose()
    }

    async fn get_all(&self) -> Result<Vec<DataSubmission>> {
        let rows = self.client.query(&Self::select(""), &[]).await?;
        rows.iter().map(submission_from_row).collect()
    }

    async fn update_report(
        &self,
        submission_id: i64,
        report: &DataSubmissionReport,
    ) -> Result<()> {
        let report = serde_json::to_value(report)?;
        let updated = self
            .client
            .execute(
                "UPDATE data_submissions SET report = $1, updated_at = $2 WHERE id = $3",
                &[&report, &Utc::now(), &submission_id],
            )
            .await?;

        if updated == 0 {
            return Err(NadError::NotFound(format!(
                "Data submission {submission_id}"
            )));
        }
        Ok(())
    }
}

/// PostgreSQL [`ColumnMapRepository`]
pub struct PostgreSQLColumnMapRepository {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLColumnMapRepository {
    /// Create a repository over a shared client
    pub fn new(client: Arc<PostgreSQLClient>) -> Self {
        Self { client }
    }

    fn select(filter: &str) -> String {
        format!(
            "SELECT c.id, c.name, c.mapping, c.created_at, c.updated_at, {PRODUCER_COLUMNS} \
             FROM column_maps c JOIN producers p ON p.id = c.producer_id {filter} ORDER BY c.id"
        )
    }
}

#[async_trait]
impl ColumnMapRepository for PostgreSQLColumnMapRepository {
    async fn add(&self, mut column_map: ColumnMap) -> Result<ColumnMap> {
        let producer_id = persisted_producer_id(&column_map.producer)?;
        let mapping = Json(column_map.mapping());

        let row = self
            .client
            .query_one(
                "INSERT INTO column_maps (name, producer_id, mapping, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING id",
                &[
                    &column_map.name,
                    &producer_id,
                    &mapping,
                    &column_map.created_at,
                    &column_map.updated_at,
                ],
            )
            .await?;
        column_map.id = Some(returned_id(&row)?);
        Ok(column_map)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ColumnMap>> {
        let rows = self
            .client
            .query(&Self::select("WHERE c.id = $1"), &[&id])
            .await?;
        rows.first().map(column_map_from_row).transpose()
    }

    async fn get_by_producer(&self, producer: &DataProducer) -> Result<Vec<ColumnMap>> {
        let rows = self
            .client
            .query(&Self::select("WHERE p.name = $1"), &[&producer.name])
            .await?;
        rows.iter().map(column_map_from_row).collect()
    }

    async fn get_by_name_and_producer(
        &self,
        name: &str,
        producer: &DataProducer,
    ) -> Result<Option<ColumnMap>> {
        let rows = self
            .client
            .query(
                &Self::select("WHERE c.name = $1 AND p.name = $2"),
                &[&name, &producer.name],
            )
            .await?;
        rows.first().map(column_map_from_row).transpose()
    }

    async fn get_all(&self) -> Result<Vec<ColumnMap>> {
        let rows = self.client.query(&Self::select(""), &[]).await?;
        rows.iter().map(column_map_from_row).collect()
    }

    async fn update(&self, column_map: ColumnMap) -> Result<ColumnMap> {
        let id = column_map
            .id
            .ok_or_else(|| NadError::NotFound("Column map has not been saved".to_string()))?;
        let mapping = Json(column_map.mapping());

        let updated = self
            .client
            .execute(
                "UPDATE column_maps SET name = $1, mapping = $2, updated_at = $3 WHERE id = $4",
                &[&column_map.name, &mapping, &column_map.updated_at, &id],
            )
            .await?;

        if updated == 0 {
            return Err(NadError::NotFound(format!("Column map {id}")));
        }
        Ok(column_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_statements_join_producers() {
        let sql = PostgreSQLUserRepository::select("WHERE u.id = $1");
        assert!(sql.contains("JOIN producers p ON p.id = u.producer_id WHERE u.id = $1"));
        assert!(sql.ends_with("ORDER BY u.id"));

        let sql = PostgreSQLDataSubmissionRepository::select("");
        assert!(sql.contains("s.report"));
        assert!(sql.contains("producer_name"));

        let sql = PostgreSQLColumnMapRepository::select("WHERE c.name = $1 AND p.name = $2");
        assert!(sql.contains("c.mapping"));
        assert!(sql.contains("WHERE c.name = $1 AND p.name = $2 ORDER BY c.id"));
    }
}
