//! Repository abstraction traits
//!
//! Every persistence backend implements these traits. Use cases only ever see
//! `Arc<dyn ...Repository>` trait objects held by the application context.
//!
//! All lookups by name are exact, case-sensitive string matches. `get_all` and
//! list-returning lookups yield records in ascending id order, which is also the
//! order they were added in.

use crate::domain::{
    ColumnMap, DataProducer, DataSubmission, DataSubmissionReport, NadError, Result, User,
};
use async_trait::async_trait;

/// Persistence for data producers
#[async_trait]
pub trait ProducerRepository: Send + Sync {
    /// Persist a new producer and return it with its assigned id
    ///
    /// Names are unique.
    ///
    /// # Errors
    ///
    /// Returns [`NadError::Validation`] if a producer with the same name exists,
    /// or an error if the backend rejects the write.
    async fn add(&self, producer: DataProducer) -> Result<DataProducer>;

    /// Look up a producer by id
    async fn get_by_id(&self, id: i64) -> Result<Option<DataProducer>>;

    /// Look up a producer by exact name
    async fn get_by_name(&self, name: &str) -> Result<Option<DataProducer>>;

    /// All producers in id order
    async fn get_all(&self) -> Result<Vec<DataProducer>>;
}

/// Error returned by [`ProducerRepository::add`] for a name already in use
pub(crate) fn duplicate_producer(name: &str) -> NadError {
    NadError::Validation(format!("Producer {name} is already registered"))
}

/// The ingestion workflow's name for a [`ProducerRepository`]
pub use self::ProducerRepository as DataProviderRepository;

/// Persistence for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return it with its assigned id
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    async fn add(&self, user: User) -> Result<User>;

    /// Look up a user by id
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Look up a user by exact email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// All users in id order
    async fn get_all(&self) -> Result<Vec<User>>;
}

/// Persistence for data submissions
#[async_trait]
pub trait DataSubmissionRepository: Send + Sync {
    /// Persist a new submission and return it with its assigned id
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    async fn add(&self, submission: DataSubmission) -> Result<DataSubmission>;

    /// Look up a submission by id
    async fn get_by_id(&self, id: i64) -> Result<Option<DataSubmission>>;

    /// Submissions whose producer has the same name as `producer`
    async fn get_by_producer(&self, producer: &DataProducer) -> Result<Vec<DataSubmission>>;

    /// First submission (lowest id) with the given file name
    async fn get_by_file_name(&self, file_name: &str) -> Result<Option<DataSubmission>>;

    /// All submissions in id order
    async fn get_all(&self) -> Result<Vec<DataSubmission>>;

    /// Attach a validation report to an existing submission
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::NadError::NotFound`] if no submission has `submission_id`.
    async fn update_report(
        &self,
        submission_id: i64,
        report: &DataSubmissionReport,
    ) -> Result<()>;
}

/// Persistence for column maps
#[async_trait]
pub trait ColumnMapRepository: Send + Sync {
    /// Persist a new column map and return it with its assigned id
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    async fn add(&self, column_map: ColumnMap) -> Result<ColumnMap>;

    /// Look up a column map by id
    async fn get_by_id(&self, id: i64) -> Result<Option<ColumnMap>>;

    /// Column maps owned by the producer with the same name as `producer`
    async fn get_by_producer(&self, producer: &DataProducer) -> Result<Vec<ColumnMap>>;

    /// Column map with exact `name` owned by `producer`
    async fn get_by_name_and_producer(
        &self,
        name: &str,
        producer: &DataProducer,
    ) -> Result<Option<ColumnMap>>;

    /// All column maps in id order
    async fn get_all(&self) -> Result<Vec<ColumnMap>>;

    /// Replace the stored name and mapping of an existing column map
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::NadError::NotFound`] if the map has no id or the id
    /// is unknown.
    async fn update(&self, column_map: ColumnMap) -> Result<ColumnMap>;
}
