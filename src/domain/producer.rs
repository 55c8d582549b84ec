//! Data producer domain model
//!
//! A data producer is an organization that submits address data. The older
//! ingestion workflow calls the same concept a "data provider"; both names refer
//! to [`DataProducer`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organization submitting address data
///
/// The `id` is `None` until the producer has been persisted by a repository.
///
/// # Examples
///
/// ```
/// use nad_ch::domain::DataProducer;
///
/// let producer = DataProducer::new("New Jersey");
/// assert_eq!(producer.name, "New Jersey");
/// assert!(producer.id.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataProducer {
    /// Identity assigned on persistence
    pub id: Option<i64>,

    /// Unique producer name
    pub name: String,

    /// When the producer was first persisted
    pub created_at: DateTime<Utc>,

    /// When the producer was last persisted
    pub updated_at: DateTime<Utc>,
}

/// The ingestion workflow's name for a [`DataProducer`]
pub type DataProvider = DataProducer;

impl DataProducer {
    /// Creates an unsaved producer with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` once a repository has assigned an identity
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
