//! Read-only projections returned by use cases
//!
//! View models flatten the producer reference down to its name and are
//! serializable, so the CLI can print them as JSON.

use crate::domain::{ColumnMap, DataProducer, DataSubmission, DataSubmissionReport, Mapping, User};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A column map as seen by callers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnMapViewModel {
    pub id: i64,
    pub name: String,
    pub producer_name: String,
    pub mapping: Mapping,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A data producer as seen by callers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DataProducerViewModel {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A data submission as seen by callers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DataSubmissionViewModel {
    pub id: i64,
    pub file_name: String,
    pub url: String,
    pub producer_name: String,
    pub report: Option<DataSubmissionReport>,
    pub created_at: DateTime<Utc>,
}

/// A user as seen by callers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserViewModel {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub producer_name: String,
}

// Unsaved entities project with id 0.

impl From<&ColumnMap> for ColumnMapViewModel {
    fn from(column_map: &ColumnMap) -> Self {
        Self {
            id: column_map.id.unwrap_or_default(),
            name: column_map.name.clone(),
            producer_name: column_map.producer.name.clone(),
            mapping: column_map.mapping().clone(),
            created_at: column_map.created_at,
            updated_at: column_map.updated_at,
        }
    }
}

impl From<&DataProducer> for DataProducerViewModel {
    fn from(producer: &DataProducer) -> Self {
        Self {
            id: producer.id.unwrap_or_default(),
            name: producer.name.clone(),
            created_at: producer.created_at,
        }
    }
}

impl From<&DataSubmission> for DataSubmissionViewModel {
    fn from(submission: &DataSubmission) -> Self {
        Self {
            id: submission.id.unwrap_or_default(),
            file_name: submission.file_name.clone(),
            url: submission.url.clone(),
            producer_name: submission.producer.name.clone(),
            report: submission.report.clone(),
            created_at: submission.created_at,
        }
    }
}

impl From<&User> for UserViewModel {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            email: user.email.clone(),
            full_name: user.full_name(),
            is_active: user.is_active,
            producer_name: user.producer.name.clone(),
        }
    }
}
