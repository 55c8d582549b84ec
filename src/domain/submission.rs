//! Data submission domain model

use super::producer::DataProducer;
use super::report::DataSubmissionReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file submitted by a producer and copied into storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSubmission {
    /// Identity assigned on persistence
    pub id: Option<i64>,

    /// Name of the submitted file
    pub file_name: String,

    /// Reference URL returned by storage
    pub url: String,

    /// Producer that submitted the file
    pub producer: DataProducer,

    /// Validation report, once one has been produced
    pub report: Option<DataSubmissionReport>,

    /// When the submission was first persisted
    pub created_at: DateTime<Utc>,

    /// When the submission was last persisted
    pub updated_at: DateTime<Utc>,
}

impl DataSubmission {
    /// Creates an unsaved submission
    pub fn new(file_name: impl Into<String>, url: impl Into<String>, producer: DataProducer) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            file_name: file_name.into(),
            url: url.into(),
            producer,
            report: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Storage key the submitted file was uploaded under
    pub fn storage_key(&self) -> String {
        storage_key(&self.producer.name, &self.file_name)
    }

    /// Returns `true` once a validation report is attached
    pub fn has_report(&self) -> bool {
        self.report.is_some()
    }
}

/// Builds the object key for a producer's file: `{producer}_{file_name}`
pub fn storage_key(producer_name: &str, file_name: &str) -> String {
    format!("{producer_name}_{file_name}")
}
