//! Data submission validation report
//!
//! A report is produced by the validation task and persisted alongside the
//! submission it describes. It is stored as JSON, so every type here is serde
//! round-trippable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate figures for a validated submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportOverview {
    /// Number of canonical fields mapped and found in the file
    pub feature_count: usize,

    /// Number of data rows read
    pub records_count: usize,

    /// Rows where at least one mapped field is empty
    pub records_flagged: usize,

    /// Canonical fields whose source column is absent from the file
    pub missing_required_fields: Vec<String>,

    /// When the report was produced
    pub etl_update_timestamp: DateTime<Utc>,
}

/// Per-field population figures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureReport {
    /// Canonical field name
    pub canonical_field: String,

    /// Column name in the submitted file
    pub provided_feature_name: String,

    /// Rows with a non-empty value
    pub populated_count: usize,

    /// Rows with an empty value
    pub null_count: usize,
}

/// Result of validating a data submission against a column map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSubmissionReport {
    /// Aggregate figures
    pub overview: ReportOverview,

    /// One entry per mapped canonical field present in the file
    pub features: Vec<FeatureReport>,
}

impl DataSubmissionReport {
    /// Looks up the figures for one canonical field
    pub fn feature(&self, canonical_field: &str) -> Option<&FeatureReport> {
        self.features
            .iter()
            .find(|f| f.canonical_field == canonical_field)
    }

    /// Returns `true` when no row was flagged and no mapped column was missing
    pub fn is_clean(&self) -> bool {
        self.overview.records_flagged == 0 && self.overview.missing_required_fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> DataSubmissionReport {
        DataSubmissionReport {
            overview: ReportOverview {
                feature_count: 1,
                records_count: 3,
                records_flagged: 1,
                missing_required_fields: vec![],
                etl_update_timestamp: Utc::now(),
            },
            features: vec![FeatureReport {
                canonical_field: "Add_Number".to_string(),
                provided_feature_name: "address_number".to_string(),
                populated_count: 2,
                null_count: 1,
            }],
        }
    }

    #[test]
    fn test_feature_lookup() {
        let report = sample_report();
        let feature = report.feature("Add_Number").unwrap();
        assert_eq!(feature.null_count, 1);
        assert!(report.feature("St_Name").is_none());
    }

    #[test]
    fn test_is_clean() {
        let mut report = sample_report();
        assert!(!report.is_clean());
        report.overview.records_flagged = 0;
        assert!(report.is_clean());
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["overview"]["records_count"], 3);
        assert_eq!(json["features"][0]["provided_feature_name"], "address_number");
    }
}
