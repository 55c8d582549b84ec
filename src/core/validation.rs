//! Submission validation
//!
//! Reads a submitted CSV file, renames its columns through a column map and
//! counts populated and empty values for every mapped canonical field.
//!
//! A value is empty when it is blank after trimming. A record is flagged when any
//! mapped column present in the file is empty for that record.

use crate::domain::{DataSubmissionReport, FeatureReport, Mapping, Result, ReportOverview};
use chrono::Utc;
use std::io::Read;
use std::path::Path;

struct MappedColumn {
    canonical_field: String,
    provided_feature_name: String,
    index: usize,
    populated_count: usize,
    null_count: usize,
}

/// Validate the CSV file at `path` against `mapping`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not valid CSV.
pub fn validate_file(path: &Path, mapping: &Mapping) -> Result<DataSubmissionReport> {
    tracing::debug!(path = %path.display(), "Validating submission file");
    let reader = csv::Reader::from_path(path)?;
    validate_reader(reader, mapping)
}

/// Validate CSV text already in memory
///
/// # Errors
///
/// Returns an error if the input is not valid CSV.
pub fn validate_csv(data: &[u8], mapping: &Mapping) -> Result<DataSubmissionReport> {
    validate_reader(csv::Reader::from_reader(data), mapping)
}

fn validate_reader<R: Read>(mut reader: csv::Reader<R>, mapping: &Mapping) -> Result<DataSubmissionReport> {
    let headers = reader.headers()?.clone();

    let mut columns = Vec::new();
    let mut missing_required_fields = Vec::new();
    for (canonical_field, source_column) in mapping {
        match headers.iter().position(|h| h.trim() == source_column) {
            Some(index) => columns.push(MappedColumn {
                canonical_field: canonical_field.clone(),
                provided_feature_name: source_column.clone(),
                index,
                populated_count: 0,
                null_count: 0,
            }),
            None => missing_required_fields.push(canonical_field.clone()),
        }
    }

    let mut records_count = 0;
    let mut records_flagged = 0;
    for record in reader.records() {
        let record = record?;
        records_count += 1;

        let mut flagged = false;
        for column in &mut columns {
            let populated = record
                .get(column.index)
                .is_some_and(|value| !value.trim().is_empty());
            if populated {
                column.populated_count += 1;
            } else {
                column.null_count += 1;
                flagged = true;
            }
        }
        if flagged {
            records_flagged += 1;
        }
    }

    let features: Vec<FeatureReport> = columns
        .into_iter()
        .map(|c| FeatureReport {
            canonical_field: c.canonical_field,
            provided_feature_name: c.provided_feature_name,
            populated_count: c.populated_count,
            null_count: c.null_count,
        })
        .collect();

    tracing::debug!(
        records = records_count,
        flagged = records_flagged,
        missing = missing_required_fields.len(),
        "Validation finished"
    );

    Ok(DataSubmissionReport {
        overview: ReportOverview {
            feature_count: features.len(),
            records_count,
            records_flagged,
            missing_required_fields,
            etl_update_timestamp: Utc::now(),
        },
        features,
    })
}
