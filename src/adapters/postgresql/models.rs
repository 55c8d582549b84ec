//! Row mapping for the PostgreSQL repositories
//!
//! Every entity query joins `producers` and selects the producer under the
//! `producer_*` aliases listed in [`PRODUCER_COLUMNS`].

use crate::domain::{
    ColumnMap, DataProducer, DataSubmission, DataSubmissionReport, Mapping, NadError, Result, User,
};
use tokio_postgres::types::{FromSql, Json};
use tokio_postgres::Row;

/// Producer columns selected alongside every joined entity
pub const PRODUCER_COLUMNS: &str = "p.id AS producer_id, p.name AS producer_name, \
     p.created_at AS producer_created_at, p.updated_at AS producer_updated_at";

fn column<'a, T: FromSql<'a>>(row: &'a Row, name: &str) -> Result<T> {
    row.try_get(name)
        .map_err(|e| NadError::Database(format!("Failed to read column {name}: {e}")))
}

/// Id of a producer that must already be persisted
pub fn persisted_producer_id(producer: &DataProducer) -> Result<i64> {
    producer.id.ok_or_else(|| {
        NadError::Validation(format!("Producer {} has not been saved", producer.name))
    })
}

/// Id from an `INSERT ... RETURNING id` row
pub fn returned_id(row: &Row) -> Result<i64> {
    column(row, "id")
}

/// Map a row from `producers`
pub fn producer_from_row(row: &Row) -> Result<DataProducer> {
    Ok(DataProducer {
        id: Some(column(row, "id")?),
        name: column(row, "name")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

fn joined_producer(row: &Row) -> Result<DataProducer> {
    Ok(DataProducer {
        id: Some(column(row, "producer_id")?),
        name: column(row, "producer_name")?,
        created_at: column(row, "producer_created_at")?,
        updated_at: column(row, "producer_updated_at")?,
    })
}

/// Map a row from `users` joined with its producer
pub fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: Some(column(row, "id")?),
        email: column(row, "email")?,
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        is_active: column(row, "is_active")?,
        producer: joined_producer(row)?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

/// Map a row from `data_submissions` joined with its producer
pub fn submission_from_row(row: &Row) -> Result<DataSubmission> {
    let report: Option<serde_json::Value> = column(row, "report")?;
    let report = report
        .map(serde_json::from_value::<DataSubmissionReport>)
        .transpose()?;

    Ok(DataSubmission {
        id: Some(column(row, "id")?),
        file_name: column(row, "file_name")?,
        url: column(row, "url")?,
        producer: joined_producer(row)?,
        report,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

/// Map a row from `column_maps` joined with its producer
pub fn column_map_from_row(row: &Row) -> Result<ColumnMap> {
    let Json(mapping): Json<Mapping> = column(row, "mapping")?;

    Ok(ColumnMap::restore(
        column(row, "id")?,
        column(row, "name")?,
        joined_producer(row)?,
        mapping,
        column(row, "created_at")?,
        column(row, "updated_at")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_producer_id() {
        let mut producer = DataProducer::new("NJ");
        assert!(matches!(
            persisted_producer_id(&producer),
            Err(NadError::Validation(_))
        ));

        producer.id = Some(4);
        assert_eq!(persisted_producer_id(&producer).unwrap(), 4);
    }

    #[test]
    fn test_producer_columns_aliases() {
        for alias in [
            "producer_id",
            "producer_name",
            "producer_created_at",
            "producer_updated_at",
        ] {
            assert!(PRODUCER_COLUMNS.contains(alias));
        }
    }
}
