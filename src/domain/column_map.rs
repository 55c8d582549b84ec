//! Column map domain model
//!
//! A column map tells the validation pipeline which column of a producer's file
//! holds each canonical address field. Keys are canonical field names and values
//! are the producer's source column names.
//!
//! Every key must belong to [`CANONICAL_FIELDS`]. The check is enforced here, on
//! creation and on every update, so that no path can persist an invalid map.

use super::errors::NadError;
use super::producer::DataProducer;
use super::result::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// Canonical field name to source column name, in the order the pairs were given
pub type Mapping = IndexMap<String, String>;

/// The fixed set of canonical address fields a column map may target
pub static CANONICAL_FIELDS: [&str; 18] = [
    "Add_Number",
    "AddNo_Full",
    "St_Name",
    "StNam_Full",
    "County",
    "Inc_Muni",
    "Post_City",
    "State",
    "UUID",
    "AddAuth",
    "Longitude",
    "Latitude",
    "NatGrid",
    "Placement",
    "AddrPoint",
    "DateUpdate",
    "NAD_Source",
    "DataSet_ID",
];

/// Returns `true` if `field` is one of the canonical address fields
pub fn is_canonical_field(field: &str) -> bool {
    CANONICAL_FIELDS.contains(&field)
}

/// Checks that every key of `mapping` is a canonical field
///
/// # Errors
///
/// Returns [`NadError::Validation`] listing the offending keys.
///
/// # Examples
///
/// ```
/// use nad_ch::domain::column_map::{validate_mapping, Mapping};
///
/// let mut mapping = Mapping::new();
/// mapping.insert("Add_Number".to_string(), "address_number".to_string());
/// assert!(validate_mapping(&mapping).is_ok());
///
/// mapping.insert("a".to_string(), "b".to_string());
/// assert!(validate_mapping(&mapping).is_err());
/// ```
pub fn validate_mapping(mapping: &Mapping) -> Result<()> {
    let invalid: Vec<&str> = mapping
        .keys()
        .map(String::as_str)
        .filter(|key| !is_canonical_field(key))
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(NadError::Validation(format!(
            "Invalid keys: {}",
            invalid.join(", ")
        )))
    }
}

/// A named mapping from a producer's columns onto the canonical schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnMap {
    /// Identity assigned on persistence
    pub id: Option<i64>,

    /// Display name, e.g. "NJ 2024 export"
    pub name: String,

    /// Producer that owns the map
    pub producer: DataProducer,

    /// Canonical field to source column
    mapping: Mapping,

    /// When the map was first persisted
    pub created_at: DateTime<Utc>,

    /// When the map was last persisted
    pub updated_at: DateTime<Utc>,
}

impl ColumnMap {
    /// Creates an unsaved column map
    ///
    /// # Errors
    ///
    /// Returns [`NadError::Validation`] if any mapping key is not canonical.
    pub fn new(name: impl Into<String>, producer: DataProducer, mapping: Mapping) -> Result<Self> {
        validate_mapping(&mapping)?;
        let now = Utc::now();
        Ok(Self {
            id: None,
            name: name.into(),
            producer,
            mapping,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a map from persisted parts without re-validating
    ///
    /// Used by repositories when loading rows written through [`ColumnMap::new`].
    pub fn restore(
        id: i64,
        name: String,
        producer: DataProducer,
        mapping: Mapping,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            producer,
            mapping,
            created_at,
            updated_at,
        }
    }

    /// The current mapping
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Source column mapped to `canonical_field`, if any
    pub fn source_column(&self, canonical_field: &str) -> Option<&str> {
        self.mapping.get(canonical_field).map(String::as_str)
    }

    /// Replaces the whole mapping
    ///
    /// # Errors
    ///
    /// Returns [`NadError::Validation`] and leaves the map untouched if any key is
    /// not canonical.
    pub fn replace_mapping(&mut self, mapping: Mapping) -> Result<()> {
        validate_mapping(&mapping)?;
        self.mapping = mapping;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Points one canonical field at a new source column
    ///
    /// An existing field keeps its position; a new one is appended.
    ///
    /// # Errors
    ///
    /// Returns [`NadError::Validation`] if `canonical_field` is not canonical.
    pub fn set_field(
        &mut self,
        canonical_field: &str,
        source_column: impl Into<String>,
    ) -> Result<()> {
        if !is_canonical_field(canonical_field) {
            return Err(NadError::Validation(format!(
                "Invalid keys: {canonical_field}"
            )));
        }
        self.mapping
            .insert(canonical_field.to_string(), source_column.into());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Canonical fields that have no source column yet
    pub fn unmapped_fields(&self) -> Vec<&'static str> {
        CANONICAL_FIELDS
            .iter()
            .copied()
            .filter(|field| !self.mapping.contains_key(*field))
            .collect()
    }
}
