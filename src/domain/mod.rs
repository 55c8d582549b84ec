//! Domain models and types for nad-ch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entities** ([`DataProducer`], [`User`], [`DataSubmission`], [`ColumnMap`])
//! - **Validation reports** ([`DataSubmissionReport`])
//! - **The canonical schema** ([`CANONICAL_FIELDS`])
//! - **Error types** ([`NadError`]) and the [`Result`] alias
//!
//! Entities are plain records. Their `id` is `None` until a repository persists
//! them.
//!
//! ```rust
//! use nad_ch::domain::{ColumnMap, DataProducer, Mapping};
//!
//! # fn example() -> nad_ch::domain::Result<()> {
//! let mut mapping = Mapping::new();
//! mapping.insert("Add_Number".to_string(), "address_number".to_string());
//!
//! let column_map = ColumnMap::new("Test", DataProducer::new("New Jersey"), mapping)?;
//! assert_eq!(column_map.source_column("Add_Number"), Some("address_number"));
//! # Ok(())
//! # }
//! ```

pub mod column_map;
pub mod errors;
pub mod producer;
pub mod report;
pub mod result;
pub mod submission;
pub mod user;

pub use column_map::{is_canonical_field, validate_mapping, ColumnMap, Mapping, CANONICAL_FIELDS};
pub use errors::NadError;
pub use producer::{DataProducer, DataProvider};
pub use report::{DataSubmissionReport, FeatureReport, ReportOverview};
pub use result::Result;
pub use submission::{storage_key, DataSubmission};
pub use user::User;
