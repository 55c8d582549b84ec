//! Application use cases
//!
//! Each use case is an async function taking the [`ApplicationContext`] plus
//! primitive arguments.
//!
//! | Operation | Bad input |
//! |-----------|-----------|
//! | [`add_data_provider`], [`ingest_data_submission`], [`list_data_submissions_by_provider`], [`validate_data_submission`] | logged, `Ok(None)` / `Ok(())` |
//! | [`add_column_map`], [`get_column_map`], [`get_column_maps_by_producer`], [`update_column_mapping`], [`update_column_mapping_field`], [`add_user`] | `Err(Validation \| NotFound)` |
//!
//! Repository and storage failures are returned as errors by all of them.
//!
//! [`ApplicationContext`]: crate::core::context::ApplicationContext

pub mod column_maps;
pub mod producers;
pub mod submissions;
pub mod users;

pub use column_maps::{
    add_column_map, get_column_map, get_column_maps_by_producer, update_column_mapping,
    update_column_mapping_field,
};
pub use producers::{add_data_provider, list_data_providers};
pub use submissions::{
    ingest_data_submission, list_data_submissions_by_provider, validate_data_submission,
};
pub use users::add_user;
