//! Repository abstraction layer
//!
//! - [`traits`] - Persistence ports for each entity
//! - [`factory`] - Builds the configured backend

pub mod factory;
pub mod traits;

pub use factory::{create_repositories, create_storage, Repositories};
pub use traits::{
    ColumnMapRepository, DataProviderRepository, DataSubmissionRepository, ProducerRepository,
    UserRepository,
};
