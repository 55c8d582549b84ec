//! In-memory adapters
//!
//! Process-local implementations of the repository and storage ports. They back
//! the `memory` repository backend and are the doubles used throughout the tests.

pub mod repositories;
pub mod storage;

pub use repositories::{
    InMemoryColumnMapRepository, InMemoryDataSubmissionRepository, InMemoryProducerRepository,
    InMemoryUserRepository,
};
pub use storage::InMemoryStorage;
