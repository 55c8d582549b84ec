//! External system integrations for nad-ch.
//!
//! - [`repository`] - Persistence ports and the backend factory
//! - [`memory`] - In-memory repositories and storage
//! - [`postgresql`] - PostgreSQL repositories
//! - [`storage`] - Object storage port and the local filesystem store
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. Use cases only see
//! `Arc<dyn Trait + Send + Sync>` objects.
//!
//! ```rust
//! use nad_ch::adapters::repository::Repositories;
//! use nad_ch::domain::DataProducer;
//!
//! # async fn example() -> nad_ch::domain::Result<()> {
//! let repos = Repositories::in_memory();
//! let producer = repos.producers.add(DataProducer::new("New Jersey")).await?;
//! assert_eq!(producer.id, Some(1));
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod postgresql;
pub mod repository;
pub mod storage;
