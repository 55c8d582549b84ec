//! PostgreSQL persistence
//!
//! Implements the repository traits on top of a pooled `tokio-postgres` client.
//! The schema lives in `migrations/001_initial_schema.sql` and is applied by
//! [`PostgreSQLClient::ensure_schema`].

pub mod client;
pub mod models;
pub mod repositories;

pub use client::PostgreSQLClient;
pub use repositories::{
    PostgreSQLColumnMapRepository, PostgreSQLDataSubmissionRepository,
    PostgreSQLProducerRepository, PostgreSQLUserRepository,
};
