//! Core business logic for nad-ch.
//!
//! # Modules
//!
//! - [`context`] - The [`ApplicationContext`] passed to every use case
//! - [`use_cases`] - Provider, submission, column map and user operations
//! - [`view_models`] - Read-only projections returned by use cases
//! - [`tasks`] - Background task dispatch
//! - [`validation`] - CSV validation against a column map
//!
//! # Example
//!
//! ```rust
//! use nad_ch::core::context::ApplicationContext;
//! use nad_ch::core::use_cases::{add_data_provider, list_data_providers};
//!
//! # async fn example() -> nad_ch::domain::Result<()> {
//! let ctx = ApplicationContext::in_memory();
//! add_data_provider(&ctx, "New Jersey").await?;
//!
//! let providers = list_data_providers(&ctx).await?;
//! assert_eq!(providers[0].name, "New Jersey");
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod tasks;
pub mod use_cases;
pub mod validation;
pub mod view_models;

pub use context::ApplicationContext;
