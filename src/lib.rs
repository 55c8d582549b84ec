// nad-ch - National Address Database Collaboration Hub
// Copyright (c) 2025 NAD Collaboration Hub Contributors
// Licensed under the MIT License

//! # nad-ch - National Address Database Collaboration Hub
//!
//! nad-ch manages the reference data behind address-data submissions: the
//! producers that submit files, their users, the submitted files themselves,
//! and the column maps that translate each producer's columns onto the
//! canonical address schema.
//!
//! ## Overview
//!
//! This library provides:
//! - **Registering** data producers and their users
//! - **Ingesting** submitted files into object storage
//! - **Mapping** producer columns onto the 18 canonical address fields
//! - **Validating** a stored submission against a column map in a background task
//!
//! ## Architecture
//!
//! nad-ch follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Use cases, view models, the application context and tasks
//! - [`adapters`] - Repositories (in-memory, PostgreSQL) and object storage
//! - [`domain`] - Entities, the canonical schema and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nad_ch::config::load_config;
//! use nad_ch::core::use_cases::{add_data_provider, ingest_data_submission};
//! use nad_ch::core::ApplicationContext;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("nad.toml")?;
//!     let ctx = ApplicationContext::from_config(&config).await?;
//!
//!     add_data_provider(&ctx, "New Jersey").await?;
//!     if let Some(submission) = ingest_data_submission(&ctx, "addresses.csv", "New Jersey").await? {
//!         println!("Stored at {}", submission.url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Column Maps
//!
//! ```rust
//! use nad_ch::core::use_cases::{add_column_map, add_data_provider, add_user};
//! use nad_ch::core::ApplicationContext;
//! use nad_ch::domain::Mapping;
//!
//! # async fn example() -> nad_ch::domain::Result<()> {
//! let ctx = ApplicationContext::in_memory();
//! add_data_provider(&ctx, "New Jersey").await?;
//! let user = add_user(&ctx, "gis@nj.example", "Ada", "Lovelace", "New Jersey").await?;
//!
//! let mut mapping = Mapping::new();
//! mapping.insert("Add_Number".to_string(), "address_number".to_string());
//! let column_map = add_column_map(&ctx, user.id, "NJ export", mapping).await?;
//! assert_eq!(column_map.producer_name, "New Jersey");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::NadError`]. Provider and submission
//! use cases log bad input and return `None`; column map and user use cases
//! return it as an error. See [`core::use_cases`].
//!
//! ## Logging
//!
//! nad-ch uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, error};
//!
//! info!(provider = "New Jersey", "Provider added");
//! error!(operation = "ingest_data_submission", "File name required");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
