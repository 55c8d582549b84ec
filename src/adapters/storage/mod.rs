//! Object storage for submitted files
//!
//! - [`traits`] - The [`Storage`] port used by use cases
//! - [`local`] - Filesystem implementation
//!
//! An in-memory implementation lives in [`crate::adapters::memory`].

pub mod local;
pub mod traits;

pub use local::LocalStorage;
pub use traits::{DownloadResult, Storage};
