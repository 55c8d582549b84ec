//! CLI command implementations
//!
//! Every command returns a process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | The request was rejected (unknown name, invalid mapping, ...) |
//! | 2 | Configuration error |
//! | 4 | Connection error |
//! | 5 | Fatal error |

pub mod column_map;
pub mod init;
pub mod producer;
pub mod submission;
pub mod user;
pub mod validate;

use crate::config::{load_config, NadConfig, RepositoryBackend};
use crate::core::context::ApplicationContext;
use crate::domain::NadError;

/// Load configuration and build the application context
///
/// On failure the error is printed and the matching exit code returned.
pub(crate) async fn open_context(config_path: &str) -> Result<ApplicationContext, i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Err(2);
        }
    };

    if let Some(warning) = memory_backend_warning(&config) {
        tracing::warn!(config = %config_path, "{warning}");
        println!("⚠️  {warning}");
    }

    match ApplicationContext::from_config(&config).await {
        Ok(ctx) => Ok(ctx),
        Err(e) => {
            println!("❌ Failed to initialize backends");
            println!("   Error: {e}");
            Err(4)
        }
    }
}

/// Warning for configs whose records do not outlive one command
fn memory_backend_warning(config: &NadConfig) -> Option<&'static str> {
    match config.repository_backend {
        RepositoryBackend::Memory => Some(
            "repository_backend = \"memory\": records are discarded when this command exits; \
             use \"postgresql\" to keep them between commands",
        ),
        RepositoryBackend::PostgreSQL => None,
    }
}

/// Exit code for an error returned by a use case
pub(crate) fn exit_code_for(error: &NadError) -> i32 {
    println!("❌ {error}");
    match error {
        NadError::Validation(_) | NadError::NotFound(_) => 1,
        NadError::Configuration(_) => 2,
        NadError::Database(_) => 4,
        _ => 5,
    }
}
