//! Logging and observability
//!
//! All user-visible outcomes of a use case are reported through `tracing`:
//! `info!` for success, `error!` for soft failures.
//!
//! ```no_run
//! use nad_ch::logging::init_logging;
//! use nad_ch::config::LoggingConfig;
//!
//! let _guard = init_logging("info", &LoggingConfig::default()).expect("logging");
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

#[doc(hidden)]
pub use tracing;

/// Log a soft use-case failure
///
/// The use case returns normally afterwards; the log line is the only signal.
///
/// Expands through `nad_ch::logging::tracing`, so callers need no `tracing`
/// dependency of their own.
///
/// ```no_run
/// use nad_ch::log_soft_failure;
///
/// log_soft_failure!("add_data_provider", "Provider name required");
/// ```
#[macro_export]
macro_rules! log_soft_failure {
    ($operation:expr, $message:expr) => {
        $crate::logging::tracing::error!(operation = $operation, "{}", $message);
    };
}

