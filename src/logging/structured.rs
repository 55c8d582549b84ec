//! Structured logging setup using tracing
//!
//! Console output is always on. A rolling JSON file layer is added when
//! `logging.local_enabled` is set; soft use-case failures then land in the file
//! with their `operation` field intact.

use crate::config::LoggingConfig;
use crate::domain::{NadError, Result};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const LOG_FILE_PREFIX: &str = "nad-ch.log";

/// Keeps the file writer alive; drop it to flush buffered lines
#[derive(Debug)]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Directory receiving JSON log files, if file logging is on
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `log_level` when set.
///
/// # Errors
///
/// Returns [`NadError::Configuration`] for an unknown level, an uncreatable log
/// directory, or if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use nad_ch::logging::init_logging;
/// use nad_ch::config::LoggingConfig;
///
/// let guard = init_logging("info", &LoggingConfig::default()).expect("logging");
/// assert!(guard.log_dir().is_none());
/// ```
pub fn init_logging(log_level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = env_filter(parse_log_level(log_level)?);

    let mut layers: Vec<BoxedLayer> = vec![tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(filter.clone())
        .boxed()];

    let (file_guard, log_dir) = match file_layer(config, filter)? {
        Some((layer, guard)) => {
            layers.push(layer);
            (Some(guard), Some(PathBuf::from(&config.local_path)))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| NadError::Configuration(format!("Logging already initialized: {e}")))?;

    tracing::debug!(log_dir = ?log_dir, "Logging initialized");

    Ok(LoggingGuard {
        _file_guard: file_guard,
        log_dir,
    })
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("nad_ch={level}")))
}

fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        _ => Rotation::DAILY,
    }
}

/// JSON file layer, when enabled
fn file_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<Option<(BoxedLayer, WorkerGuard)>> {
    if !config.local_enabled {
        return Ok(None);
    }

    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        NadError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(
        rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_PREFIX,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok(Some((layer, guard)))
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(NadError::Configuration(format!(
            "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace", Level::TRACE)]
    #[test_case("Debug", Level::DEBUG)]
    #[test_case("INFO", Level::INFO)]
    #[test_case("warn", Level::WARN)]
    #[test_case("error", Level::ERROR)]
    fn test_parse_log_level(input: &str, expected: Level) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test_case("verbose")]
    #[test_case("")]
    fn test_parse_log_level_invalid(input: &str) {
        assert!(matches!(
            parse_log_level(input),
            Err(NadError::Configuration(_))
        ));
    }

    #[test]
    fn test_rotation_falls_back_to_daily() {
        assert_eq!(rotation("hourly"), Rotation::HOURLY);
        assert_eq!(rotation("daily"), Rotation::DAILY);
        assert_eq!(rotation("weekly"), Rotation::DAILY);
    }

    #[test]
    fn test_file_layer_disabled() {
        let config = LoggingConfig::default();
        let layer = file_layer(&config, EnvFilter::new("nad_ch=info")).unwrap();
        assert!(layer.is_none());
    }

    #[test]
    fn test_file_layer_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");
        let config = LoggingConfig {
            local_enabled: true,
            local_path: log_dir.to_string_lossy().to_string(),
            ..LoggingConfig::default()
        };

        let layer = file_layer(&config, EnvFilter::new("nad_ch=info")).unwrap();
        assert!(layer.is_some());
        assert!(log_dir.is_dir());
    }
}
