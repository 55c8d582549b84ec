//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{NadConfig, RepositoryBackend, StorageBackend};
use crate::config::secret_string;
use crate::domain::errors::NadError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into NadConfig
/// 4. Applies environment variable overrides (NAD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`NadError::Configuration`] if the file is missing or unreadable, a
/// referenced environment variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use nad_ch::config::loader::load_config;
///
/// let config = load_config("nad.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<NadConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(NadError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        NadError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_from_str(contents: &str) -> Result<NadConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: NadConfig = toml::from_str(&contents)
        .map_err(|e| NadError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        NadError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| NadError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(NadError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using NAD_* prefix
///
/// Environment variables follow the pattern: NAD_<SECTION>_<KEY>
/// For example: NAD_APPLICATION_LOG_LEVEL, NAD_STORAGE_BASE_PATH
fn apply_env_overrides(config: &mut NadConfig) -> Result<()> {
    if let Ok(val) = std::env::var("NAD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("NAD_REPOSITORY_BACKEND") {
        config.repository_backend = match val.to_lowercase().as_str() {
            "memory" => RepositoryBackend::Memory,
            "postgresql" => RepositoryBackend::PostgreSQL,
            other => {
                return Err(NadError::Configuration(format!(
                    "Invalid NAD_REPOSITORY_BACKEND '{other}'. Must be one of: memory, postgresql"
                )))
            }
        };
    }

    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("NAD_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("NAD_POSTGRESQL_MAX_CONNECTIONS") {
            if let Ok(max) = val.parse() {
                pg_config.max_connections = max;
            }
        }
    }

    if let Ok(val) = std::env::var("NAD_STORAGE_BACKEND") {
        config.storage.backend = match val.to_lowercase().as_str() {
            "local" => StorageBackend::Local,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(NadError::Configuration(format!(
                    "Invalid NAD_STORAGE_BACKEND '{other}'. Must be one of: local, memory"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("NAD_STORAGE_BASE_PATH") {
        config.storage.base_path = val;
    }

    if let Ok(val) = std::env::var("NAD_TASKS_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.tasks.timeout_seconds = timeout;
        }
    }

    if let Ok(val) = std::env::var("NAD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("NAD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("NAD_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${NAD_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("NAD_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("NAD_LOADER_MISSING_VAR");
        let input = "password = \"${NAD_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("NAD_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# password = \"${NAD_LOADER_COMMENTED_OUT}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(NadError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[storage]
backend = "memory"

[tasks]
timeout_seconds = 30
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.tasks.timeout_seconds, 30);
    }

    #[test]
    fn test_load_config_invalid() {
        let result = load_config_from_str("[tasks]\ntimeout_seconds = 0\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("tasks.timeout_seconds"));
    }
}
