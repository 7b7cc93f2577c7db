//! Configuration file handling for ~/.platformd/config.ini.
//!
//! Loads user configuration with sensible defaults: a missing file or a
//! missing key falls back to the default value; a present but malformed
//! value is an error rather than a silent fallback.

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::{BrokerSettings, ConfigFile, LoggingSettings};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read or parse the config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        /// INI section name.
        section: String,
        /// Key within the section.
        key: String,
        /// The offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Default config file location: `~/.platformd/config.ini`.
pub fn config_file_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".platformd")
        .join("config.ini")
}

impl ConfigFile {
    /// Load configuration from the default path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("broker")) {
            if let Some(value) = section.get("request_channel_capacity") {
                config.broker.request_channel_capacity =
                    parse_positive(value, "broker", "request_channel_capacity")?;
            }
            if let Some(value) = section.get("backend_timeout_secs") {
                config.broker.backend_timeout_secs =
                    parse_positive(value, "broker", "backend_timeout_secs")? as u64;
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(value) = section.get("directory") {
                config.logging.directory = value.to_string();
            }
            if let Some(value) = section.get("file_name") {
                config.logging.file_name = value.to_string();
            }
        }

        Ok(config)
    }
}

/// Parses a strictly positive integer setting.
fn parse_positive(value: &str, section: &str, key: &str) -> Result<usize, ConfigFileError> {
    match value.parse::<usize>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        Ok(_) => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Err(_) => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "not a valid integer".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_returns_defaults() {
        let config = ConfigFile::load_from(Path::new("/nonexistent/platformd.ini")).unwrap();
        assert_eq!(
            config.broker.request_channel_capacity,
            BrokerSettings::default().request_channel_capacity
        );
        assert_eq!(config.logging.file_name, LoggingSettings::default().file_name);
    }

    #[test]
    fn test_load_overrides() {
        let file = write_config(
            "[broker]\n\
             request_channel_capacity = 256\n\
             backend_timeout_secs = 2\n\
             \n\
             [logging]\n\
             directory = /var/log/platformd\n\
             file_name = broker.log\n",
        );

        let config = ConfigFile::load_from(file.path()).unwrap();

        assert_eq!(config.broker.request_channel_capacity, 256);
        assert_eq!(config.broker.backend_timeout_secs, 2);
        assert_eq!(config.logging.directory, "/var/log/platformd");
        assert_eq!(config.logging.file_name, "broker.log");
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_keys() {
        let file = write_config("[broker]\nbackend_timeout_secs = 10\n");

        let config = ConfigFile::load_from(file.path()).unwrap();

        assert_eq!(config.broker.backend_timeout_secs, 10);
        assert_eq!(
            config.broker.request_channel_capacity,
            BrokerSettings::default().request_channel_capacity
        );
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let file = write_config("[broker]\nrequest_channel_capacity = lots\n");

        let result = ConfigFile::load_from(file.path());
        assert!(matches!(
            result,
            Err(ConfigFileError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let file = write_config("[broker]\nrequest_channel_capacity = 0\n");

        let result = ConfigFile::load_from(file.path());
        assert!(matches!(result, Err(ConfigFileError::InvalidValue { .. })));
    }
}
