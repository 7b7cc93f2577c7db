//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

/// Complete daemon configuration loaded from config.ini.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    /// Broker worker settings.
    pub broker: BrokerSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Broker worker configuration.
#[derive(Debug, Clone)]
pub struct BrokerSettings {
    /// Capacity of the bounded request channel.
    pub request_channel_capacity: usize,
    /// Time budget in seconds for a single backend call.
    pub backend_timeout_secs: u64,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            request_channel_capacity: 128,
            backend_timeout_secs: 5,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Directory for log files.
    pub directory: String,
    /// Log file name.
    pub file_name: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_name: "platformd.log".to_string(),
        }
    }
}
