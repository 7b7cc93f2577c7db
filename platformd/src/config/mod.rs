//! Daemon configuration.
//!
//! Settings structs are pure data ([`settings`]); INI loading with
//! defaults lives in [`file`]. The broker consumes [`BrokerSettings`]
//! through `BrokerConfig::from`.

mod file;
mod settings;

pub use file::{config_file_path, ConfigFileError};
pub use settings::{BrokerSettings, ConfigFile, LoggingSettings};
