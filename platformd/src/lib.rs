//! platformd - serialized hardware platform state broker
//!
//! This library provides the core of a platform management daemon: a single
//! logical owner of a switch/server platform's physical inventory (fans,
//! optical modules, thermal sensors, generic platform objects) that accepts
//! typed queries and mutations from arbitrary concurrent callers and
//! processes them one at a time against a pluggable hardware backend.
//!
//! # High-Level API
//!
//! ```ignore
//! use platformd::backend::{SimBackend, SimBackendConfig};
//! use platformd::broker::{lifecycle, BrokerConfig};
//!
//! let backend = Box::new(SimBackend::new(SimBackendConfig::default()));
//! let runtime = lifecycle::start(BrokerConfig::default(), backend).await?;
//!
//! let handle = runtime.handle();
//! let fan = handle.get_fan_state(0).await?;
//!
//! runtime.shutdown().await?;
//! ```

pub mod backend;
pub mod broker;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

/// Version of the platformd library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
