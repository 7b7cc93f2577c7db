//! Hardware-abstraction backend capability.
//!
//! The broker delegates all physical access to a [`PlatformBackend`]. The
//! trait is object-safe (boxed-future methods) so the broker can own a
//! `Box<dyn PlatformBackend>` chosen at startup. Implementations need no
//! interior locking: the broker's worker task is the only component that
//! ever touches the backend, and it makes exactly one call at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐                         ┌───────────────────┐
//! │ BrokerHandle │──► PlatformRequest ───► │  PlatformBroker   │
//! └──────────────┘        (channel)        │  (serial worker)  │
//!                                          └─────────┬─────────┘
//!                                                    │ &mut, one call
//!                                                    ▼    at a time
//!                                          ┌───────────────────┐
//!                                          │  PlatformBackend  │
//!                                          │ (sim / hw plugin) │
//!                                          └───────────────────┘
//! ```

mod sim;

pub use sim::{SimBackend, SimBackendConfig};

use crate::error::BackendError;
use crate::model::{
    AttrSet, BulkCursor, FanConfig, FanState, Page, PlatformState, SfpState, ThermalState,
};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by backend methods.
///
/// Methods must be genuinely asynchronous (or fast): the broker bounds
/// every call with `tokio::time::timeout` and drops the future on expiry,
/// which only works if the future suspends rather than blocking a thread.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'a>>;

/// Pluggable hardware-abstraction layer.
///
/// Per object class the backend exposes get-by-key, get-range and (for
/// fans) config read/update. `get` methods return `Ok(None)` for unknown
/// keys; the broker maps that to a typed not-found error. `update_fan_config`
/// returns `Ok(false)` when the optimistic-concurrency check fails (the
/// supplied old record no longer matches current state) and must perform
/// no write in that case.
pub trait PlatformBackend: Send + 'static {
    /// One-time initialization, called exactly once before any request is
    /// served. Failure here is fatal to the daemon.
    fn init(&mut self) -> BackendFuture<'_, ()>;

    /// Reads one fan's state snapshot.
    fn fan_state(&mut self, fan_id: u32) -> BackendFuture<'_, Option<FanState>>;

    /// Reads a page of fan state snapshots in id order.
    fn fan_state_range(&mut self, cursor: BulkCursor) -> BackendFuture<'_, Page<FanState>>;

    /// Reads one fan's config record.
    fn fan_config(&mut self, fan_id: u32) -> BackendFuture<'_, Option<FanConfig>>;

    /// Reads a page of fan config records in id order.
    fn fan_config_range(&mut self, cursor: BulkCursor) -> BackendFuture<'_, Page<FanConfig>>;

    /// Applies the fields named in `attrs` from `new` to the fan keyed by
    /// `old.fan_id`, provided the current record still equals `old`.
    ///
    /// Returns `Ok(true)` if the write was applied, `Ok(false)` if the
    /// optimistic check failed (no write performed). Attribute names are
    /// validated by the broker before this is called.
    fn update_fan_config(
        &mut self,
        old: FanConfig,
        new: FanConfig,
        attrs: AttrSet,
    ) -> BackendFuture<'_, bool>;

    /// Reads one optical module's state snapshot.
    fn sfp_state(&mut self, sfp_id: u32) -> BackendFuture<'_, Option<SfpState>>;

    /// Reads a page of optical module snapshots in id order.
    fn sfp_state_range(&mut self, cursor: BulkCursor) -> BackendFuture<'_, Page<SfpState>>;

    /// Reads one thermal sensor's state snapshot.
    fn thermal_state(&mut self, sensor_id: u32) -> BackendFuture<'_, Option<ThermalState>>;

    /// Reads a page of thermal sensor snapshots in id order.
    fn thermal_state_range(&mut self, cursor: BulkCursor) -> BackendFuture<'_, Page<ThermalState>>;

    /// Reads one platform identity object by name.
    fn platform_state(&mut self, name: &str) -> BackendFuture<'_, Option<PlatformState>>;

    /// Reads a page of platform identity objects in name order.
    fn platform_state_range(
        &mut self,
        cursor: BulkCursor,
    ) -> BackendFuture<'_, Page<PlatformState>>;
}
