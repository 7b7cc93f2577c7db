//! The broker worker: a serialized request-processing loop.
//!
//! [`PlatformBroker`] is a long-running background task that:
//! - Initializes the backend exactly once before serving
//! - Receives typed request envelopes via a bounded channel
//! - Dispatches each to the matching backend call, one at a time
//! - Bounds every backend call with a timeout
//! - Delivers exactly one typed reply per accepted envelope
//!
//! Serial processing is the core correctness property: the worker is the
//! only holder of the backend, and it never starts the next envelope until
//! the previous reply has been written. No locks are needed anywhere in
//! the backend or around derived state.
//!
//! # Example
//!
//! ```ignore
//! use platformd::broker::{BrokerConfig, PlatformBroker};
//!
//! let (broker, handle, mut ready_rx) = PlatformBroker::new(config, backend);
//!
//! let shutdown = CancellationToken::new();
//! tokio::spawn(broker.run(shutdown.clone()));
//!
//! ready_rx.wait_for(|ready| *ready).await?;
//! let fan = handle.get_fan_state(0).await?;
//! ```

use crate::backend::{BackendFuture, PlatformBackend};
use crate::error::{BackendError, BrokerError};
use crate::model::{FanConfig, ObjectClass, ObjectKey, Page};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::handle::BrokerHandle;
use super::request::{PlatformRequest, Reply};

// =============================================================================
// Configuration
// =============================================================================

/// Default capacity of the bounded request channel.
///
/// A full channel blocks submitters, which is the intended back-pressure:
/// a slow backend slows callers down instead of piling up concurrent work.
pub const DEFAULT_REQUEST_CHANNEL_CAPACITY: usize = 128;

/// Default time budget for a single backend call.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the broker worker.
#[derive(Clone, Debug)]
pub struct BrokerConfig {
    /// Request channel capacity.
    pub channel_capacity: usize,

    /// Time budget for each backend call. On expiry the caller receives
    /// a timeout error and the worker moves on to the next envelope.
    pub backend_timeout: Duration,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_REQUEST_CHANNEL_CAPACITY,
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }
}

impl From<&crate::config::BrokerSettings> for BrokerConfig {
    fn from(settings: &crate::config::BrokerSettings) -> Self {
        Self {
            channel_capacity: settings.request_channel_capacity,
            backend_timeout: Duration::from_secs(settings.backend_timeout_secs),
        }
    }
}

// =============================================================================
// Broker state machine
// =============================================================================

/// Lifecycle state of the broker worker.
///
/// `Uninitialized -> Ready -> ShuttingDown`, with `ShuttingDown` terminal.
/// Requests submitted while `Uninitialized` sit in the bounded channel and
/// are served once `Ready`; if initialization fails the channel closes and
/// every waiting caller observes a not-ready error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokerState {
    /// Backend init has not completed; the channel is not yet drained.
    Uninitialized,
    /// Serving requests.
    Ready,
    /// Terminal: no further envelopes are accepted.
    ShuttingDown,
}

// =============================================================================
// Platform Broker
// =============================================================================

/// The serialized request broker worker.
///
/// Owns the backend exclusively; all other components hold only a
/// [`BrokerHandle`] (channel sender). Runs as a long-lived task via
/// [`PlatformBroker::run`].
pub struct PlatformBroker {
    /// The hardware-abstraction backend. Touched only from this worker.
    backend: Box<dyn PlatformBackend>,

    /// Worker configuration.
    config: BrokerConfig,

    /// Channel receiver for request envelopes.
    request_rx: mpsc::Receiver<PlatformRequest>,

    /// Readiness signal, flipped to `true` after backend init succeeds.
    ready_tx: watch::Sender<bool>,

    /// Current lifecycle state.
    state: BrokerState,
}

impl PlatformBroker {
    /// Creates a broker with its submission handle and readiness receiver.
    ///
    /// The handle can be cloned freely and shared across tasks; the
    /// readiness receiver resolves to `true` once the backend is
    /// initialized and the worker is draining requests.
    pub fn new(
        config: BrokerConfig,
        backend: Box<dyn PlatformBackend>,
    ) -> (Self, BrokerHandle, watch::Receiver<bool>) {
        let (request_tx, request_rx) = mpsc::channel(config.channel_capacity);
        let (ready_tx, ready_rx) = watch::channel(false);

        let broker = Self {
            backend,
            config,
            request_rx,
            ready_tx,
            state: BrokerState::Uninitialized,
        };

        (broker, BrokerHandle::new(request_tx), ready_rx)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BrokerState {
        self.state
    }

    /// Runs the worker until shutdown is signalled or all handles drop.
    ///
    /// Initializes the backend first; a failure there is returned to the
    /// caller (the lifecycle controller treats it as fatal) and no request
    /// is ever served. On success the readiness watch flips to `true` and
    /// the loop drains the channel, strictly one envelope at a time.
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<(), BackendError> {
        info!("Platform broker starting");

        if let Err(e) = self.backend.init().await {
            error!(error = %e, "Backend initialization failed");
            return Err(e);
        }

        self.state = BrokerState::Ready;
        let _ = self.ready_tx.send(true);
        info!("Backend initialized, broker ready");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    self.state = BrokerState::ShuttingDown;
                    info!("Platform broker shutting down");
                    break;
                }

                maybe_request = self.request_rx.recv() => {
                    match maybe_request {
                        Some(request) => self.handle_request(request).await,
                        None => {
                            // Every handle dropped; nothing left to serve.
                            self.state = BrokerState::ShuttingDown;
                            info!("All broker handles dropped, stopping");
                            break;
                        }
                    }
                }
            }
        }

        info!("Platform broker stopped");
        Ok(())
    }

    /// Dispatches one envelope and writes its reply.
    ///
    /// The match is exhaustive over the closed operation set, so an
    /// unhandled operation kind cannot compile. Cursor and attribute
    /// validation happen before any backend future is created.
    async fn handle_request(&mut self, request: PlatformRequest) {
        let op = request.op_name();
        let class = request.class();
        let timeout = self.config.backend_timeout;
        debug!(op, %class, "Request received");

        match request {
            PlatformRequest::GetFanState { fan_id, reply } => {
                let fut = self.backend.fan_state(fan_id);
                let result = fetch_one(timeout, class, op, ObjectKey::Id(fan_id), fut).await;
                send_reply(op, reply, result);
            }
            PlatformRequest::GetBulkFanState { cursor, reply } => {
                let result = match check_cursor(cursor) {
                    Ok(()) => {
                        fetch_page(timeout, class, op, self.backend.fan_state_range(cursor)).await
                    }
                    Err(e) => Err(e),
                };
                send_reply(op, reply, result);
            }
            PlatformRequest::GetFanConfig { fan_id, reply } => {
                let fut = self.backend.fan_config(fan_id);
                let result = fetch_one(timeout, class, op, ObjectKey::Id(fan_id), fut).await;
                send_reply(op, reply, result);
            }
            PlatformRequest::GetBulkFanConfig { cursor, reply } => {
                let result = match check_cursor(cursor) {
                    Ok(()) => {
                        fetch_page(timeout, class, op, self.backend.fan_config_range(cursor)).await
                    }
                    Err(e) => Err(e),
                };
                send_reply(op, reply, result);
            }
            PlatformRequest::UpdateFanConfig {
                old,
                new,
                attrs,
                reply,
            } => {
                let result = self.update_fan_config(op, old, new, attrs).await;
                send_reply(op, reply, result);
            }
            PlatformRequest::GetSfpState { sfp_id, reply } => {
                let fut = self.backend.sfp_state(sfp_id);
                let result = fetch_one(timeout, class, op, ObjectKey::Id(sfp_id), fut).await;
                send_reply(op, reply, result);
            }
            PlatformRequest::GetBulkSfpState { cursor, reply } => {
                let result = match check_cursor(cursor) {
                    Ok(()) => {
                        fetch_page(timeout, class, op, self.backend.sfp_state_range(cursor)).await
                    }
                    Err(e) => Err(e),
                };
                send_reply(op, reply, result);
            }
            PlatformRequest::GetThermalState { sensor_id, reply } => {
                let fut = self.backend.thermal_state(sensor_id);
                let result = fetch_one(timeout, class, op, ObjectKey::Id(sensor_id), fut).await;
                send_reply(op, reply, result);
            }
            PlatformRequest::GetBulkThermalState { cursor, reply } => {
                let result = match check_cursor(cursor) {
                    Ok(()) => {
                        fetch_page(timeout, class, op, self.backend.thermal_state_range(cursor))
                            .await
                    }
                    Err(e) => Err(e),
                };
                send_reply(op, reply, result);
            }
            PlatformRequest::GetPlatformState { name, reply } => {
                let fut = self.backend.platform_state(&name);
                let result =
                    fetch_one(timeout, class, op, ObjectKey::Name(name.clone()), fut).await;
                send_reply(op, reply, result);
            }
            PlatformRequest::GetBulkPlatformState { cursor, reply } => {
                let result = match check_cursor(cursor) {
                    Ok(()) => {
                        fetch_page(timeout, class, op, self.backend.platform_state_range(cursor))
                            .await
                    }
                    Err(e) => Err(e),
                };
                send_reply(op, reply, result);
            }
        }
    }

    /// Validates and applies a fan config update.
    ///
    /// Attribute validation runs before the backend is touched, so a bad
    /// attribute set can never cause a partial write. `Ok(false)` from the
    /// backend means the optimistic check failed and becomes a conflict.
    async fn update_fan_config(
        &mut self,
        op: &'static str,
        old: FanConfig,
        new: FanConfig,
        attrs: crate::model::AttrSet,
    ) -> Result<bool, BrokerError> {
        let unknown = attrs.unknown_names(FanConfig::MUTABLE_ATTRS);
        if !unknown.is_empty() {
            return Err(BrokerError::Validation(format!(
                "unknown or immutable fan config attributes: {}",
                unknown.join(", ")
            )));
        }

        let fan_id = old.fan_id;
        let fut = self.backend.update_fan_config(old, new, attrs);
        match tokio::time::timeout(self.config.backend_timeout, fut).await {
            Ok(Ok(true)) => Ok(true),
            Ok(Ok(false)) => Err(BrokerError::Conflict(format!(
                "fan {} config changed since it was read",
                fan_id
            ))),
            Ok(Err(e)) => Err(BrokerError::Backend(e)),
            Err(_) => Err(BrokerError::Timeout {
                class: ObjectClass::Fan,
                op,
            }),
        }
    }
}

// =============================================================================
// Dispatch helpers
// =============================================================================

/// Runs a single-object backend read under the time budget.
///
/// Shared across all object classes; adding a class reuses this rather
/// than growing a copy-pasted switch.
async fn fetch_one<T>(
    limit: Duration,
    class: ObjectClass,
    op: &'static str,
    key: ObjectKey,
    fut: BackendFuture<'_, Option<T>>,
) -> Result<T, BrokerError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(Some(value))) => Ok(value),
        Ok(Ok(None)) => Err(BrokerError::NotFound { class, key }),
        Ok(Err(e)) => Err(BrokerError::Backend(e)),
        Err(_) => Err(BrokerError::Timeout { class, op }),
    }
}

/// Runs a bulk backend read under the time budget.
async fn fetch_page<T>(
    limit: Duration,
    class: ObjectClass,
    op: &'static str,
    fut: BackendFuture<'_, Page<T>>,
) -> Result<Page<T>, BrokerError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(page)) => Ok(page),
        Ok(Err(e)) => Err(BrokerError::Backend(e)),
        Err(_) => Err(BrokerError::Timeout { class, op }),
    }
}

/// Validates a bulk cursor before any backend future exists.
fn check_cursor(cursor: crate::model::BulkCursor) -> Result<(), BrokerError> {
    cursor.validate().map_err(BrokerError::InvalidArgument)
}

/// Writes the reply for one envelope.
///
/// Failures are logged here so every operation gets uniform treatment. The
/// oneshot send never blocks; a caller that stopped waiting just loses its
/// reply without wedging the worker.
fn send_reply<T>(op: &'static str, reply: Reply<T>, result: Result<T, BrokerError>) {
    if let Err(ref e) = result {
        warn!(op, error = %e, "Request failed");
    }
    if reply.send(result).is_err() {
        debug!(op, "Caller gone before reply could be delivered");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{SimBackend, SimBackendConfig};
    use crate::model::{AttrSet, BulkCursor, FanDirection};

    fn sim_backend() -> Box<dyn PlatformBackend> {
        Box::new(SimBackend::new(SimBackendConfig::default()))
    }

    /// Spawns a broker over the sim backend, returning the handle and the
    /// shutdown token once it is ready.
    async fn start_broker() -> (BrokerHandle, CancellationToken) {
        let (broker, handle, mut ready_rx) = PlatformBroker::new(BrokerConfig::default(), sim_backend());
        let shutdown = CancellationToken::new();
        tokio::spawn(broker.run(shutdown.clone()));
        ready_rx.wait_for(|ready| *ready).await.unwrap();
        (handle, shutdown)
    }

    #[test]
    fn test_config_default() {
        let config = BrokerConfig::default();
        assert_eq!(config.channel_capacity, DEFAULT_REQUEST_CHANNEL_CAPACITY);
        assert_eq!(config.backend_timeout, DEFAULT_BACKEND_TIMEOUT);
    }

    #[test]
    fn test_broker_starts_uninitialized() {
        let (broker, _handle, ready_rx) = PlatformBroker::new(BrokerConfig::default(), sim_backend());
        assert_eq!(broker.state(), BrokerState::Uninitialized);
        assert!(!*ready_rx.borrow());
    }

    #[tokio::test]
    async fn test_ready_after_init_and_serves_request() {
        let (handle, shutdown) = start_broker().await;

        let fan = handle.get_fan_state(0).await.unwrap();
        assert_eq!(fan.fan_id, 0);

        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (handle, shutdown) = start_broker().await;

        let result = handle.get_fan_state(99).await;
        assert!(matches!(result, Err(BrokerError::NotFound { .. })));

        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_zero_count_cursor_is_invalid_argument() {
        let (handle, shutdown) = start_broker().await;

        let result = handle.get_bulk_fan_state(BulkCursor::new(0, 0)).await;
        assert!(matches!(result, Err(BrokerError::InvalidArgument(_))));

        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_update_with_unknown_attr_fails_validation() {
        let (handle, shutdown) = start_broker().await;

        let old = handle.get_fan_config(0).await.unwrap();
        let mut new = old.clone();
        new.admin_speed = 75;

        let result = handle
            .update_fan_config(old.clone(), new, AttrSet::new(["speed"]))
            .await;
        assert!(matches!(result, Err(BrokerError::Validation(_))));

        // Backend state untouched
        let unchanged = handle.get_fan_config(0).await.unwrap();
        assert_eq!(unchanged, old);

        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_update_direction_only_patch() {
        let (handle, shutdown) = start_broker().await;

        let old = handle.get_fan_config(1).await.unwrap();
        let new = FanConfig {
            fan_id: 1,
            admin_speed: 99, // not named in attrs, must not be applied
            admin_direction: FanDirection::BackToFront,
        };

        let applied = handle
            .update_fan_config(old.clone(), new, AttrSet::new(["admin_direction"]))
            .await
            .unwrap();
        assert!(applied);

        let current = handle.get_fan_config(1).await.unwrap();
        assert_eq!(current.admin_direction, FanDirection::BackToFront);
        assert_eq!(current.admin_speed, old.admin_speed);

        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_shutdown_leaves_waiting_callers_not_ready() {
        let (handle, shutdown) = start_broker().await;

        shutdown.cancel();
        // Give the worker a moment to observe cancellation and drop the
        // channel receiver.
        tokio::task::yield_now().await;

        // The envelope is either rejected at the closed channel or its
        // reply channel is dropped; both must surface NotReady.
        let result = handle.get_fan_state(0).await;
        assert!(matches!(result, Err(BrokerError::NotReady)));
    }
}
