//! Broker lifecycle: startup, readiness, shutdown.
//!
//! [`start`] drives the one-shot startup sequence: build the broker,
//! spawn its worker task, and wait for the backend to initialize. The
//! process owner only advertises the daemon once `start` returns; a
//! backend that cannot initialize means no platform data can ever be
//! served, so that failure is returned as fatal rather than retried.

use crate::backend::PlatformBackend;
use crate::error::BackendError;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::daemon::{BrokerConfig, PlatformBroker};
use super::handle::BrokerHandle;

/// Errors from broker startup and shutdown.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Backend initialization failed; the daemon cannot serve.
    #[error("backend initialization failed: {0}")]
    Init(#[from] BackendError),

    /// The worker task ended without reporting readiness or panicked.
    #[error("broker task terminated unexpectedly")]
    Terminated,
}

/// A running broker: submission handle plus shutdown control.
///
/// Dropping the runtime without calling [`BrokerRuntime::shutdown`] leaves
/// the worker running until every handle is dropped.
pub struct BrokerRuntime {
    handle: BrokerHandle,
    shutdown: CancellationToken,
    join: JoinHandle<Result<(), BackendError>>,
}

impl BrokerRuntime {
    /// Returns a clone of the submission handle.
    pub fn handle(&self) -> BrokerHandle {
        self.handle.clone()
    }

    /// Token that cancels the worker; useful for wiring into a process-wide
    /// shutdown tree.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Signals shutdown and waits for the worker to stop.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Stopping platform broker");
        self.shutdown.cancel();
        match self.join.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(LifecycleError::Init(e)),
            Err(_) => Err(LifecycleError::Terminated),
        }
    }
}

/// Starts the broker and waits until it is ready to serve.
///
/// The backend's `init` runs exactly once, before any request is served.
/// Requests submitted through the returned handle before this resolves
/// wait in the bounded channel rather than being dropped.
///
/// # Errors
///
/// Returns [`LifecycleError::Init`] if backend initialization fails; the
/// caller should treat this as fatal to the daemon.
pub async fn start(
    config: BrokerConfig,
    backend: Box<dyn PlatformBackend>,
) -> Result<BrokerRuntime, LifecycleError> {
    let (broker, handle, mut ready_rx) = PlatformBroker::new(config, backend);
    let shutdown = CancellationToken::new();
    let join = tokio::spawn(broker.run(shutdown.clone()));

    // Readiness flips to true after init; if the worker exits first the
    // watch sender drops and we surface its error instead.
    if ready_rx.wait_for(|ready| *ready).await.is_err() {
        return match join.await {
            Ok(Err(e)) => Err(LifecycleError::Init(e)),
            _ => Err(LifecycleError::Terminated),
        };
    }

    info!("Platform broker ready");
    Ok(BrokerRuntime {
        handle,
        shutdown,
        join,
    })
}
