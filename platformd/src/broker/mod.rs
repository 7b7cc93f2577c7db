//! The serialized request broker.
//!
//! One worker task owns the [`crate::backend::PlatformBackend`] handle and
//! drains a bounded request channel; any number of caller tasks submit
//! concurrently through a cloneable [`BrokerHandle`]. Each request is a
//! typed envelope carrying its own oneshot reply channel, so concurrent
//! callers never contend for a shared reply path.

mod daemon;
mod handle;
pub mod lifecycle;
mod request;

pub use daemon::{BrokerConfig, BrokerState, PlatformBroker, DEFAULT_REQUEST_CHANNEL_CAPACITY};
pub use handle::BrokerHandle;
pub use lifecycle::{BrokerRuntime, LifecycleError};
pub use request::{PlatformRequest, Reply};
