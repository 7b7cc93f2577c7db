//! Request submission interface.
//!
//! [`BrokerHandle`] is the public surface callers use to talk to the
//! broker. It is cheap to clone and safe to share across tasks: every
//! call builds a fresh envelope with its own reply channel, submits it on
//! the bounded request channel (blocking the caller while the channel is
//! full, which is the broker's back-pressure), and awaits that reply.

use crate::error::BrokerError;
use crate::model::{
    AttrSet, BulkCursor, FanConfig, FanState, Page, PlatformState, SfpState, ThermalState,
};
use tokio::sync::{mpsc, oneshot};

use super::request::PlatformRequest;

/// Cloneable handle for submitting requests to the broker.
#[derive(Clone)]
pub struct BrokerHandle {
    sender: mpsc::Sender<PlatformRequest>,
}

impl BrokerHandle {
    /// Creates a handle over the broker's request channel.
    pub(crate) fn new(sender: mpsc::Sender<PlatformRequest>) -> Self {
        Self { sender }
    }

    /// Reads one fan's state snapshot.
    pub async fn get_fan_state(&self, fan_id: u32) -> Result<FanState, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(PlatformRequest::GetFanState { fan_id, reply }, rx)
            .await
    }

    /// Reads a page of fan state snapshots.
    pub async fn get_bulk_fan_state(
        &self,
        cursor: BulkCursor,
    ) -> Result<Page<FanState>, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(PlatformRequest::GetBulkFanState { cursor, reply }, rx)
            .await
    }

    /// Reads one fan's config record.
    pub async fn get_fan_config(&self, fan_id: u32) -> Result<FanConfig, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(PlatformRequest::GetFanConfig { fan_id, reply }, rx)
            .await
    }

    /// Reads a page of fan config records.
    pub async fn get_bulk_fan_config(
        &self,
        cursor: BulkCursor,
    ) -> Result<Page<FanConfig>, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(PlatformRequest::GetBulkFanConfig { cursor, reply }, rx)
            .await
    }

    /// Sparse-patches one fan's config.
    ///
    /// Only the fields of `new` named in `attrs` are applied, and only if
    /// the backend's current record still equals `old`.
    pub async fn update_fan_config(
        &self,
        old: FanConfig,
        new: FanConfig,
        attrs: AttrSet,
    ) -> Result<bool, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(
            PlatformRequest::UpdateFanConfig {
                old,
                new,
                attrs,
                reply,
            },
            rx,
        )
        .await
    }

    /// Reads one optical module's state snapshot.
    pub async fn get_sfp_state(&self, sfp_id: u32) -> Result<SfpState, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(PlatformRequest::GetSfpState { sfp_id, reply }, rx)
            .await
    }

    /// Reads a page of optical module snapshots.
    pub async fn get_bulk_sfp_state(
        &self,
        cursor: BulkCursor,
    ) -> Result<Page<SfpState>, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(PlatformRequest::GetBulkSfpState { cursor, reply }, rx)
            .await
    }

    /// Reads one thermal sensor's state snapshot.
    pub async fn get_thermal_state(&self, sensor_id: u32) -> Result<ThermalState, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(PlatformRequest::GetThermalState { sensor_id, reply }, rx)
            .await
    }

    /// Reads a page of thermal sensor snapshots.
    pub async fn get_bulk_thermal_state(
        &self,
        cursor: BulkCursor,
    ) -> Result<Page<ThermalState>, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(PlatformRequest::GetBulkThermalState { cursor, reply }, rx)
            .await
    }

    /// Reads one platform identity object by name.
    pub async fn get_platform_state(
        &self,
        name: impl Into<String>,
    ) -> Result<PlatformState, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(
            PlatformRequest::GetPlatformState {
                name: name.into(),
                reply,
            },
            rx,
        )
        .await
    }

    /// Reads a page of platform identity objects.
    pub async fn get_bulk_platform_state(
        &self,
        cursor: BulkCursor,
    ) -> Result<Page<PlatformState>, BrokerError> {
        let (reply, rx) = oneshot::channel();
        self.call(PlatformRequest::GetBulkPlatformState { cursor, reply }, rx)
            .await
    }

    /// Submits one envelope and awaits its reply.
    ///
    /// A closed request channel (startup failed, or the broker stopped)
    /// and a dropped reply channel both surface as `NotReady`: in either
    /// case the broker is not serving, and the request was never silently
    /// dropped mid-flight.
    async fn call<T>(
        &self,
        request: PlatformRequest,
        rx: oneshot::Receiver<Result<T, BrokerError>>,
    ) -> Result<T, BrokerError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| BrokerError::NotReady)?;
        rx.await.unwrap_or(Err(BrokerError::NotReady))
    }
}
