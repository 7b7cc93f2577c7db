//! Request envelopes for broker communication.
//!
//! [`PlatformRequest`] is the closed set of operations the broker serves.
//! Each variant pairs one operation kind with its exact typed input and a
//! oneshot reply sender, so a payload that does not match its kind is
//! unrepresentable and every dispatch match is checked for exhaustiveness
//! by the compiler. Replies carry `Result<Out, BrokerError>`: exactly one
//! reply per accepted envelope, never both a value and an error.

use crate::error::BrokerError;
use crate::model::{
    AttrSet, BulkCursor, FanConfig, FanState, ObjectClass, Page, PlatformState, SfpState,
    ThermalState,
};
use tokio::sync::oneshot;

/// Reply channel for one request.
pub type Reply<T> = oneshot::Sender<Result<T, BrokerError>>;

/// A typed operation envelope submitted to the broker.
pub enum PlatformRequest {
    /// Read one fan's state snapshot.
    GetFanState {
        /// Fan id to look up.
        fan_id: u32,
        /// Reply channel.
        reply: Reply<FanState>,
    },
    /// Read a page of fan state snapshots.
    GetBulkFanState {
        /// Page to fetch.
        cursor: BulkCursor,
        /// Reply channel.
        reply: Reply<Page<FanState>>,
    },
    /// Read one fan's config record.
    GetFanConfig {
        /// Fan id to look up.
        fan_id: u32,
        /// Reply channel.
        reply: Reply<FanConfig>,
    },
    /// Read a page of fan config records.
    GetBulkFanConfig {
        /// Page to fetch.
        cursor: BulkCursor,
        /// Reply channel.
        reply: Reply<Page<FanConfig>>,
    },
    /// Sparse-patch one fan's config with an optimistic-concurrency check.
    UpdateFanConfig {
        /// Expected current record.
        old: FanConfig,
        /// Record carrying the new values.
        new: FanConfig,
        /// Fields of `new` that are authoritative.
        attrs: AttrSet,
        /// Reply channel; `true` means the write was applied.
        reply: Reply<bool>,
    },
    /// Read one optical module's state snapshot.
    GetSfpState {
        /// Module id to look up.
        sfp_id: u32,
        /// Reply channel.
        reply: Reply<SfpState>,
    },
    /// Read a page of optical module snapshots.
    GetBulkSfpState {
        /// Page to fetch.
        cursor: BulkCursor,
        /// Reply channel.
        reply: Reply<Page<SfpState>>,
    },
    /// Read one thermal sensor's state snapshot.
    GetThermalState {
        /// Sensor id to look up.
        sensor_id: u32,
        /// Reply channel.
        reply: Reply<ThermalState>,
    },
    /// Read a page of thermal sensor snapshots.
    GetBulkThermalState {
        /// Page to fetch.
        cursor: BulkCursor,
        /// Reply channel.
        reply: Reply<Page<ThermalState>>,
    },
    /// Read one platform identity object by name.
    GetPlatformState {
        /// Object name to look up.
        name: String,
        /// Reply channel.
        reply: Reply<PlatformState>,
    },
    /// Read a page of platform identity objects.
    GetBulkPlatformState {
        /// Page to fetch.
        cursor: BulkCursor,
        /// Reply channel.
        reply: Reply<Page<PlatformState>>,
    },
}

impl PlatformRequest {
    /// Operation name for structured logs.
    pub fn op_name(&self) -> &'static str {
        match self {
            PlatformRequest::GetFanState { .. } => "get_fan_state",
            PlatformRequest::GetBulkFanState { .. } => "get_bulk_fan_state",
            PlatformRequest::GetFanConfig { .. } => "get_fan_config",
            PlatformRequest::GetBulkFanConfig { .. } => "get_bulk_fan_config",
            PlatformRequest::UpdateFanConfig { .. } => "update_fan_config",
            PlatformRequest::GetSfpState { .. } => "get_sfp_state",
            PlatformRequest::GetBulkSfpState { .. } => "get_bulk_sfp_state",
            PlatformRequest::GetThermalState { .. } => "get_thermal_state",
            PlatformRequest::GetBulkThermalState { .. } => "get_bulk_thermal_state",
            PlatformRequest::GetPlatformState { .. } => "get_platform_state",
            PlatformRequest::GetBulkPlatformState { .. } => "get_bulk_platform_state",
        }
    }

    /// Object class the operation targets.
    pub fn class(&self) -> ObjectClass {
        match self {
            PlatformRequest::GetFanState { .. }
            | PlatformRequest::GetBulkFanState { .. }
            | PlatformRequest::GetFanConfig { .. }
            | PlatformRequest::GetBulkFanConfig { .. }
            | PlatformRequest::UpdateFanConfig { .. } => ObjectClass::Fan,
            PlatformRequest::GetSfpState { .. } | PlatformRequest::GetBulkSfpState { .. } => {
                ObjectClass::Sfp
            }
            PlatformRequest::GetThermalState { .. }
            | PlatformRequest::GetBulkThermalState { .. } => ObjectClass::Thermal,
            PlatformRequest::GetPlatformState { .. }
            | PlatformRequest::GetBulkPlatformState { .. } => ObjectClass::Platform,
        }
    }
}

impl std::fmt::Debug for PlatformRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformRequest")
            .field("op", &self.op_name())
            .field("class", &self.class())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_name_and_class() {
        let (tx, _rx) = oneshot::channel();
        let request = PlatformRequest::GetFanState {
            fan_id: 0,
            reply: tx,
        };

        assert_eq!(request.op_name(), "get_fan_state");
        assert_eq!(request.class(), ObjectClass::Fan);
    }

    #[test]
    fn test_bulk_request_class() {
        let (tx, _rx) = oneshot::channel();
        let request = PlatformRequest::GetBulkThermalState {
            cursor: BulkCursor::new(0, 10),
            reply: tx,
        };

        assert_eq!(request.class(), ObjectClass::Thermal);
    }

    #[test]
    fn test_debug_format_names_operation() {
        let (tx, _rx) = oneshot::channel();
        let request = PlatformRequest::GetPlatformState {
            name: "chassis".to_string(),
            reply: tx,
        };

        let debug = format!("{:?}", request);
        assert!(debug.contains("get_platform_state"));
    }
}
