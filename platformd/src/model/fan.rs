//! Fan state and configuration records.

use super::AttrSet;

/// Operational mode of a fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanMode {
    /// Fan is powered and spinning.
    On,
    /// Fan is powered off.
    Off,
}

/// Airflow direction of a fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanDirection {
    /// Front-to-back airflow (port-side intake).
    FrontToBack,
    /// Back-to-front airflow (port-side exhaust).
    BackToFront,
}

/// Presence / health status of a fan tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanStatus {
    /// Installed and operating normally.
    Present,
    /// Slot is empty.
    Missing,
    /// Installed but reporting a fault.
    Failed,
}

/// Point-in-time snapshot of one fan's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct FanState {
    /// Fan id.
    pub fan_id: u32,
    /// Current operational mode.
    pub oper_mode: FanMode,
    /// Current speed as a percentage of maximum RPM.
    pub oper_speed: u32,
    /// Current airflow direction.
    pub oper_direction: FanDirection,
    /// Presence / health status.
    pub status: FanStatus,
    /// Hardware model string.
    pub model: String,
    /// Hardware serial number.
    pub serial_num: String,
}

/// Mutable configuration of one fan.
///
/// `fan_id` is the record's key and is immutable; updates may only touch
/// the fields listed in [`FanConfig::MUTABLE_ATTRS`].
#[derive(Debug, Clone, PartialEq)]
pub struct FanConfig {
    /// Fan id (immutable key).
    pub fan_id: u32,
    /// Requested speed as a percentage of maximum RPM.
    pub admin_speed: u32,
    /// Requested airflow direction.
    pub admin_direction: FanDirection,
}

impl FanConfig {
    /// Attribute names an update call is allowed to reference.
    pub const MUTABLE_ATTRS: &'static [&'static str] = &["admin_speed", "admin_direction"];

    /// Applies the fields named in `attrs` from `new` onto this record.
    ///
    /// Callers must have validated `attrs` against [`Self::MUTABLE_ATTRS`]
    /// first; names absent from the record are ignored here.
    pub fn apply(&mut self, new: &FanConfig, attrs: &AttrSet) {
        if attrs.contains("admin_speed") {
            self.admin_speed = new.admin_speed;
        }
        if attrs.contains("admin_direction") {
            self.admin_direction = new.admin_direction;
        }
    }
}
