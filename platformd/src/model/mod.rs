//! Data model for platform hardware objects.
//!
//! Each object class has an immutable *state snapshot* type returned by
//! queries, and (for fans) a mutable *config record* type. Snapshots are
//! point-in-time copies: callers never receive a handle into broker-owned
//! memory. Bulk queries page over an ordered, class-specific enumeration
//! via [`BulkCursor`] and return [`Page`] values.

mod attr;
mod cursor;
mod fan;
mod platform;
mod sfp;
mod thermal;

pub use attr::AttrSet;
pub use cursor::{page_of, BulkCursor, Page};
pub use fan::{FanConfig, FanDirection, FanMode, FanState, FanStatus};
pub use platform::PlatformState;
pub use sfp::SfpState;
pub use thermal::ThermalState;

/// The closed set of hardware object classes the broker serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    /// Chassis cooling fan.
    Fan,
    /// Optical transceiver module (SFP/QSFP).
    Sfp,
    /// Thermal sensor.
    Thermal,
    /// Generic platform identity object.
    Platform,
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectClass::Fan => write!(f, "fan"),
            ObjectClass::Sfp => write!(f, "sfp"),
            ObjectClass::Thermal => write!(f, "thermal"),
            ObjectClass::Platform => write!(f, "platform"),
        }
    }
}

/// Opaque key identifying one object within its class.
///
/// Fans, SFPs and thermal sensors use numeric ids; platform objects are
/// keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKey {
    /// Numeric object id.
    Id(u32),
    /// Object name.
    Name(String),
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKey::Id(id) => write!(f, "{}", id),
            ObjectKey::Name(name) => write!(f, "{}", name),
        }
    }
}
