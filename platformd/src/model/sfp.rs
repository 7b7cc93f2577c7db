//! Optical transceiver module state.

/// Point-in-time snapshot of one SFP/QSFP module.
#[derive(Debug, Clone, PartialEq)]
pub struct SfpState {
    /// Module id (port index).
    pub sfp_id: u32,
    /// True if a module is seated in the cage.
    pub present: bool,
    /// Loss-of-signal indication from the module.
    pub los: bool,
    /// Module type string from the EEPROM (e.g. "10GBASE-SR").
    pub module_type: String,
    /// Module serial number from the EEPROM.
    pub serial_num: String,
    /// Measured module temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Measured supply voltage in volts.
    pub voltage_v: f64,
}
