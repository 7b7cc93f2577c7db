//! Generic platform identity objects.

/// Point-in-time snapshot of one platform identity object.
///
/// Platform objects describe the chassis and its field-replaceable units;
/// they are keyed by name rather than numeric id.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformState {
    /// Object name (key), e.g. "chassis".
    pub obj_name: String,
    /// Marketing product name.
    pub product_name: String,
    /// Unit serial number.
    pub serial_num: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Vendor name.
    pub vendor: String,
    /// Hardware release string.
    pub release: String,
    /// Platform family name.
    pub platform_name: String,
    /// Firmware/EEPROM content version.
    pub version: String,
}
