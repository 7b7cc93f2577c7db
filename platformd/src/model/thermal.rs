//! Thermal sensor state.

/// Point-in-time snapshot of one thermal sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalState {
    /// Sensor id.
    pub sensor_id: u32,
    /// Physical location of the sensor (e.g. "cpu", "board-inlet").
    pub location: String,
    /// Current temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Temperature at which a warning is raised.
    pub warning_threshold_c: f64,
    /// Temperature at which the platform shuts down.
    pub shutdown_threshold_c: f64,
}
