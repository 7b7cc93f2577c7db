//! Simulated in-memory backend.
//!
//! Serves a deterministic inventory of fans, optical modules, thermal
//! sensors and platform identity objects. This fills the role of a dummy
//! hardware plugin: the daemon runs against it when no real plugin is
//! configured, and the test suite uses it as a known-good fixture.

use super::{BackendFuture, PlatformBackend};
use crate::error::BackendError;
use crate::model::{
    page_of, AttrSet, BulkCursor, FanConfig, FanDirection, FanMode, FanState, FanStatus, Page,
    PlatformState, SfpState, ThermalState,
};
use tracing::{debug, info};

/// Inventory sizes for the simulated backend.
#[derive(Debug, Clone)]
pub struct SimBackendConfig {
    /// Number of fans (ids `0..fan_count`).
    pub fan_count: u32,
    /// Number of optical modules (ids `0..sfp_count`).
    pub sfp_count: u32,
    /// Number of thermal sensors (ids `0..thermal_count`).
    pub thermal_count: u32,
}

impl Default for SimBackendConfig {
    fn default() -> Self {
        Self {
            fan_count: 4,
            sfp_count: 8,
            thermal_count: 4,
        }
    }
}

/// One simulated fan: observable state plus its config record.
#[derive(Debug, Clone)]
struct FanUnit {
    state: FanState,
    config: FanConfig,
}

/// In-memory simulated platform inventory.
pub struct SimBackend {
    initialized: bool,
    fans: Vec<FanUnit>,
    sfps: Vec<SfpState>,
    thermals: Vec<ThermalState>,
    platform: Vec<PlatformState>,
}

impl SimBackend {
    /// Builds a backend with the given inventory sizes.
    ///
    /// Contents are deterministic: fans start at 50% speed, front-to-back
    /// airflow, all units present.
    pub fn new(config: SimBackendConfig) -> Self {
        let fans = (0..config.fan_count)
            .map(|id| FanUnit {
                state: FanState {
                    fan_id: id,
                    oper_mode: FanMode::On,
                    oper_speed: 50,
                    oper_direction: FanDirection::FrontToBack,
                    status: FanStatus::Present,
                    model: "SIM-FAN-80".to_string(),
                    serial_num: format!("SIMF{:04}", id),
                },
                config: FanConfig {
                    fan_id: id,
                    admin_speed: 50,
                    admin_direction: FanDirection::FrontToBack,
                },
            })
            .collect();

        let sfps = (0..config.sfp_count)
            .map(|id| SfpState {
                sfp_id: id,
                present: true,
                los: false,
                module_type: "10GBASE-SR".to_string(),
                serial_num: format!("SIMS{:04}", id),
                temperature_c: 32.5,
                voltage_v: 3.3,
            })
            .collect();

        let thermals = (0..config.thermal_count)
            .map(|id| ThermalState {
                sensor_id: id,
                location: format!("board-{}", id),
                temperature_c: 38.0,
                warning_threshold_c: 85.0,
                shutdown_threshold_c: 105.0,
            })
            .collect();

        let platform = vec![
            PlatformState {
                obj_name: "chassis".to_string(),
                product_name: "SIM-1U".to_string(),
                serial_num: "SIMC0001".to_string(),
                manufacturer: "SimWorks".to_string(),
                vendor: "SimWorks".to_string(),
                release: "A0".to_string(),
                platform_name: "sim-x86".to_string(),
                version: "1.0".to_string(),
            },
            PlatformState {
                obj_name: "cpu-card".to_string(),
                product_name: "SIM-CPU".to_string(),
                serial_num: "SIMP0001".to_string(),
                manufacturer: "SimWorks".to_string(),
                vendor: "SimWorks".to_string(),
                release: "A0".to_string(),
                platform_name: "sim-x86".to_string(),
                version: "1.0".to_string(),
            },
        ];

        Self {
            initialized: false,
            fans,
            sfps,
            thermals,
            platform,
        }
    }

    /// Convenience constructor for a given fan count with default sizes
    /// for the other classes.
    pub fn with_fan_count(fan_count: u32) -> Self {
        Self::new(SimBackendConfig {
            fan_count,
            ..SimBackendConfig::default()
        })
    }

    fn check_initialized(&self) -> Result<(), BackendError> {
        if self.initialized {
            Ok(())
        } else {
            Err(BackendError::NotInitialized)
        }
    }
}

/// Wraps an already-computed result into the trait's future type.
fn done<T: Send + 'static>(result: Result<T, BackendError>) -> BackendFuture<'static, T> {
    Box::pin(async move { result })
}

impl PlatformBackend for SimBackend {
    fn init(&mut self) -> BackendFuture<'_, ()> {
        self.initialized = true;
        info!(
            fans = self.fans.len(),
            sfps = self.sfps.len(),
            thermals = self.thermals.len(),
            "Simulated backend initialized"
        );
        done(Ok(()))
    }

    fn fan_state(&mut self, fan_id: u32) -> BackendFuture<'_, Option<FanState>> {
        let result = self.check_initialized().map(|_| {
            self.fans
                .iter()
                .find(|unit| unit.state.fan_id == fan_id)
                .map(|unit| unit.state.clone())
        });
        done(result)
    }

    fn fan_state_range(&mut self, cursor: BulkCursor) -> BackendFuture<'_, Page<FanState>> {
        let result = self.check_initialized().map(|_| {
            let states: Vec<FanState> = self.fans.iter().map(|unit| unit.state.clone()).collect();
            page_of(&states, cursor)
        });
        done(result)
    }

    fn fan_config(&mut self, fan_id: u32) -> BackendFuture<'_, Option<FanConfig>> {
        let result = self.check_initialized().map(|_| {
            self.fans
                .iter()
                .find(|unit| unit.config.fan_id == fan_id)
                .map(|unit| unit.config.clone())
        });
        done(result)
    }

    fn fan_config_range(&mut self, cursor: BulkCursor) -> BackendFuture<'_, Page<FanConfig>> {
        let result = self.check_initialized().map(|_| {
            let configs: Vec<FanConfig> =
                self.fans.iter().map(|unit| unit.config.clone()).collect();
            page_of(&configs, cursor)
        });
        done(result)
    }

    fn update_fan_config(
        &mut self,
        old: FanConfig,
        new: FanConfig,
        attrs: AttrSet,
    ) -> BackendFuture<'_, bool> {
        let result = self.check_initialized().and_then(|_| {
            let unit = self
                .fans
                .iter_mut()
                .find(|unit| unit.config.fan_id == old.fan_id)
                .ok_or_else(|| BackendError::Hardware(format!("fan {} not present", old.fan_id)))?;

            if unit.config != old {
                debug!(fan_id = old.fan_id, "Stale fan config on update");
                return Ok(false);
            }

            unit.config.apply(&new, &attrs);
            // The simulated hardware follows its config immediately
            unit.state.oper_speed = unit.config.admin_speed;
            unit.state.oper_direction = unit.config.admin_direction;
            debug!(
                fan_id = old.fan_id,
                admin_speed = unit.config.admin_speed,
                "Fan config updated"
            );
            Ok(true)
        });
        done(result)
    }

    fn sfp_state(&mut self, sfp_id: u32) -> BackendFuture<'_, Option<SfpState>> {
        let result = self
            .check_initialized()
            .map(|_| self.sfps.iter().find(|sfp| sfp.sfp_id == sfp_id).cloned());
        done(result)
    }

    fn sfp_state_range(&mut self, cursor: BulkCursor) -> BackendFuture<'_, Page<SfpState>> {
        let result = self
            .check_initialized()
            .map(|_| page_of(&self.sfps, cursor));
        done(result)
    }

    fn thermal_state(&mut self, sensor_id: u32) -> BackendFuture<'_, Option<ThermalState>> {
        let result = self.check_initialized().map(|_| {
            self.thermals
                .iter()
                .find(|sensor| sensor.sensor_id == sensor_id)
                .cloned()
        });
        done(result)
    }

    fn thermal_state_range(&mut self, cursor: BulkCursor) -> BackendFuture<'_, Page<ThermalState>> {
        let result = self
            .check_initialized()
            .map(|_| page_of(&self.thermals, cursor));
        done(result)
    }

    fn platform_state(&mut self, name: &str) -> BackendFuture<'_, Option<PlatformState>> {
        let result = self
            .check_initialized()
            .map(|_| self.platform.iter().find(|obj| obj.obj_name == name).cloned());
        done(result)
    }

    fn platform_state_range(
        &mut self,
        cursor: BulkCursor,
    ) -> BackendFuture<'_, Page<PlatformState>> {
        let result = self
            .check_initialized()
            .map(|_| page_of(&self.platform, cursor));
        done(result)
    }
}
