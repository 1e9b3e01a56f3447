//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the three relay drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`]. This is the only module in
//! the system that touches actual actuator hardware. On non-espidf targets
//! the underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::reconcile::SensorSnapshot;
use crate::drivers::relay::RelayDriver;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    pump: RelayDriver,
    fan: RelayDriver,
    light: RelayDriver,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub, pump: RelayDriver, fan: RelayDriver, light: RelayDriver) -> Self {
        Self {
            sensor_hub,
            pump,
            fan,
            light,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_pump(&mut self, on: bool) {
        self.pump.set(on);
    }

    fn set_fan(&mut self, on: bool) {
        self.fan.set(on);
    }

    fn set_light(&mut self, on: bool) {
        self.light.set(on);
    }

    fn all_off(&mut self) {
        self.pump.set(false);
        self.fan.set(false);
        self.light.set(false);
    }
}
