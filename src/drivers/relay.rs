//! Relay-switched actuator driver (pump, fan, light channels).
//!
//! Each actuator is a dumb on/off relay behind a driver stage. Polarity is
//! configurable per channel because some relay boards energise on a low
//! input.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via the hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Released,
    Energised,
}

pub struct RelayDriver {
    gpio: i32,
    active_low: bool,
    state: RelayState,
}

impl RelayDriver {
    /// Construct the driver and force the relay to its released state so
    /// the boot-time pin level matches the tracked state.
    pub fn new(gpio: i32, active_low: bool) -> Self {
        let mut driver = Self {
            gpio,
            active_low,
            state: RelayState::Released,
        };
        driver.write_hw(false);
        driver
    }

    /// Set the relay. Idempotent — re-writing the current level is
    /// harmless, the design just never toggles more than once per cycle.
    pub fn set(&mut self, on: bool) {
        self.write_hw(on);
        self.state = if on {
            RelayState::Energised
        } else {
            RelayState::Released
        };
    }

    pub fn is_on(&self) -> bool {
        self.state == RelayState::Energised
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    fn write_hw(&self, on: bool) {
        // XOR folds the polarity: active-low boards see an inverted level.
        let high = on != self.active_low;
        hw_init::gpio_write(self.gpio, high);
    }
}
