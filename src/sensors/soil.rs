//! Capacitive soil-moisture probe, read via the ESP32 ADC.
//!
//! The probe outputs a voltage that rises as the soil dries, compared
//! directly against `SOIL_THRESHOLD` in raw counts — no unit conversion.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from static atomics for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_SOIL_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_SOIL_FAIL: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_soil_adc(raw: u16) {
    SIM_SOIL_ADC.store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_soil_fail(fail: bool) {
    SIM_SOIL_FAIL.store(fail, Ordering::Relaxed);
}

/// Ceiling of the 12-bit ADC.
const ADC_MAX: u16 = 4095;

#[derive(Debug, Clone, Copy)]
pub struct SoilMoistureReading {
    /// Raw counts (0–4095; higher = drier).
    pub raw: u16,
}

pub struct SoilMoistureSensor {
    _adc_gpio: i32,
}

impl SoilMoistureSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&mut self) -> Result<SoilMoistureReading, SensorError> {
        let raw = self.read_adc()?;
        if raw > ADC_MAX {
            return Err(SensorError::OutOfRange);
        }
        Ok(SoilMoistureReading { raw })
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(hw_init::ADC1_CH_SOIL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        if SIM_SOIL_FAIL.load(Ordering::Relaxed) {
            return Err(SensorError::AdcReadFailed);
        }
        Ok(SIM_SOIL_ADC.load(Ordering::Relaxed))
    }
}
