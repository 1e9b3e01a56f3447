//! DHT11 temperature/humidity sensor (single-wire protocol).
//!
//! One transfer yields four data bytes (humidity int/dec, temperature
//! int/dec) plus a checksum. The DHT11 tops out at 1 Hz sampling; the
//! control loop's pacing keeps us under that, so the driver does not
//! cache between cycles.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-banged transfer via the hw_init GPIO/timing helpers.
//! On host/test: values come from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_C_X10: AtomicU16 = AtomicU16::new(250);
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_PCT_X10: AtomicU16 = AtomicU16::new(500);
#[cfg(not(target_os = "espidf"))]
static SIM_DHT_FAIL: AtomicBool = AtomicBool::new(false);

/// Inject a simulated reading (both values scaled by 10).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_dht(temp_c_x10: u16, hum_pct_x10: u16) {
    SIM_TEMP_C_X10.store(temp_c_x10, Ordering::Relaxed);
    SIM_HUM_PCT_X10.store(hum_pct_x10, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_dht_fail(fail: bool) {
    SIM_DHT_FAIL.store(fail, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
pub struct DhtReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

pub struct DhtSensor {
    gpio: i32,
}

impl DhtSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn read(&mut self) -> Result<DhtReading, SensorError> {
        // Bytes: [hum_int, hum_dec, temp_int, temp_dec]; checksum already
        // verified by the transfer layer.
        let b = self.read_raw()?;
        let humidity_pct = f32::from(b[0]) + f32::from(b[1]) / 10.0;
        let temperature_c = f32::from(b[2]) + f32::from(b[3]) / 10.0;

        // DHT11 envelope: 0–50 °C, 20–90 %RH. Anything outside is a
        // corrupt transfer that happened to pass the checksum.
        if !(0.0..=50.0).contains(&temperature_c) || !(0.0..=100.0).contains(&humidity_pct) {
            return Err(SensorError::OutOfRange);
        }

        Ok(DhtReading {
            temperature_c,
            humidity_pct,
        })
    }

    #[cfg(target_os = "espidf")]
    fn read_raw(&mut self) -> Result<[u8; 4], SensorError> {
        hw_init::dht_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&mut self) -> Result<[u8; 4], SensorError> {
        let _ = self.gpio;
        if SIM_DHT_FAIL.load(Ordering::Relaxed) {
            return Err(SensorError::BusTimeout);
        }
        let t = SIM_TEMP_C_X10.load(Ordering::Relaxed);
        let h = SIM_HUM_PCT_X10.load(Ordering::Relaxed);
        Ok([(h / 10) as u8, (h % 10) as u8, (t / 10) as u8, (t % 10) as u8])
    }
}
