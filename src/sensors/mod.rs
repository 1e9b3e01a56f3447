//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a
//! [`SensorSnapshot`](crate::control::reconcile::SensorSnapshot) each cycle.
//! Individual read failures degrade to the documented sentinels (`0` raw
//! soil units, NaN for the DHT channels) — a flaky sensor must not stall
//! the control loop, and the sentinels compare below every threshold so
//! unknown data never actuates.

pub mod dht;
pub mod soil;

use log::warn;

use crate::control::reconcile::SensorSnapshot;
use dht::DhtSensor;
use soil::SoilMoistureSensor;

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    pub soil: SoilMoistureSensor,
    pub dht: DhtSensor,
}

impl SensorHub {
    /// Construct a new hub. Pass in pre-built drivers (built in main where
    /// peripheral ownership is established).
    pub fn new(soil: SoilMoistureSensor, dht: DhtSensor) -> Self {
        Self { soil, dht }
    }

    /// Read every sensor and return a unified snapshot.
    pub fn read_all(&mut self) -> SensorSnapshot {
        let soil_raw = match self.soil.read() {
            Ok(r) => r.raw,
            Err(e) => {
                warn!("soil read failed ({e}), substituting 0 raw units");
                0
            }
        };

        let (temperature_c, humidity_pct) = match self.dht.read() {
            Ok(r) => (r.temperature_c, r.humidity_pct),
            Err(e) => {
                warn!("DHT read failed ({e}), substituting NaN");
                (f32::NAN, f32::NAN)
            }
        };

        SensorSnapshot {
            soil_raw,
            temperature_c,
            humidity_pct,
        }
    }
}
