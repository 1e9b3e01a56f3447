//! Periodic telemetry and history publication.
//!
//! Runs on its own fixed interval, independent of the reconciliation
//! cadence. Each remote field write is individually fallible; failures are
//! logged and skipped, never retried within the window — the interval
//! timer advances regardless, so a transient outage cannot turn into an
//! early re-publish on the next cycle.

use log::warn;
use serde::Serialize;

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::{EventSink, RemoteError, RemotePort};
use crate::config::{paths, PUBLISH_INTERVAL_MS};
use crate::control::reconcile::{ActuatorState, SensorSnapshot};

// ---------------------------------------------------------------------------
// History record
// ---------------------------------------------------------------------------

/// One immutable history entry, appended per publish interval.
///
/// Field names match the remote schema, so the record serialises directly
/// to the JSON object the store expects.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub temperature: f32,
    pub humidity: f32,
    pub soil: u16,
    pub pump: bool,
    pub fan: bool,
    pub light: bool,
    pub time: heapless::String<20>,
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

/// Owns the publish-interval timer — the only state the telemetry path
/// carries across cycles.
pub struct TelemetryPublisher {
    last_published_ms: u64,
}

impl Default for TelemetryPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryPublisher {
    pub fn new() -> Self {
        Self {
            last_published_ms: 0,
        }
    }

    /// Publish if the interval has elapsed. Returns whether a publish ran.
    ///
    /// On fire: the six sensor/status fields are written individually, then
    /// one history record is appended. The timer advances up front so
    /// failed sub-writes can never starve the cadence.
    pub fn maybe_publish(
        &mut self,
        now_ms: u64,
        snap: &SensorSnapshot,
        actuators: ActuatorState,
        timestamp: &str,
        remote: &mut impl RemotePort,
        sink: &mut impl EventSink,
    ) -> bool {
        if now_ms.saturating_sub(self.last_published_ms) < PUBLISH_INTERVAL_MS {
            return false;
        }
        self.last_published_ms = now_ms;

        fn put(result: Result<(), RemoteError>, path: &str, failed: &mut u8) {
            if let Err(e) = result {
                warn!("publish: {path} skipped ({e})");
                *failed += 1;
            }
        }

        let mut failed_writes: u8 = 0;
        put(
            remote.set_float(paths::SENSOR_TEMPERATURE, snap.temperature_c),
            paths::SENSOR_TEMPERATURE,
            &mut failed_writes,
        );
        put(
            remote.set_float(paths::SENSOR_HUMIDITY, snap.humidity_pct),
            paths::SENSOR_HUMIDITY,
            &mut failed_writes,
        );
        put(
            remote.set_int(paths::SENSOR_SOIL, i32::from(snap.soil_raw)),
            paths::SENSOR_SOIL,
            &mut failed_writes,
        );
        put(
            remote.set_bool(paths::STATUS_PUMP, actuators.pump_on),
            paths::STATUS_PUMP,
            &mut failed_writes,
        );
        put(
            remote.set_bool(paths::STATUS_FAN, actuators.fan_on),
            paths::STATUS_FAN,
            &mut failed_writes,
        );
        put(
            remote.set_bool(paths::STATUS_LIGHT, actuators.light_on),
            paths::STATUS_LIGHT,
            &mut failed_writes,
        );

        let mut time = heapless::String::new();
        let _ = time.push_str(timestamp);
        let record = HistoryRecord {
            temperature: snap.temperature_c,
            humidity: snap.humidity_pct,
            soil: snap.soil_raw,
            pump: actuators.pump_on,
            fan: actuators.fan_on,
            light: actuators.light_on,
            time,
        };
        put(
            remote.push_history(&record),
            paths::HISTORY,
            &mut failed_writes,
        );

        sink.emit(&AppEvent::Telemetry(TelemetryData {
            snapshot: *snap,
            actuators,
            failed_writes,
        }));
        true
    }

    /// Uptime of the last publish in milliseconds (0 before the first).
    pub fn last_published_ms(&self) -> u64 {
        self.last_published_ms
    }
}
