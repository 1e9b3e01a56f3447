//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — log to serial, mirror to a future MQTT
//! bridge, etc.

use crate::control::reconcile::{ActuatorState, SensorSnapshot};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The application service has started.
    Started,

    /// The committed actuator state differs from the previous cycle's.
    ActuatorsChanged {
        from: ActuatorState,
        to: ActuatorState,
    },

    /// A telemetry publish ran (successfully or partially).
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub snapshot: SensorSnapshot,
    pub actuators: ActuatorState,
    /// How many of the per-publish remote writes were skipped on failure.
    pub failed_writes: u8,
}
