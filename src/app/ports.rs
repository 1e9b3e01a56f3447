//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, the remote store, the clock, event
//! sinks) implement these traits. The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware or sockets directly.

use crate::control::reconcile::SensorSnapshot;
use crate::telemetry::HistoryRecord;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.
    ///
    /// Never blocks indefinitely and never fails the cycle — individual
    /// read failures degrade to the documented sentinel values.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain commits one actuator state per cycle.
///
/// Writes are idempotent — re-commanding the current level is harmless —
/// but the service commits exactly one state per cycle, never incremental
/// toggling.
pub trait ActuatorPort {
    fn set_pump(&mut self, on: bool);
    fn set_fan(&mut self, on: bool);
    fn set_light(&mut self, on: bool);

    /// Kill all actuators — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Remote store port (driven adapter: domain ↔ cloud key-value store)
// ───────────────────────────────────────────────────────────────

/// Typed, path-keyed access to the cloud key-value store.
///
/// Every operation is independently fallible. Callers degrade per field —
/// a failed read substitutes that field's documented default and a failed
/// write is skipped — and never abort the control cycle.
pub trait RemotePort {
    /// Read a string field (e.g. the light mode).
    fn get_string(&mut self, path: &str) -> Result<heapless::String<16>, RemoteError>;

    /// Read a boolean field (e.g. a manual override).
    fn get_bool(&mut self, path: &str) -> Result<bool, RemoteError>;

    /// Overwrite a float field.
    fn set_float(&mut self, path: &str, value: f32) -> Result<(), RemoteError>;

    /// Overwrite an integer field.
    fn set_int(&mut self, path: &str, value: i32) -> Result<(), RemoteError>;

    /// Overwrite a boolean field.
    fn set_bool(&mut self, path: &str, value: bool) -> Result<(), RemoteError>;

    /// Append one record to the history log. The record is consumed by the
    /// store; the control loop retains no copy.
    fn push_history(&mut self, record: &HistoryRecord) -> Result<(), RemoteError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain ↔ SNTP / system timer)
// ───────────────────────────────────────────────────────────────

/// Wall-clock and monotonic time source.
pub trait ClockPort {
    /// Per-cycle sync step. On failure the previously known wall-clock
    /// values are reused (stale-but-available); the cycle never aborts.
    fn refresh(&mut self);

    /// Monotonic milliseconds since boot — drives the publish timer.
    fn uptime_ms(&self) -> u64;

    /// Current hour of day in `[0, 23]`; the last known value if the
    /// clock has not synced this cycle.
    fn current_hour(&self) -> u8;

    /// Formatted wall-clock time (`HH:MM:SS`); stale if unsynced.
    fn timestamp(&self) -> heapless::String<20>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, future
/// MQTT bridge, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`RemotePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteError {
    /// No network link; the request was never sent.
    NotConnected,
    /// The store rejected the request or the transfer broke mid-flight.
    RequestFailed,
    /// The per-call deadline elapsed.
    Timeout,
    /// The path exists but holds no value (reads only).
    FieldMissing,
    /// The stored value (or the outgoing one) does not fit the
    /// requested type.
    Malformed,
}

impl core::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::RequestFailed => write!(f, "request failed"),
            Self::Timeout => write!(f, "timed out"),
            Self::FieldMissing => write!(f, "field missing"),
            Self::Malformed => write!(f, "malformed value"),
        }
    }
}
