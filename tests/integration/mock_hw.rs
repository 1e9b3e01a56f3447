//! Mock adapters for integration tests.
//!
//! Records every actuator call and remote write so tests can assert on
//! the full command history without touching GPIO or the network.

use std::collections::HashMap;

use growpod::app::events::AppEvent;
use growpod::app::ports::{
    ActuatorPort, ClockPort, EventSink, RemoteError, RemotePort, SensorPort,
};
use growpod::config::paths;
use growpod::control::reconcile::SensorSnapshot;
use growpod::telemetry::HistoryRecord;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetPump(bool),
    SetFan(bool),
    SetLight(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub snapshot: SensorSnapshot,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            snapshot: SensorSnapshot::default(),
        }
    }

    pub fn set_snapshot(&mut self, soil: u16, temp_c: f32, hum_pct: f32) {
        self.snapshot = SensorSnapshot {
            soil_raw: soil,
            temperature_c: temp_c,
            humidity_pct: hum_pct,
        };
    }

    pub fn pump_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetPump(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn fan_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetFan(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn light_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetLight(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.snapshot
    }
}

impl ActuatorPort for MockHardware {
    fn set_pump(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetPump(on));
    }

    fn set_fan(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetFan(on));
    }

    fn set_light(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetLight(on));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── MockRemote ────────────────────────────────────────────────

/// In-memory remote store. String fields hold plain values ("AUTO"),
/// bool fields hold "true"/"false".
pub struct MockRemote {
    pub values: HashMap<String, String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    /// Every successful write, in order: (path, rendered value).
    pub writes: Vec<(String, String)>,
    pub history: Vec<serde_json::Value>,
}

#[allow(dead_code)]
impl MockRemote {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            fail_reads: false,
            fail_writes: false,
            writes: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn set_light_mode(&mut self, mode: &str) {
        self.values
            .insert(paths::LIGHT_MODE.to_string(), mode.to_string());
    }

    pub fn set_pump_override(&mut self, on: bool) {
        self.values
            .insert(paths::PUMP_OVERRIDE.to_string(), on.to_string());
    }

    pub fn set_fan_override(&mut self, on: bool) {
        self.values
            .insert(paths::FAN_OVERRIDE.to_string(), on.to_string());
    }

    pub fn clear_field(&mut self, path: &str) {
        self.values.remove(path);
    }

    /// Last value successfully written to `path`, if any.
    pub fn written(&self, path: &str) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, v)| v.as_str())
    }

    fn record_write(&mut self, path: &str, value: String) -> Result<(), RemoteError> {
        if self.fail_writes {
            return Err(RemoteError::RequestFailed);
        }
        self.writes.push((path.to_string(), value));
        Ok(())
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RemotePort for MockRemote {
    fn get_string(&mut self, path: &str) -> Result<heapless::String<16>, RemoteError> {
        if self.fail_reads {
            return Err(RemoteError::RequestFailed);
        }
        let value = self.values.get(path).ok_or(RemoteError::FieldMissing)?;
        heapless::String::try_from(value.as_str()).map_err(|()| RemoteError::Malformed)
    }

    fn get_bool(&mut self, path: &str) -> Result<bool, RemoteError> {
        if self.fail_reads {
            return Err(RemoteError::RequestFailed);
        }
        match self.values.get(path).map(String::as_str) {
            None => Err(RemoteError::FieldMissing),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(_) => Err(RemoteError::Malformed),
        }
    }

    fn set_float(&mut self, path: &str, value: f32) -> Result<(), RemoteError> {
        self.record_write(path, value.to_string())
    }

    fn set_int(&mut self, path: &str, value: i32) -> Result<(), RemoteError> {
        self.record_write(path, value.to_string())
    }

    fn set_bool(&mut self, path: &str, value: bool) -> Result<(), RemoteError> {
        self.record_write(path, value.to_string())
    }

    fn push_history(&mut self, record: &HistoryRecord) -> Result<(), RemoteError> {
        if self.fail_writes {
            return Err(RemoteError::RequestFailed);
        }
        let value = serde_json::to_value(record).map_err(|_| RemoteError::Malformed)?;
        self.history.push(value);
        Ok(())
    }
}

// ── MockClock ─────────────────────────────────────────────────

pub struct MockClock {
    pub hour: u8,
    pub uptime_ms: u64,
    pub refresh_calls: u32,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new(hour: u8) -> Self {
        Self {
            hour,
            uptime_ms: 0,
            refresh_calls: 0,
        }
    }
}

impl ClockPort for MockClock {
    fn refresh(&mut self) {
        self.refresh_calls += 1;
    }

    fn uptime_ms(&self) -> u64 {
        self.uptime_ms
    }

    fn current_hour(&self) -> u8 {
        self.hour
    }

    fn timestamp(&self) -> heapless::String<20> {
        use core::fmt::Write as _;
        let mut s = heapless::String::new();
        let _ = write!(s, "{:02}:00:00", self.hour);
        s
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn actuators_changed_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::ActuatorsChanged { .. }))
            .count()
    }

    pub fn telemetry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
