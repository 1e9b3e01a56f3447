//! Per-cycle actuator reconciliation — the decision core.
//!
//! Three authority sources compete for the actuators each cycle: local
//! sensor thresholds, the remote light mode, and remote manual overrides.
//! [`reconcile`] merges them with a fixed precedence:
//!
//! 1. pump and fan follow their thresholds,
//! 2. the light follows its mode (schedule, forced on, forced off),
//! 3. a present manual override replaces the threshold result — applied
//!    last so the operator always wins for pump and fan.
//!
//! The light has no separate override path; mode `ON`/`OFF` already serves
//! that role, so a single remote signal controls it.
//!
//! The output is fully determined by the inputs — no state is carried
//! between cycles.

use crate::config::{LIGHT_OFF_HOUR, LIGHT_ON_HOUR, SOIL_THRESHOLD, TEMP_THRESHOLD_C};

// ---------------------------------------------------------------------------
// Sensor snapshot
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every sensor, produced fresh each cycle.
///
/// Failed reads carry sentinels instead of aborting the cycle: `f32::NAN`
/// for the DHT channels and `0` raw units for soil. Both sentinels compare
/// below their thresholds, so unknown data never switches an actuator on.
#[derive(Debug, Clone, Copy)]
pub struct SensorSnapshot {
    /// Raw soil-moisture ADC value (0–4095; counts rise as the soil dries).
    pub soil_raw: u16,
    /// Air temperature (°C). NaN if the DHT read failed this cycle.
    pub temperature_c: f32,
    /// Relative humidity (%). NaN if the DHT read failed this cycle.
    pub humidity_pct: f32,
}

impl Default for SensorSnapshot {
    /// The all-sentinel snapshot — what a cycle sees when every read fails.
    fn default() -> Self {
        Self {
            soil_raw: 0,
            temperature_c: f32::NAN,
            humidity_pct: f32::NAN,
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator state
// ---------------------------------------------------------------------------

/// Desired on/off state for every actuator, recomputed from scratch each
/// cycle and applied by writing each pin exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    pub pump_on: bool,
    pub fan_on: bool,
    pub light_on: bool,
}

impl ActuatorState {
    /// All actuators off — the power-on state of the relay bank.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Remote directives
// ---------------------------------------------------------------------------

/// Remote light-mode setting.
///
/// Parsed from the string field at [`crate::config::paths::LIGHT_MODE`]
/// every cycle. A failed or unparsable read degrades to `Auto` for that
/// cycle only — the last successfully fetched mode is not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightMode {
    /// Schedule-driven: lit during the night window wrapping midnight.
    #[default]
    Auto,
    /// Forced on regardless of hour.
    On,
    /// Forced off regardless of hour.
    Off,
}

impl LightMode {
    /// Parse the remote string field. Unknown strings are `None`; the
    /// caller degrades to [`LightMode::Auto`] for the cycle.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AUTO" => Some(Self::Auto),
            "ON" => Some(Self::On),
            "OFF" => Some(Self::Off),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

/// Everything fetched from the remote store for one cycle.
///
/// A `None` override means the field could not be read this cycle; the
/// locally computed threshold decision stands.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteDirectives {
    pub light_mode: LightMode,
    pub pump_override: Option<bool>,
    pub fan_override: Option<bool>,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// True when `hour` falls inside the lit window.
///
/// The window wraps midnight (ON hour is numerically above the OFF hour),
/// so the predicate is a disjunction rather than a range check.
pub fn light_window_contains(hour: u8) -> bool {
    hour >= LIGHT_ON_HOUR || hour < LIGHT_OFF_HOUR
}

/// Compute the actuator state for one cycle.
pub fn reconcile(snap: &SensorSnapshot, hour: u8, remote: &RemoteDirectives) -> ActuatorState {
    let mut pump_on = snap.soil_raw > SOIL_THRESHOLD;
    // NaN (failed read) compares false — the fan never runs on unknown data.
    let mut fan_on = snap.temperature_c > TEMP_THRESHOLD_C;

    let light_on = match remote.light_mode {
        LightMode::Auto => light_window_contains(hour),
        LightMode::On => true,
        LightMode::Off => false,
    };

    // Manual override pass last: a present override unconditionally wins.
    if let Some(forced) = remote.pump_override {
        pump_on = forced;
    }
    if let Some(forced) = remote.fan_override {
        fan_on = forced;
    }

    ActuatorState {
        pump_on,
        fan_on,
        light_on,
    }
}
