//! Fixed operating parameters for the GrowPod controller.
//!
//! Thresholds, the light schedule, and the publish cadence are compile-time
//! constants. Only the light mode and the manual pump/fan overrides are
//! remote-controllable at runtime.

/// Raw soil-moisture ADC value above which the soil counts as dry and the
/// pump runs (capacitive probe: counts rise as the soil dries).
pub const SOIL_THRESHOLD: u16 = 600;

/// Air temperature (°C) above which the exhaust fan runs.
pub const TEMP_THRESHOLD_C: f32 = 30.0;

/// Hour of day (0–23) at which the grow light switches on.
pub const LIGHT_ON_HOUR: u8 = 18;
/// Hour of day (0–23) at which the grow light switches off.
/// Numerically below [`LIGHT_ON_HOUR`] — the lit window wraps midnight.
pub const LIGHT_OFF_HOUR: u8 = 6;

/// Minimum period between telemetry/history publishes (milliseconds).
pub const PUBLISH_INTERVAL_MS: u64 = 10_000;

/// Pacing delay for the main loop (milliseconds). The control logic makes
/// no assumption about cadence; this keeps the idle task fed and stays
/// within the DHT11's 1 Hz sampling limit.
pub const LOOP_PACING_MS: u32 = 1_000;

/// UTC offset applied to SNTP wall-clock time (seconds). GMT+7.
pub const UTC_OFFSET_SECS: i64 = 25_200;

// ---------------------------------------------------------------------------
// WiFi / remote store access
// ---------------------------------------------------------------------------

// Placeholder credentials — provisioned per device at flash time.
pub const WIFI_SSID: &str = "YOUR_WIFI";
pub const WIFI_PASSWORD: &str = "YOUR_PASS";

/// Base URL of the Firebase Realtime Database instance (no trailing slash).
pub const RTDB_BASE_URL: &str = "https://growpod-default-rtdb.firebaseio.com";
/// Database auth token appended to every REST request.
pub const RTDB_AUTH_TOKEN: &str = "YOUR_API_KEY";

/// Remote key-value paths.
///
/// Single source of truth — adapters and the service reference this module
/// rather than spelling paths inline, the same way pin assignments are
/// centralised in [`crate::pins`].
pub mod paths {
    /// Operator-set light mode ("AUTO" | "ON" | "OFF") — read each cycle.
    pub const LIGHT_MODE: &str = "/control/lightMode";
    /// Manual pump override — absent means no override this cycle.
    pub const PUMP_OVERRIDE: &str = "/control/pump";
    /// Manual fan override — absent means no override this cycle.
    pub const FAN_OVERRIDE: &str = "/control/fan";

    /// Latest temperature (°C) — written on each publish.
    pub const SENSOR_TEMPERATURE: &str = "/sensorData/temperature";
    /// Latest relative humidity (%) — written on each publish.
    pub const SENSOR_HUMIDITY: &str = "/sensorData/humidity";
    /// Latest raw soil reading — written on each publish.
    pub const SENSOR_SOIL: &str = "/sensorData/soil";

    /// Actuator state as of the last publish.
    pub const STATUS_PUMP: &str = "/deviceStatus/pump";
    pub const STATUS_FAN: &str = "/deviceStatus/fan";
    pub const STATUS_LIGHT: &str = "/deviceStatus/light";

    /// Append-only history log — one record per publish interval.
    pub const HISTORY: &str = "/history";
}
