//! GPIO / peripheral pin assignments for the GrowPod main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// Capacitive soil-moisture probe — analog voltage into ADC1.
/// ADC1 channel 6 (GPIO 34 on ESP32, input-only pin).
pub const SOIL_ADC_GPIO: i32 = 34;

/// DHT11 data line — single-wire protocol, external 10 kΩ pull-up.
pub const DHT_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Actuator relays
// ---------------------------------------------------------------------------

/// Water pump relay IN.
pub const PUMP_RELAY_GPIO: i32 = 25;
/// Exhaust fan relay IN.
pub const FAN_RELAY_GPIO: i32 = 26;
/// Grow light relay IN.
pub const LIGHT_RELAY_GPIO: i32 = 27;

/// Relay board drive polarity. `false` = GPIO HIGH energises the coil
/// (boards driven through a ULN2003 stage invert once more upstream).
pub const RELAY_ACTIVE_LOW: bool = false;
