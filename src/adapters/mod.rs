//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                | Connects to              |
//! |------------|---------------------------|--------------------------|
//! | `hardware` | SensorPort                | ESP32 ADC, DHT line      |
//! |            | ActuatorPort              | Relay GPIOs              |
//! | `log_sink` | EventSink                 | Serial log output        |
//! | `rtdb`     | RemotePort                | Firebase RTDB REST       |
//! | `sntp`     | ClockPort                 | SNTP + system clock      |
//! | `wifi`     | ConnectivityPort          | ESP-IDF WiFi STA         |

pub mod hardware;
pub mod log_sink;
pub mod rtdb;
pub mod sntp;
pub mod wifi;
