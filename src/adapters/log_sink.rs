//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production). A future MQTT or
//! dashboard adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

fn onoff(v: bool) -> &'static str {
    if v {
        "ON"
    } else {
        "off"
    }
}

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | soil={} | T={:.1}\u{00b0}C RH={:.1}% | pump={} fan={} light={} | skipped_writes={}",
                    t.snapshot.soil_raw,
                    t.snapshot.temperature_c,
                    t.snapshot.humidity_pct,
                    onoff(t.actuators.pump_on),
                    onoff(t.actuators.fan_on),
                    onoff(t.actuators.light_on),
                    t.failed_writes,
                );
            }
            AppEvent::ActuatorsChanged { from, to } => {
                info!(
                    "ACTUATE | pump {}->{} | fan {}->{} | light {}->{}",
                    onoff(from.pump_on),
                    onoff(to.pump_on),
                    onoff(from.fan_on),
                    onoff(to.fan_on),
                    onoff(from.light_on),
                    onoff(to.light_on),
                );
            }
            AppEvent::Started => {
                info!("START | control loop up");
            }
        }
    }
}
