//! GrowPod Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter    LogEventSink    RtdbAdapter   SntpClock  │
//! │  (Sensor+Actuator)  (EventSink)     (RemotePort)  (ClockPort)│
//! │  WifiAdapter                                                 │
//! │  (Connectivity)                                              │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            AppService (pure logic)                     │  │
//! │  │  reconcile · telemetry cadence                         │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop never blocks on the network: every remote failure degrades to
//! a per-field default and local actuation carries on.

#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use growpod::adapters::hardware::HardwareAdapter;
use growpod::adapters::log_sink::LogEventSink;
use growpod::adapters::rtdb::RtdbAdapter;
use growpod::adapters::sntp::SntpClock;
use growpod::adapters::wifi::{ConnectivityPort, WifiAdapter};
use growpod::app::ports::ClockPort;
use growpod::app::service::AppService;
use growpod::config;
use growpod::drivers::hw_init;
use growpod::drivers::relay::RelayDriver;
use growpod::pins;
use growpod::sensors::dht::DhtSensor;
use growpod::sensors::soil::SoilMoistureSensor;
use growpod::sensors::SensorHub;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  GrowPod v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripheral init ────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Connectivity ───────────────────────────────────────
    let peripherals = esp_idf_hal::peripherals::Peripherals::take()?;
    let sysloop = esp_idf_svc::eventloop::EspSystemEventLoop::take()?;
    let nvs = esp_idf_svc::nvs::EspDefaultNvsPartition::take()?;

    let mut wifi = WifiAdapter::new(peripherals.modem, sysloop, nvs)?;
    if let Err(e) = wifi.connect() {
        // Offline boot is fine: thresholds keep the plants alive and the
        // reconnect poll brings telemetry back when the AP appears.
        warn!("WiFi: initial connect failed ({e}); starting offline");
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut clock = SntpClock::new();
    let mut remote = RtdbAdapter::new(config::RTDB_BASE_URL, config::RTDB_AUTH_TOKEN);

    let sensor_hub = SensorHub::new(
        SoilMoistureSensor::new(pins::SOIL_ADC_GPIO),
        DhtSensor::new(pins::DHT_GPIO),
    );
    let mut hw = HardwareAdapter::new(
        sensor_hub,
        RelayDriver::new(pins::PUMP_RELAY_GPIO, pins::RELAY_ACTIVE_LOW),
        RelayDriver::new(pins::FAN_RELAY_GPIO, pins::RELAY_ACTIVE_LOW),
        RelayDriver::new(pins::LIGHT_RELAY_GPIO, pins::RELAY_ACTIVE_LOW),
    );

    let mut sink = LogEventSink::new();

    // ── 5. Construct app service ──────────────────────────────
    let mut app = AppService::new();
    app.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        wifi.poll(clock.uptime_ms());
        app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
        esp_idf_hal::delay::FreeRtos::delay_ms(config::LOOP_PACING_MS);
    }
}
