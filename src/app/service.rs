//! Application service — the hexagonal core.
//!
//! [`AppService`] drives one reconciliation cycle per tick and owns the
//! telemetry publisher. All I/O flows through port traits injected at the
//! call site, making the whole service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!   RemotePort ──▶ │        AppService        │
//!    ClockPort ──▶ │  reconcile · telemetry   │
//! ActuatorPort ◀── └──────────────────────────┘ ──▶ RemotePort
//! ```

use log::{debug, info, warn};

use crate::config::paths;
use crate::control::reconcile::{reconcile, ActuatorState, LightMode, RemoteDirectives};
use crate::telemetry::TelemetryPublisher;

use super::events::AppEvent;
use super::ports::{ActuatorPort, ClockPort, EventSink, RemotePort, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates the control loop.
///
/// Beyond the publish timer it carries no decision state: the committed
/// actuator state is remembered only to de-duplicate change events and
/// never feeds back into the next cycle's computation.
pub struct AppService {
    publisher: TelemetryPublisher,
    last_applied: Option<ActuatorState>,
    cycle_count: u64,
}

impl Default for AppService {
    fn default() -> Self {
        Self::new()
    }
}

impl AppService {
    pub fn new() -> Self {
        Self {
            publisher: TelemetryPublisher::new(),
            last_applied: None,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("AppService started");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full reconciliation cycle:
    /// refresh clock → read sensors → fetch directives → reconcile →
    /// apply actuators → maybe publish.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        remote: &mut impl RemotePort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.cycle_count += 1;

        // 1. Refresh the wall clock (stale-but-available on sync failure).
        clock.refresh();
        let hour = clock.current_hour();

        // 2. Read sensors (failures degrade to sentinels inside the hub).
        let snap = hw.read_all();

        // 3. Fetch remote directives. These reads must land before the
        //    override pass runs — the ordering is a strict dependency.
        let directives = fetch_directives(remote);

        // 4. Reconcile thresholds, schedule, and overrides.
        let state = reconcile(&snap, hour, &directives);

        // 5. Commit — each actuator pin written exactly once this cycle.
        hw.set_pump(state.pump_on);
        hw.set_fan(state.fan_on);
        hw.set_light(state.light_on);

        // Relays power up released, so the first committed state diffs
        // against all-off.
        let prev = self.last_applied.unwrap_or_default();
        if state != prev {
            sink.emit(&AppEvent::ActuatorsChanged {
                from: prev,
                to: state,
            });
        }
        self.last_applied = Some(state);

        // 6. Telemetry runs on its own cadence.
        let _ = self.publisher.maybe_publish(
            clock.uptime_ms(),
            &snap,
            state,
            clock.timestamp().as_str(),
            remote,
            sink,
        );
    }

    // ── Queries ───────────────────────────────────────────────

    /// Total control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// The actuator state committed by the most recent cycle.
    pub fn last_applied(&self) -> Option<ActuatorState> {
        self.last_applied
    }

    /// Uptime of the last telemetry publish (0 before the first).
    pub fn last_published_ms(&self) -> u64 {
        self.publisher.last_published_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Remote directive fetch
// ───────────────────────────────────────────────────────────────

/// Pull the light mode and both manual overrides for this cycle.
///
/// Each read degrades independently: a failed or unparsable light mode is
/// `Auto` *for this cycle only*, and a failed override read means "keep
/// the local decision". Nothing is retried — the next cycle re-polls.
fn fetch_directives(remote: &mut impl RemotePort) -> RemoteDirectives {
    let light_mode = match remote.get_string(paths::LIGHT_MODE) {
        Ok(raw) => match LightMode::parse(&raw) {
            Some(mode) => mode,
            None => {
                warn!("light mode '{}' unrecognised, assuming AUTO", raw.as_str());
                LightMode::Auto
            }
        },
        Err(e) => {
            debug!("light mode read failed ({e}), assuming AUTO");
            LightMode::Auto
        }
    };

    RemoteDirectives {
        light_mode,
        pump_override: remote.get_bool(paths::PUMP_OVERRIDE).ok(),
        fan_override: remote.get_bool(paths::FAN_OVERRIDE).ok(),
    }
}
