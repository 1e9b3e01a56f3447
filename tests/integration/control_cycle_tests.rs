//! Integration tests for the reconciliation cycle: sensors + remote
//! directives in, exactly one committed actuator state out.

use crate::mock_hw::{ActuatorCall, MockClock, MockHardware, MockRemote, RecordingSink};

use growpod::app::events::AppEvent;
use growpod::app::service::AppService;
use growpod::config::paths;
use growpod::control::reconcile::ActuatorState;

fn make_rig(hour: u8) -> (AppService, MockHardware, MockRemote, MockClock, RecordingSink) {
    let mut app = AppService::new();
    let hw = MockHardware::new();
    let remote = MockRemote::new();
    let clock = MockClock::new(hour);
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, hw, remote, clock, sink)
}

// ── Spec scenarios ───────────────────────────────────────────

#[test]
fn night_watering_scenario() {
    // soil=700, temp=25, lightMode=AUTO, hour=20, no overrides.
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(20);
    hw.set_snapshot(700, 25.0, 55.0);
    remote.set_light_mode("AUTO");

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);

    assert!(hw.pump_on(), "dry soil starts the pump");
    assert!(!hw.fan_on(), "25 degrees keeps the fan off");
    assert!(hw.light_on(), "hour 20 is inside the lit window");
}

#[test]
fn forced_pump_midday_scenario() {
    // soil=300, temp=35, lightMode=OFF, hour=10, pump override=true.
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(10);
    hw.set_snapshot(300, 35.0, 55.0);
    remote.set_light_mode("OFF");
    remote.set_pump_override(true);

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);

    assert!(hw.pump_on(), "override wins over wet soil");
    assert!(hw.fan_on(), "35 degrees starts the fan");
    assert!(!hw.light_on(), "mode OFF overrides the schedule");
}

#[test]
fn light_mode_read_failure_falls_back_to_auto() {
    // Remote down entirely, hour=3: AUTO schedule says lit (3 < 6).
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(3);
    hw.set_snapshot(100, 20.0, 50.0);
    remote.fail_reads = true;

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);

    assert!(hw.light_on());
    assert!(!hw.pump_on());
    assert!(!hw.fan_on());
}

// ── Light schedule ───────────────────────────────────────────

#[test]
fn light_boundary_hours_exact() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(6);
    remote.set_light_mode("AUTO");

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(!hw.light_on(), "hour 6 is the first dark hour");

    clock.hour = 18;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(hw.light_on(), "hour 18 is the first lit hour");
}

#[test]
fn unparsable_light_mode_degrades_to_auto() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(3);
    remote.set_light_mode("DISCO");

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(hw.light_on(), "unknown mode behaves like AUTO at hour 3");
}

#[test]
fn light_mode_is_not_retained_across_failures() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    remote.set_light_mode("ON");

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(hw.light_on(), "mode ON lights midday");

    // The field disappears: this cycle re-derives AUTO, it does not reuse
    // the previously fetched ON.
    remote.clear_field(paths::LIGHT_MODE);
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(!hw.light_on(), "AUTO at hour 12 is dark");
}

// ── Overrides ────────────────────────────────────────────────

#[test]
fn absent_override_keeps_threshold_decision() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    hw.set_snapshot(900, 20.0, 50.0);

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(hw.pump_on(), "no override: threshold stands");
}

#[test]
fn override_false_stops_pump_despite_dry_soil() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    hw.set_snapshot(900, 20.0, 50.0);
    remote.set_pump_override(false);

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(!hw.pump_on());
}

#[test]
fn fan_override_leaves_pump_alone() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    hw.set_snapshot(900, 40.0, 50.0);
    remote.set_fan_override(false);

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(hw.pump_on());
    assert!(!hw.fan_on());
}

// ── Failure degradation ──────────────────────────────────────

#[test]
fn sensor_sentinels_never_actuate() {
    // All-sentinel snapshot (failed soil + DHT reads).
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(!hw.pump_on());
    assert!(!hw.fan_on());
}

// ── Cycle discipline ─────────────────────────────────────────

#[test]
fn each_pin_written_exactly_once_per_cycle() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    hw.set_snapshot(700, 35.0, 50.0);

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);

    assert_eq!(hw.calls.len(), 3, "one write per actuator, no toggling");
    let pumps = hw
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::SetPump(_)))
        .count();
    let fans = hw
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::SetFan(_)))
        .count();
    let lights = hw
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::SetLight(_)))
        .count();
    assert_eq!((pumps, fans, lights), (1, 1, 1));
}

#[test]
fn identical_inputs_produce_identical_cycles() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(20);
    hw.set_snapshot(700, 25.0, 55.0);
    remote.set_light_mode("AUTO");

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    let first: Vec<_> = hw.calls.clone();
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);

    assert_eq!(hw.calls.len(), 6);
    assert_eq!(&hw.calls[3..], first.as_slice(), "second cycle repeats the writes");
    assert_eq!(
        app.last_applied(),
        Some(ActuatorState {
            pump_on: true,
            fan_on: false,
            light_on: true
        })
    );
}

#[test]
fn actuator_change_events_are_deduplicated() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    hw.set_snapshot(900, 20.0, 50.0);

    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert_eq!(
        sink.actuators_changed_count(),
        1,
        "steady state emits no further change events"
    );

    // Soil recovers — pump drops out, one more event.
    hw.set_snapshot(200, 20.0, 50.0);
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert_eq!(sink.actuators_changed_count(), 2);

    let last_change = sink
        .events
        .iter()
        .rev()
        .find_map(|e| match e {
            AppEvent::ActuatorsChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .expect("change event present");
    assert!(last_change.0.pump_on && !last_change.1.pump_on);
}

#[test]
fn clock_refreshes_every_cycle() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    for _ in 0..5 {
        app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    }
    assert_eq!(clock.refresh_calls, 5);
    assert_eq!(app.cycle_count(), 5);
}
