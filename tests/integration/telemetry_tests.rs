//! Integration tests for the telemetry cadence as driven by the service:
//! publish timing, write fan-out, and degradation when the store is down.

use crate::mock_hw::{MockClock, MockHardware, MockRemote, RecordingSink};

use growpod::app::events::AppEvent;
use growpod::app::service::AppService;
use growpod::config::{paths, PUBLISH_INTERVAL_MS};

fn make_rig(hour: u8) -> (AppService, MockHardware, MockRemote, MockClock, RecordingSink) {
    let mut app = AppService::new();
    let hw = MockHardware::new();
    let remote = MockRemote::new();
    let clock = MockClock::new(hour);
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, hw, remote, clock, sink)
}

#[test]
fn publish_waits_for_the_interval() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    hw.set_snapshot(650, 24.0, 60.0);

    clock.uptime_ms = 0;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(remote.writes.is_empty(), "nothing published at boot");

    clock.uptime_ms = PUBLISH_INTERVAL_MS - 1;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(remote.writes.is_empty());

    clock.uptime_ms = PUBLISH_INTERVAL_MS;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert_eq!(remote.writes.len(), 6, "six field writes on fire");
    assert_eq!(remote.history.len(), 1, "one history append on fire");
    assert_eq!(app.last_published_ms(), PUBLISH_INTERVAL_MS);
}

#[test]
fn publish_fires_at_most_once_per_window() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);

    clock.uptime_ms = 10_000;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    clock.uptime_ms = 13_000;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    clock.uptime_ms = 19_999;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert_eq!(remote.history.len(), 1);

    clock.uptime_ms = 20_000;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert_eq!(remote.history.len(), 2);
    assert_eq!(sink.telemetry_count(), 2);
}

#[test]
fn timer_advances_even_when_the_store_is_down() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    remote.fail_writes = true;

    clock.uptime_ms = 10_000;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(remote.writes.is_empty());
    assert!(remote.history.is_empty());
    assert_eq!(
        sink.telemetry_count(),
        1,
        "the publish attempt still counts and is reported"
    );
    assert_eq!(app.last_published_ms(), 10_000);

    // Store recovers immediately — but there is no early retry.
    remote.fail_writes = false;
    clock.uptime_ms = 11_000;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert!(remote.writes.is_empty(), "next publish waits the full interval");

    clock.uptime_ms = 20_000;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);
    assert_eq!(remote.writes.len(), 6);
    assert_eq!(remote.history.len(), 1);
}

#[test]
fn failed_write_count_is_reported() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(12);
    remote.fail_writes = true;
    clock.uptime_ms = 10_000;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);

    let failed = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::Telemetry(t) => Some(t.failed_writes),
            _ => None,
        })
        .expect("telemetry event emitted");
    assert_eq!(failed, 7, "six field writes plus the history append");
}

#[test]
fn published_fields_reflect_the_cycle() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(20);
    hw.set_snapshot(700, 25.0, 60.0);
    remote.set_light_mode("AUTO");

    clock.uptime_ms = 10_000;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);

    assert_eq!(remote.written(paths::SENSOR_SOIL), Some("700"));
    assert_eq!(remote.written(paths::SENSOR_TEMPERATURE), Some("25"));
    assert_eq!(remote.written(paths::SENSOR_HUMIDITY), Some("60"));
    assert_eq!(remote.written(paths::STATUS_PUMP), Some("true"));
    assert_eq!(remote.written(paths::STATUS_FAN), Some("false"));
    assert_eq!(remote.written(paths::STATUS_LIGHT), Some("true"));
}

#[test]
fn history_record_matches_the_cycle() {
    let (mut app, mut hw, mut remote, mut clock, mut sink) = make_rig(20);
    hw.set_snapshot(700, 25.0, 60.0);
    remote.set_light_mode("AUTO");

    clock.uptime_ms = 10_000;
    app.tick(&mut hw, &mut remote, &mut clock, &mut sink);

    let record = &remote.history[0];
    assert_eq!(record["soil"], 700);
    assert_eq!(record["temperature"], 25.0);
    assert_eq!(record["humidity"], 60.0);
    assert_eq!(record["pump"], true);
    assert_eq!(record["fan"], false);
    assert_eq!(record["light"], true);
    assert_eq!(record["time"], "20:00:00");
}
