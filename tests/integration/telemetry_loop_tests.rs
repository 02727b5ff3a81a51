//! End-to-end telemetry loop tests over mock ports.
//!
//! Drives `TelemetryService::tick` with a hand-advanced clock and asserts
//! on the exact wire traffic the mock transport records.

use homesentry::app::ports::Door;
use homesentry::app::service::TelemetryService;
use homesentry::config::SystemConfig;
use homesentry::error::SensorError;
use homesentry::link::LinkState;
use homesentry::signal::SignalLevel;

use crate::mock_env::{MockMessaging, MockSensors};

const STATUS_TOPIC: &str = "home/status/esp32_1";
const DOOR1_TOPIC: &str = "home/alerts/door1";
const MOTION_TOPIC: &str = "home/alerts/motion1";

fn service(sensors: &mut MockSensors) -> TelemetryService {
    TelemetryService::new(&SystemConfig::default(), "esp32_1", sensors, 0)
}

#[test]
fn climate_report_is_bit_exact() {
    let mut sensors = MockSensors::quiet();
    let mut link = MockMessaging::reliable();
    let mut svc = service(&mut sensors);

    svc.tick(0, &mut sensors, &mut link);
    assert!(link.published.is_empty(), "nothing due on the first tick");

    svc.tick(30_000, &mut sensors, &mut link);
    assert_eq!(
        link.published,
        vec![(
            STATUS_TOPIC.to_string(),
            r#"{"temp":21.3,"hum":55.7}"#.to_string()
        )]
    );
    assert!(link.poll_calls > 0, "connected link must be serviced");
}

#[test]
fn door_edge_publishes_open_then_closed_once() {
    let mut sensors = MockSensors::quiet();
    let mut link = MockMessaging::reliable();
    let mut svc = service(&mut sensors);

    svc.tick(0, &mut sensors, &mut link);

    sensors.door1 = SignalLevel::Active;
    svc.tick(100, &mut sensors, &mut link);
    assert_eq!(link.on_topic(DOOR1_TOPIC), ["OPEN"]);
    assert_eq!(svc.door_state(Door::One), SignalLevel::Active);

    // Bounce back within the debounce window: suppressed.
    sensors.door1 = SignalLevel::Inactive;
    svc.tick(110, &mut sensors, &mut link);
    svc.tick(130, &mut sensors, &mut link);
    assert_eq!(link.on_topic(DOOR1_TOPIC), ["OPEN"]);

    // Window elapsed: the close commits exactly once.
    svc.tick(160, &mut sensors, &mut link);
    svc.tick(200, &mut sensors, &mut link);
    svc.tick(300, &mut sensors, &mut link);
    assert_eq!(link.on_topic(DOOR1_TOPIC), ["OPEN", "CLOSED"]);
}

#[test]
fn motion_edge_publishes_motion_then_clear() {
    let mut sensors = MockSensors::quiet();
    let mut link = MockMessaging::reliable();
    let mut svc = service(&mut sensors);

    svc.tick(0, &mut sensors, &mut link);

    sensors.motion = SignalLevel::Active;
    svc.tick(60, &mut sensors, &mut link);
    sensors.motion = SignalLevel::Inactive;
    svc.tick(200, &mut sensors, &mut link);

    assert_eq!(link.on_topic(MOTION_TOPIC), ["MOTION", "CLEAR"]);
    assert_eq!(svc.motion_state(), SignalLevel::Inactive);
}

#[test]
fn failed_climate_read_skips_report_but_keeps_cadence() {
    let mut sensors = MockSensors::quiet();
    sensors.climate = Err(SensorError::ReadTimeout);
    let mut link = MockMessaging::reliable();
    let mut svc = service(&mut sensors);

    svc.tick(0, &mut sensors, &mut link);
    svc.tick(30_000, &mut sensors, &mut link);
    assert_eq!(sensors.climate_reads, 1);
    assert!(link.on_topic(STATUS_TOPIC).is_empty());

    // Sensor recovers: the next scheduled slot publishes normally.
    sensors.climate = Ok(homesentry::sensors::climate::ClimateReading {
        temperature_c: 22.0,
        humidity_pct: 48.5,
    });
    svc.tick(60_000, &mut sensors, &mut link);
    assert_eq!(sensors.climate_reads, 2);
    assert_eq!(link.on_topic(STATUS_TOPIC), [r#"{"temp":22.0,"hum":48.5}"#]);
}

#[test]
fn events_are_dropped_while_link_down() {
    let mut sensors = MockSensors::quiet();
    let mut link = MockMessaging::failing(u32::MAX);
    let mut svc = service(&mut sensors);

    svc.tick(0, &mut sensors, &mut link);
    sensors.door1 = SignalLevel::Active;
    svc.tick(100, &mut sensors, &mut link);

    // The edge committed locally but never reached the wire.
    assert_eq!(svc.door_state(Door::One), SignalLevel::Active);
    assert!(link.published.is_empty());
    assert_eq!(svc.link_state(), LinkState::Disconnected);
}

#[test]
fn reconnect_backoff_schedule_through_loop() {
    let mut sensors = MockSensors::quiet();
    let mut link = MockMessaging::failing(3);
    let mut svc = service(&mut sensors);

    // Attempt at boot fails; ticking inside the backoff window is free.
    svc.tick(0, &mut sensors, &mut link);
    svc.tick(500, &mut sensors, &mut link);
    assert_eq!(link.connect_calls, 1);

    // Retries at 1 s, 3 s, 7 s (1+2+4 backoff); the fourth succeeds.
    svc.tick(1_000, &mut sensors, &mut link);
    svc.tick(3_000, &mut sensors, &mut link);
    svc.tick(7_000, &mut sensors, &mut link);
    assert_eq!(link.connect_calls, 4);
    assert_eq!(svc.link_state(), LinkState::Connected);

    // Sampling cadence was never disturbed by the outage.
    svc.tick(30_000, &mut sensors, &mut link);
    assert_eq!(link.on_topic(STATUS_TOPIC).len(), 1);
}
