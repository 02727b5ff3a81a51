//! Telemetry service — the per-tick orchestration core.
//!
//! [`TelemetryService`] owns all mutable loop state: the connection
//! supervisor, the periodic status sampler, and one edge detector per
//! digital sensor.  Ports are injected at each call site, so the whole
//! procedure runs against mocks on the host.
//!
//! Per tick:
//! 1. Maintain the broker link (non-blocking; `poll()` once if connected).
//! 2. If the status sampler fires, read the climate sensor and publish the
//!    JSON snapshot; an unavailable sensor skips the publish without
//!    touching the cadence.
//! 3. Feed each edge detector its raw level; publish committed edges.
//!
//! Detectors and the sampler always run, connected or not — while the link
//! is down their events are computed and then dropped (no offline queue).

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::link::{ConnectionSupervisor, LinkState};
use crate::payload;
use crate::sampler::PeriodicSampler;
use crate::signal::{EdgeDetector, SignalLevel};

use super::ports::{Door, MessagingPort, SensorPort};

/// The telemetry loop core.  Constructed once at boot; `tick` is invoked
/// forever by `main`.
pub struct TelemetryService {
    supervisor: ConnectionSupervisor,
    status_sampler: PeriodicSampler,
    door1: EdgeDetector,
    door2: EdgeDetector,
    motion: EdgeDetector,
    status_topic: heapless::String<64>,
}

impl TelemetryService {
    /// Build the service, seeding each edge detector with the sensor's
    /// boot-time level so the first tick cannot report a spurious edge.
    pub fn new(
        config: &SystemConfig,
        client_id: &str,
        sensors: &mut impl SensorPort,
        now_ms: u32,
    ) -> Self {
        let door1_boot = sensors.read_door(Door::One);
        let door2_boot = sensors.read_door(Door::Two);
        let motion_boot = sensors.read_motion();
        info!(
            "telemetry: boot levels door1={:?} door2={:?} motion={:?}",
            door1_boot, door2_boot, motion_boot
        );

        Self {
            supervisor: ConnectionSupervisor::new(client_id),
            status_sampler: PeriodicSampler::new(config.status_interval_ms(), now_ms),
            door1: EdgeDetector::new(door1_boot, config.debounce_ms, now_ms),
            door2: EdgeDetector::new(door2_boot, config.debounce_ms, now_ms),
            motion: EdgeDetector::new(motion_boot, config.debounce_ms, now_ms),
            status_topic: payload::status_topic(client_id),
        }
    }

    /// Current broker link state (for diagnostics).
    pub fn link_state(&self) -> LinkState {
        self.supervisor.state()
    }

    /// Run one loop iteration.  Never blocks beyond the port calls.
    pub fn tick(
        &mut self,
        now_ms: u32,
        sensors: &mut impl SensorPort,
        link: &mut impl MessagingPort,
    ) {
        let connected = self.supervisor.maintain(link, now_ms);

        // Periodic climate report.
        if self.status_sampler.tick(now_ms) {
            match sensors.read_climate() {
                Ok(reading) => {
                    let body = payload::climate_json(&reading);
                    Self::dispatch(link, connected, self.status_topic.as_str(), body.as_str());
                }
                Err(e) => warn!("telemetry: climate read failed ({e}), skipping report"),
            }
        }

        // Debounced contact and motion edges.
        let d1 = sensors.read_door(Door::One);
        if let Some(level) = self.door1.observe(d1, now_ms) {
            Self::dispatch(link, connected, payload::TOPIC_DOOR1, payload::contact_payload(level));
        }

        let d2 = sensors.read_door(Door::Two);
        if let Some(level) = self.door2.observe(d2, now_ms) {
            Self::dispatch(link, connected, payload::TOPIC_DOOR2, payload::contact_payload(level));
        }

        let pir = sensors.read_motion();
        if let Some(level) = self.motion.observe(pir, now_ms) {
            Self::dispatch(link, connected, payload::TOPIC_MOTION, payload::motion_payload(level));
        }
    }

    /// Best-effort publish.  While the link is down the event is dropped —
    /// durability would need an external queue, which this node does not
    /// carry.
    fn dispatch(link: &mut impl MessagingPort, connected: bool, topic: &str, body: &str) {
        if !connected {
            debug!("telemetry: link down, dropping {topic} : {body}");
            return;
        }
        match link.publish(topic, body) {
            Ok(()) => info!("MQTT -> {topic} : {body}"),
            Err(e) => warn!("telemetry: publish to {topic} failed ({e}), event dropped"),
        }
    }

    /// Stable level of a detector, for tests and diagnostics.
    pub fn door_state(&self, door: Door) -> SignalLevel {
        match door {
            Door::One => self.door1.current(),
            Door::Two => self.door2.current(),
        }
    }

    pub fn motion_state(&self) -> SignalLevel {
        self.motion.current()
    }
}
