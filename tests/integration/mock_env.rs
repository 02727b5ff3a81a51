//! Mock ports for integration tests.
//!
//! `MockSensors` returns scripted levels and climate readings;
//! `MockMessaging` records every publish so tests can assert on the full
//! wire history without a broker.

use homesentry::app::ports::{Door, LinkError, MessagingPort, SensorPort};
use homesentry::error::SensorError;
use homesentry::sensors::climate::ClimateReading;
use homesentry::signal::SignalLevel;

// ── MockSensors ───────────────────────────────────────────────

pub struct MockSensors {
    pub climate: Result<ClimateReading, SensorError>,
    pub door1: SignalLevel,
    pub door2: SignalLevel,
    pub motion: SignalLevel,
    pub climate_reads: u32,
}

#[allow(dead_code)]
impl MockSensors {
    /// Doors closed, no motion, nominal climate.
    pub fn quiet() -> Self {
        Self {
            climate: Ok(ClimateReading {
                temperature_c: 21.3,
                humidity_pct: 55.7,
            }),
            door1: SignalLevel::Inactive,
            door2: SignalLevel::Inactive,
            motion: SignalLevel::Inactive,
            climate_reads: 0,
        }
    }
}

impl SensorPort for MockSensors {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate_reads += 1;
        self.climate
    }

    fn read_door(&mut self, door: Door) -> SignalLevel {
        match door {
            Door::One => self.door1,
            Door::Two => self.door2,
        }
    }

    fn read_motion(&mut self) -> SignalLevel {
        self.motion
    }
}

// ── MockMessaging ─────────────────────────────────────────────

pub struct MockMessaging {
    /// The first `fail_connects` connect attempts fail.
    pub fail_connects: u32,
    pub connect_calls: u32,
    pub connected: bool,
    pub published: Vec<(String, String)>,
    pub poll_calls: u32,
}

#[allow(dead_code)]
impl MockMessaging {
    pub fn reliable() -> Self {
        Self::failing(0)
    }

    pub fn failing(n: u32) -> Self {
        Self {
            fail_connects: n,
            connect_calls: 0,
            connected: false,
            published: Vec::new(),
            poll_calls: 0,
        }
    }

    pub fn on_topic(&self, topic: &str) -> Vec<&str> {
        self.published
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, p)| p.as_str())
            .collect()
    }
}

impl MessagingPort for MockMessaging {
    fn connect(&mut self, _client_id: &str) -> Result<(), LinkError> {
        self.connect_calls += 1;
        if self.connect_calls <= self.fail_connects {
            return Err(LinkError::ConnectFailed);
        }
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), LinkError> {
        if !self.connected {
            return Err(LinkError::NotConnected);
        }
        self.published.push((topic.to_string(), payload.to_string()));
        Ok(())
    }

    fn poll(&mut self) {
        self.poll_calls += 1;
    }
}
