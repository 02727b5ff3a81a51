//! System configuration parameters
//!
//! All tunable parameters for the HomeSentry node.  Loaded once at boot,
//! before the telemetry loop starts; nothing is persisted across restarts.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Broker ---
    /// MQTT broker hostname or IP.
    pub broker_host: heapless::String<64>,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.  Empty = derive from the factory MAC.
    pub client_id: heapless::String<32>,

    // --- WiFi ---
    /// Station SSID.
    pub wifi_ssid: heapless::String<32>,
    /// Station password (empty for open networks).
    pub wifi_password: heapless::String<64>,

    // --- Timing ---
    /// Periodic climate report cadence (seconds).
    pub status_interval_secs: u32,
    /// Debounce window for contact/motion edge commits (milliseconds).
    pub debounce_ms: u32,
    /// Per-tick yield so the loop does not saturate the CPU (milliseconds).
    /// Must stay small relative to `debounce_ms` to bound edge-timing jitter.
    pub loop_pause_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            broker_host: heapless::String::try_from("192.168.1.165").unwrap_or_default(),
            broker_port: 1883,
            client_id: heapless::String::try_from("esp32_1").unwrap_or_default(),

            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),

            status_interval_secs: 30,
            debounce_ms: 50,
            loop_pause_ms: 10,
        }
    }
}

impl SystemConfig {
    /// Periodic climate cadence in milliseconds.
    pub fn status_interval_ms(&self) -> u32 {
        self.status_interval_secs.saturating_mul(1000)
    }
}
