//! HomeSentry Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single resident telemetry loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  SensorHub        MqttAdapter    WifiAdapter               │
//! │  (SensorPort)     (MessagingPort)(STA association)         │
//! │  MonotonicClock   device_id                                │
//! │  (loop timebase)  (MAC fallback id)                        │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ──────────────        │
//! │                                                            │
//! │  ┌────────────────────────────────────────────────────┐    │
//! │  │          TelemetryService (pure logic)             │    │
//! │  │  ConnectionSupervisor · PeriodicSampler ·          │    │
//! │  │  EdgeDetector ×3                                   │    │
//! │  └────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use homesentry::adapters::device_id;
use homesentry::adapters::mqtt::MqttAdapter;
use homesentry::adapters::time::MonotonicClock;
use homesentry::adapters::wifi::WifiAdapter;
use homesentry::app::service::TelemetryService;
use homesentry::config::SystemConfig;
use homesentry::sampler::PeriodicSampler;
use homesentry::sensors::climate::ClimateSensor;
use homesentry::sensors::contact::ContactSensor;
use homesentry::sensors::motion::MotionSensor;
use homesentry::sensors::SensorHub;
use homesentry::{drivers, pins};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("╔══════════════════════════════════════╗");
    info!("║  HomeSentry v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Configuration ──────────────────────────────────────
    let mut config = SystemConfig::default();
    if let (Some(ssid), Some(pass)) = (
        option_env!("HOMESENTRY_WIFI_SSID"),
        option_env!("HOMESENTRY_WIFI_PASS"),
    ) {
        config.wifi_ssid = heapless::String::try_from(ssid).unwrap_or_default();
        config.wifi_password = heapless::String::try_from(pass).unwrap_or_default();
    }

    // ── 4. Device identity ────────────────────────────────────
    let client_id = if config.client_id.is_empty() {
        let mac = device_id::read_mac();
        let id = device_id::client_id(&mac);
        info!("Client id from MAC: {}", id);
        id
    } else {
        let mut id = device_id::ClientIdString::new();
        id.push_str(config.client_id.as_str()).ok();
        id
    };

    // ── 5. WiFi station association ───────────────────────────
    // Blocking, once, before the loop starts.  If the AP is down at boot
    // the loop still runs; `wifi.poll()` keeps retrying with backoff.
    let mut wifi = WifiAdapter::new();
    match wifi.set_credentials(config.wifi_ssid.as_str(), config.wifi_password.as_str()) {
        Ok(()) => {
            if let Err(e) = wifi.connect() {
                warn!("WiFi association failed at boot ({e}), will keep retrying");
            }
        }
        Err(e) => warn!("WiFi credentials rejected ({e}), running offline"),
    }

    // ── 6. Construct adapters ─────────────────────────────────
    let mut sensors = SensorHub::new(
        ClimateSensor::new(pins::DHT_GPIO),
        ContactSensor::new(pins::REED1_GPIO, 0),
        ContactSensor::new(pins::REED2_GPIO, 1),
        MotionSensor::new(pins::PIR_GPIO),
    );
    let mut link = MqttAdapter::new(config.broker_host.as_str(), config.broker_port);
    let clock = MonotonicClock::new();

    // ── 7. Construct the telemetry service ────────────────────
    let now_ms = clock.now_ms();
    let mut service = TelemetryService::new(&config, client_id.as_str(), &mut sensors, now_ms);

    // The WiFi reconnect poll is second-granular; gate it so a 10 ms loop
    // does not burn through the backoff countdown.
    let mut wifi_poll_gate = PeriodicSampler::new(1_000, now_ms);

    info!("System ready. Entering telemetry loop.");

    // ── 8. Telemetry loop ─────────────────────────────────────
    loop {
        let now_ms = clock.now_ms();

        if wifi_poll_gate.tick(now_ms) {
            wifi.poll();
        }

        service.tick(now_ms, &mut sensors, &mut link);

        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.loop_pause_ms,
        )));
    }
}
