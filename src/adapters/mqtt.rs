//! MQTT messaging adapter.
//!
//! Implements [`MessagingPort`] — the boundary the telemetry loop publishes
//! through.  The transport itself is an external capability: on ESP-IDF it
//! wraps `EspMqttClient`, whose background task services the session, so
//! `poll()` is a no-op there; the port keeps the operation for transports
//! (and test mocks) that need explicit per-tick servicing.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF MQTT client; session health
//!   is tracked through an atomic written by the event callback.
//! - **all other targets**: simulation stub with the same deterministic
//!   failure injection as the WiFi sim.

use log::{info, warn};

use crate::app::ports::{LinkError, MessagingPort};

#[cfg(target_os = "espidf")]
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// MQTT adapter over the platform transport.
pub struct MqttAdapter {
    broker_host: heapless::String<64>,
    broker_port: u16,
    #[cfg(target_os = "espidf")]
    client: Option<esp_idf_svc::mqtt::client::EspMqttClient<'static>>,
    #[cfg(target_os = "espidf")]
    session_up: Arc<AtomicBool>,
    #[cfg(not(target_os = "espidf"))]
    sim_connected: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_connect_counter: u32,
}

impl MqttAdapter {
    pub fn new(broker_host: &str, broker_port: u16) -> Self {
        Self {
            broker_host: heapless::String::try_from(broker_host).unwrap_or_default(),
            broker_port,
            #[cfg(target_os = "espidf")]
            client: None,
            #[cfg(target_os = "espidf")]
            session_up: Arc::new(AtomicBool::new(false)),
            #[cfg(not(target_os = "espidf"))]
            sim_connected: false,
            #[cfg(not(target_os = "espidf"))]
            sim_connect_counter: 0,
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    /// Create the IDF client on first use.  The IDF task owns the TCP
    /// session and signals state changes through `session_up`; inbound
    /// messages are logged only (this node exposes no command surface).
    #[cfg(target_os = "espidf")]
    fn start_client(&mut self, client_id: &str) -> Result<(), LinkError> {
        use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration};

        let url = format!("mqtt://{}:{}", self.broker_host, self.broker_port);
        let conf = MqttClientConfiguration {
            client_id: Some(client_id),
            ..Default::default()
        };

        let session_up = Arc::clone(&self.session_up);
        let client = EspMqttClient::new_cb(&url, &conf, move |event| match event.payload() {
            EventPayload::Connected(_) => {
                info!("mqtt: session up");
                session_up.store(true, Ordering::Release);
            }
            EventPayload::Disconnected => {
                warn!("mqtt: session down");
                session_up.store(false, Ordering::Release);
            }
            EventPayload::Received { topic, data, .. } => {
                info!(
                    "mqtt: received {} : {}",
                    topic.unwrap_or("<none>"),
                    core::str::from_utf8(data).unwrap_or("<binary>")
                );
            }
            _ => {}
        })
        .map_err(|e| {
            warn!("mqtt: client init failed ({e})");
            LinkError::ConnectFailed
        })?;

        self.client = Some(client);
        info!("mqtt: client started for {url}");
        Ok(())
    }
}

impl MessagingPort for MqttAdapter {
    #[cfg(target_os = "espidf")]
    fn connect(&mut self, client_id: &str) -> Result<(), LinkError> {
        if self.client.is_none() {
            self.start_client(client_id)?;
        }
        // Session establishment is asynchronous; report success only once
        // the event callback has seen CONNECTED.  Until then the supervisor
        // keeps backing off while the IDF task retries underneath.
        if self.session_up.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(LinkError::ConnectFailed)
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn connect(&mut self, client_id: &str) -> Result<(), LinkError> {
        self.sim_connect_counter = self.sim_connect_counter.wrapping_add(1);
        // Every 10th attempt fails to exercise the supervisor backoff.
        if self.sim_connect_counter % 10 == 3 {
            warn!("mqtt(sim): simulated connect failure (attempt {})", self.sim_connect_counter);
            return Err(LinkError::ConnectFailed);
        }
        info!(
            "mqtt(sim): connected to {}:{} as '{}'",
            self.broker_host, self.broker_port, client_id
        );
        self.sim_connected = true;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn is_connected(&self) -> bool {
        self.session_up.load(Ordering::Acquire)
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_connected(&self) -> bool {
        self.sim_connected
    }

    #[cfg(target_os = "espidf")]
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), LinkError> {
        use esp_idf_svc::mqtt::client::QoS;

        let client = self.client.as_mut().ok_or(LinkError::NotConnected)?;
        client
            .enqueue(topic, QoS::AtMostOnce, false, payload.as_bytes())
            .map(|_| ())
            .map_err(|_| LinkError::PublishFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), LinkError> {
        if !self.sim_connected {
            return Err(LinkError::NotConnected);
        }
        info!("mqtt(sim) -> {topic} : {payload}");
        Ok(())
    }

    fn poll(&mut self) {
        // ESP-IDF services the session from its own task; nothing to do.
        // Kept non-blocking by contract for transports that need it.
    }
}
