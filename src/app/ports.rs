//! Port traits — the boundary between the telemetry loop and the outside
//! world.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────┐
//!                  │   TelemetryService   │ ──▶ MessagingPort
//!                  └──────────────────────┘
//! ```
//!
//! Driven adapters (the sensor hub, the MQTT client) implement these traits.
//! The [`TelemetryService`](super::service::TelemetryService) consumes them
//! via generics, so the loop never touches hardware or sockets directly and
//! the whole per-tick procedure is testable with mocks.

use core::fmt;

use crate::error::SensorError;
use crate::sensors::climate::ClimateReading;
use crate::signal::SignalLevel;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → loop)
// ───────────────────────────────────────────────────────────────

/// Which door contact to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Door {
    One,
    Two,
}

/// Read-side port: the loop calls this to obtain calibrated readings.
///
/// Digital reads are infallible raw levels (polarity already applied by the
/// source); the climate read is fallible because the DHT11 occasionally
/// drops a frame — callers skip that tick's publish, never substitute a
/// default.
pub trait SensorPort {
    /// Read the DHT11.  `Err` means transient unavailability.
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;

    /// Raw (undebounced) level of a door contact.  `Active` = open.
    fn read_door(&mut self, door: Door) -> SignalLevel;

    /// Raw (undebounced) PIR level.  `Active` = motion.
    fn read_motion(&mut self) -> SignalLevel;
}

// ───────────────────────────────────────────────────────────────
// Messaging port (driven adapter: loop → broker)
// ───────────────────────────────────────────────────────────────

/// Publish-side port over the MQTT transport.
///
/// All operations are non-blocking within a tick.  `publish` is best-effort:
/// no delivery confirmation is surfaced, and the loop drops the event on
/// failure rather than retrying (there is no offline queue).
pub trait MessagingPort {
    /// Attempt a broker connection under the given client id.
    fn connect(&mut self, client_id: &str) -> Result<(), LinkError>;

    /// Current connection health as seen by the transport.
    fn is_connected(&self) -> bool;

    /// Best-effort publish of a UTF-8 payload to a topic.
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), LinkError>;

    /// Non-blocking transport maintenance (keep-alive, inbound servicing).
    /// Called once per tick while connected.
    fn poll(&mut self);
}

/// Errors from [`MessagingPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The broker refused or the TCP session could not be established.
    ConnectFailed,
    /// Publish attempted while the transport is down.
    NotConnected,
    /// The transport accepted the call but could not send.
    PublishFailed,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed => write!(f, "broker connect failed"),
            Self::NotConnected => write!(f, "not connected"),
            Self::PublishFailed => write!(f, "publish failed"),
        }
    }
}
