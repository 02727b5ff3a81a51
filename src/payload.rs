//! Fixed topics and fixed-schema payload builders.
//!
//! The topic names and payload bytes below are the compatibility contract
//! with the backend — they must be reproduced bit-for-bit.  Payloads are
//! built with a fixed-schema writer into stack-allocated strings, so the
//! wire format cannot drift with serializer settings (always one decimal
//! for climate values, always the same key order).

use core::fmt::Write;

use crate::sensors::climate::ClimateReading;
use crate::signal::SignalLevel;

/// Debounced edge alerts, door 1.
pub const TOPIC_DOOR1: &str = "home/alerts/door1";
/// Debounced edge alerts, door 2.
pub const TOPIC_DOOR2: &str = "home/alerts/door2";
/// Debounced motion alerts.
pub const TOPIC_MOTION: &str = "home/alerts/motion1";

/// Periodic status topic: `home/status/<client_id>`.
pub fn status_topic(client_id: &str) -> heapless::String<64> {
    let mut topic = heapless::String::new();
    let _ = write!(topic, "home/status/{client_id}");
    topic
}

/// Climate status payload: `{"temp":<t>,"hum":<h>}`, one decimal each.
pub fn climate_json(reading: &ClimateReading) -> heapless::String<48> {
    let mut payload = heapless::String::new();
    let _ = write!(
        payload,
        "{{\"temp\":{:.1},\"hum\":{:.1}}}",
        reading.temperature_c, reading.humidity_pct
    );
    payload
}

/// Door contact payload for a committed edge.
pub fn contact_payload(level: SignalLevel) -> &'static str {
    match level {
        SignalLevel::Active => "OPEN",
        SignalLevel::Inactive => "CLOSED",
    }
}

/// Motion payload for a committed edge.
pub fn motion_payload(level: SignalLevel) -> &'static str {
    match level {
        SignalLevel::Active => "MOTION",
        SignalLevel::Inactive => "CLEAR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climate_payload_is_bit_exact() {
        let r = ClimateReading {
            temperature_c: 21.3,
            humidity_pct: 55.7,
        };
        assert_eq!(climate_json(&r).as_str(), r#"{"temp":21.3,"hum":55.7}"#);
    }

    #[test]
    fn climate_payload_rounds_to_one_decimal() {
        let r = ClimateReading {
            temperature_c: 21.0,
            humidity_pct: 55.55,
        };
        assert_eq!(climate_json(&r).as_str(), r#"{"temp":21.0,"hum":55.5}"#);
    }

    #[test]
    fn climate_payload_negative_temperature() {
        let r = ClimateReading {
            temperature_c: -3.2,
            humidity_pct: 40.0,
        };
        assert_eq!(climate_json(&r).as_str(), r#"{"temp":-3.2,"hum":40.0}"#);
    }

    #[test]
    fn status_topic_embeds_client_id() {
        assert_eq!(status_topic("esp32_1").as_str(), "home/status/esp32_1");
    }

    #[test]
    fn alert_payload_strings() {
        assert_eq!(contact_payload(SignalLevel::Active), "OPEN");
        assert_eq!(contact_payload(SignalLevel::Inactive), "CLOSED");
        assert_eq!(motion_payload(SignalLevel::Active), "MOTION");
        assert_eq!(motion_payload(SignalLevel::Inactive), "CLEAR");
    }
}
