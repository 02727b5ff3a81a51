//! Adapters — concrete implementations of the port traits and platform glue.
//!
//! | Adapter     | Implements      | Connects to                |
//! |-------------|-----------------|----------------------------|
//! | `mqtt`      | MessagingPort   | ESP-IDF MQTT client        |
//! | `wifi`      | —               | ESP-IDF WiFi STA           |
//! | `time`      | —               | ESP32 system timer         |
//! | `device_id` | —               | Factory eFuse MAC          |

pub mod device_id;
pub mod mqtt;
pub mod time;
pub mod wifi;
