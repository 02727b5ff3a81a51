//! WiFi station-mode adapter.
//!
//! Handles the one-time network association at boot (the only place the
//! firmware is allowed to block) and a non-blocking per-tick reconnect
//! poll afterwards.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via
//!   `esp_idf_svc::wifi::BlockingWifi`.
//! - **all other targets**: simulation stubs for host-side tests.
//!
//! ## Reconnection policy
//!
//! On disconnect the adapter waits an exponential backoff (2 s → 4 s →
//! 8 s … capped at 60 s) before retrying, counted in `poll()` calls.

use core::fmt;
use log::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WifiError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
}

impl fmt::Display for WifiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connected,
    Reconnecting { attempt: u32 },
}

const MAX_BACKOFF_SECS: u32 = 60;

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), WifiError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(WifiError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), WifiError> {
    if password.is_empty() {
        return Ok(()); // open network
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(WifiError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    backoff_secs: u32,
    /// Seconds remaining until the next reconnect attempt.
    retry_countdown_secs: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_connect_counter: u32,
}

impl WifiAdapter {
    pub fn new() -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            backoff_secs: 2,
            retry_countdown_secs: 0,
            #[cfg(not(target_os = "espidf"))]
            sim_connect_counter: 0,
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    pub fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), WifiError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid.push_str(ssid).map_err(|_| WifiError::InvalidSsid)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|_| WifiError::InvalidPassword)?;
        info!("WiFi: credentials updated (SSID='{}')", self.ssid);
        Ok(())
    }

    /// One-time blocking association at boot.  This is the only blocking
    /// call in the firmware; the loop has not started yet.
    pub fn connect(&mut self) -> Result<(), WifiError> {
        if self.ssid.is_empty() {
            return Err(WifiError::NoCredentials);
        }
        info!("WiFi: connecting to '{}'", self.ssid);
        match self.platform_connect() {
            Ok(()) => {
                self.state = WifiState::Connected;
                self.backoff_secs = 2;
                info!("WiFi: connected");
                Ok(())
            }
            Err(e) => {
                error!("WiFi: connection failed — {}", e);
                self.state = WifiState::Reconnecting { attempt: 0 };
                self.retry_countdown_secs = self.backoff_secs;
                Err(e)
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.platform_is_connected()
    }

    /// Non-blocking reconnect poll.  Call roughly once per second of loop
    /// time; returns immediately unless a retry is due.
    pub fn poll(&mut self) {
        match self.state {
            WifiState::Reconnecting { attempt } => {
                if self.retry_countdown_secs > 0 {
                    self.retry_countdown_secs -= 1;
                    return;
                }
                info!("WiFi: reconnect attempt {} (backoff {}s)", attempt, self.backoff_secs);
                match self.platform_connect() {
                    Ok(()) => {
                        self.state = WifiState::Connected;
                        self.backoff_secs = 2;
                        info!("WiFi: reconnected");
                    }
                    Err(_) => {
                        self.backoff_secs = (self.backoff_secs * 2).min(MAX_BACKOFF_SECS);
                        self.retry_countdown_secs = self.backoff_secs;
                        self.state = WifiState::Reconnecting { attempt: attempt + 1 };
                    }
                }
            }
            WifiState::Connected => {
                if !self.platform_is_connected() {
                    warn!("WiFi: connection lost, entering reconnect");
                    self.state = WifiState::Reconnecting { attempt: 0 };
                    self.retry_countdown_secs = 0;
                }
            }
            WifiState::Disconnected => {}
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), WifiError> {
        // The BlockingWifi handle is created in main (it owns the modem
        // peripheral) and associated there; this path only re-issues the
        // connect request after a drop.  The IDF driver re-uses the stored
        // station configuration.
        unsafe {
            if esp_idf_svc::sys::esp_wifi_connect() != esp_idf_svc::sys::ESP_OK {
                return Err(WifiError::ConnectionFailed);
            }
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), WifiError> {
        self.sim_connect_counter = self.sim_connect_counter.wrapping_add(1);
        // Every 10th attempt fails to exercise the reconnect backoff.
        if self.sim_connect_counter % 10 == 3 {
            warn!("WiFi(sim): simulated failure (attempt {})", self.sim_connect_counter);
            return Err(WifiError::ConnectionFailed);
        }
        info!("WiFi(sim): connected to '{}' (attempt {})", self.ssid, self.sim_connect_counter);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        let mut ap_info: esp_idf_svc::sys::wifi_ap_record_t = Default::default();
        (unsafe { esp_idf_svc::sys::esp_wifi_sta_get_ap_info(&mut ap_info) })
            == esp_idf_svc::sys::ESP_OK
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.state == WifiState::Connected
    }
}

impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_ssid() {
        let mut a = WifiAdapter::new();
        assert_eq!(a.set_credentials("", "password123"), Err(WifiError::InvalidSsid));
    }

    #[test]
    fn rejects_short_password() {
        let mut a = WifiAdapter::new();
        assert_eq!(a.set_credentials("MyNet", "short"), Err(WifiError::InvalidPassword));
    }

    #[test]
    fn accepts_open_network() {
        let mut a = WifiAdapter::new();
        assert!(a.set_credentials("OpenCafe", "").is_ok());
    }

    #[test]
    fn connect_without_credentials_fails() {
        let mut a = WifiAdapter::new();
        assert_eq!(a.connect(), Err(WifiError::NoCredentials));
    }

    #[test]
    fn connect_then_is_connected() {
        let mut a = WifiAdapter::new();
        a.set_credentials("TestNet", "password1").unwrap();
        a.connect().unwrap();
        assert!(a.is_connected());
        assert_eq!(a.state(), WifiState::Connected);
    }
}
