//! Device identity derived from the ESP32 factory MAC address.
//!
//! Used as the MQTT client id fallback when the configuration leaves
//! `client_id` empty.  Deterministic across reboots (factory-burned eFuse
//! MAC), so the status topic stays stable too.

/// Fixed-size client id string: `homesentry-xxyyzz`.
pub type ClientIdString = heapless::String<32>;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Read the factory MAC address from eFuse.
#[cfg(target_os = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    unsafe {
        esp_idf_svc::sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
}

/// Derive the fallback client id from the last 3 MAC bytes.
/// Format: `homesentry-xxyyzz` (lowercase hex).
pub fn client_id(mac: &MacAddress) -> ClientIdString {
    let mut id = ClientIdString::new();
    use core::fmt::Write;
    let _ = write!(id, "homesentry-{:02x}{:02x}{:02x}", mac[3], mac[4], mac[5]);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_format() {
        let mac = [0x00, 0x11, 0x22, 0xAA, 0xBB, 0xCC];
        assert_eq!(client_id(&mac).as_str(), "homesentry-aabbcc");
    }

    #[test]
    fn sim_mac_deterministic() {
        assert_eq!(read_mac(), read_mac());
    }
}
