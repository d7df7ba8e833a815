//! Network Device Handler Shared Types
//!
//! This crate provides the property model shared by the device registry and
//! the request dispatcher, plus byte-buffer helpers for binary protocol tests.

pub mod hexdump;
pub mod property;

use std::time::{SystemTime, UNIX_EPOCH};

pub use property::{PropertyError, PropertySnapshot, PropertyStore, PropertyValue, ValueKind};

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Well-known device property names
pub mod props {
    /// Object paths of the device's IP configurations
    pub const IP_CONFIGS: &str = "IPConfigs";

    /// Whether the cellular modem may register on roaming networks
    pub const ALLOW_ROAMING: &str = "Cellular.AllowRoaming";
}

/// Device type tags as reported by the daemon
pub mod device_type {
    pub const CELLULAR: &str = "cellular";
    pub const WIFI: &str = "wifi";
    pub const ETHERNET: &str = "ethernet";
    pub const WIMAX: &str = "wimax";
    pub const BLUETOOTH: &str = "bluetooth";
    pub const VPN: &str = "vpn";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_after_epoch() {
        assert!(now_ms() > 0);
    }
}
