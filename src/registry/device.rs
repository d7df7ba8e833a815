//! Individual device state

use netdev_shared::{device_type, now_ms, PropertyStore};
use std::fmt;

/// Kind tag of a network device
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Cellular,
    Wifi,
    Ethernet,
    Wimax,
    Bluetooth,
    Vpn,
    /// Any type tag not known to this crate
    Other(String),
}

impl DeviceKind {
    /// Parse a daemon type tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            device_type::CELLULAR => DeviceKind::Cellular,
            device_type::WIFI => DeviceKind::Wifi,
            device_type::ETHERNET => DeviceKind::Ethernet,
            device_type::WIMAX => DeviceKind::Wimax,
            device_type::BLUETOOTH => DeviceKind::Bluetooth,
            device_type::VPN => DeviceKind::Vpn,
            other => DeviceKind::Other(other.to_string()),
        }
    }

    /// Daemon type tag for this kind
    pub fn as_tag(&self) -> &str {
        match self {
            DeviceKind::Cellular => device_type::CELLULAR,
            DeviceKind::Wifi => device_type::WIFI,
            DeviceKind::Ethernet => device_type::ETHERNET,
            DeviceKind::Wimax => device_type::WIMAX,
            DeviceKind::Bluetooth => device_type::BLUETOOTH,
            DeviceKind::Vpn => device_type::VPN,
            DeviceKind::Other(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A network device known to the registry
#[derive(Debug, Clone)]
pub struct Device {
    path: String,
    kind: DeviceKind,
    name: String,
    added_at: u64,
    properties: PropertyStore,
}

impl Device {
    /// Create a device with an empty property store
    pub fn new(path: impl Into<String>, kind: DeviceKind, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            name: name.into(),
            added_at: now_ms(),
            properties: PropertyStore::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registration time in milliseconds since Unix epoch
    pub fn added_at(&self) -> u64 {
        self.added_at
    }

    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyStore {
        &mut self.properties
    }
}
