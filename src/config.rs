//! Handler configuration

use crate::registry::DeviceKind;
use netdev_shared::{props, PropertyValue};
use std::time::Duration;

/// A device to register at startup
#[derive(Debug, Clone)]
pub struct DeviceSeed {
    /// Device path
    pub path: String,
    /// Device kind
    pub kind: DeviceKind,
    /// Display name
    pub name: String,
    /// Initial properties
    pub properties: Vec<(String, PropertyValue)>,
}

impl DeviceSeed {
    pub fn new(path: impl Into<String>, kind: DeviceKind, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Add an initial property
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }
}

/// Configuration for the device handler
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Devices registered at startup
    pub devices: Vec<DeviceSeed>,
    /// Interval between completion channel drains
    pub drain_interval: Duration,
    /// Upper bound on drains per `run_until_idle` call
    pub max_drain_rounds: usize,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            devices: vec![
                DeviceSeed::new("stub_cellular_device", DeviceKind::Cellular, "cellular1"),
                DeviceSeed::new("stub_wifi_device", DeviceKind::Wifi, "wifi1")
                    .with_property(props::IP_CONFIGS, vec!["ip_config1".to_string()]),
            ],
            drain_interval: Duration::from_millis(10),
            max_drain_rounds: 16,
        }
    }
}
