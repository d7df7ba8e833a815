//! Registry tracking all known devices

use super::device::{Device, DeviceKind};
use crate::config::DeviceSeed;
use crate::error::RegistryError;
use netdev_shared::PropertyValue;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Catalog of devices keyed by path
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    /// Map of device path -> device
    devices: HashMap<String, Device>,
}

impl DeviceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            devices: HashMap::new(),
        }
    }

    /// Build a registry from configured seeds
    ///
    /// Later seeds with an already used path are skipped.
    pub fn from_seeds(seeds: &[DeviceSeed]) -> Self {
        let mut registry = Self::new();
        for seed in seeds {
            if !registry.add_device(&seed.path, seed.kind.clone(), &seed.name) {
                continue;
            }
            if let Some(device) = registry.devices.get_mut(&seed.path) {
                for (name, value) in &seed.properties {
                    device.properties_mut().set(name.as_str(), value.clone());
                }
            }
        }
        registry
    }

    /// Register a new device with an empty property store
    ///
    /// Returns `false` and leaves the existing device untouched if `path`
    /// is already registered.
    pub fn add_device(&mut self, path: &str, kind: DeviceKind, name: &str) -> bool {
        if self.devices.contains_key(path) {
            warn!("Device {} already registered, ignoring", path);
            return false;
        }

        debug!("Adding device {} ({}, {})", path, kind, name);
        self.devices
            .insert(path.to_string(), Device::new(path, kind, name));
        true
    }

    /// Get a specific device
    pub fn find_device(&self, path: &str) -> Option<&Device> {
        self.devices.get(path)
    }

    /// Get a specific device for mutation
    pub fn find_device_mut(&mut self, path: &str) -> Option<&mut Device> {
        self.devices.get_mut(path)
    }

    /// Write a property directly, without type checking
    pub fn set_device_property(
        &mut self,
        path: &str,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), RegistryError> {
        let device = self
            .devices
            .get_mut(path)
            .ok_or_else(|| RegistryError::DeviceNotFound {
                path: path.to_string(),
            })?;
        device.properties_mut().set(name, value);
        Ok(())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.devices.contains_key(path)
    }

    /// Get all registered device paths, sorted
    pub fn device_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.devices.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Get the number of registered devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HandlerConfig;
    use netdev_shared::props;

    #[test]
    fn test_add_and_find() {
        let mut registry = DeviceRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.add_device("stub_cellular_device", DeviceKind::Cellular, "cellular1"));
        let device = registry.find_device("stub_cellular_device").expect("device added");
        assert_eq!(device.kind(), &DeviceKind::Cellular);
        assert!(device.properties().is_empty());

        assert!(registry.find_device("unknown_cellular_device").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut registry = DeviceRegistry::new();
        registry.add_device("stub_wifi_device", DeviceKind::Wifi, "wifi1");
        registry
            .set_device_property("stub_wifi_device", props::IP_CONFIGS, vec!["ip_config1".to_string()].into())
            .unwrap();

        assert!(!registry.add_device("stub_wifi_device", DeviceKind::Ethernet, "eth0"));

        let device = registry.find_device("stub_wifi_device").unwrap();
        assert_eq!(device.kind(), &DeviceKind::Wifi);
        assert_eq!(device.name(), "wifi1");
        assert_eq!(device.properties().len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_set_property_unknown_device() {
        let mut registry = DeviceRegistry::new();
        let result = registry.set_device_property("unknown_cellular_device", props::ALLOW_ROAMING, true.into());
        assert_eq!(
            result,
            Err(RegistryError::DeviceNotFound {
                path: "unknown_cellular_device".into()
            })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_default_seeds() {
        let registry = DeviceRegistry::from_seeds(&HandlerConfig::default().devices);
        assert_eq!(
            registry.device_paths(),
            vec!["stub_cellular_device".to_string(), "stub_wifi_device".to_string()]
        );

        let wifi = registry.find_device("stub_wifi_device").unwrap();
        assert_eq!(
            wifi.properties().get_list(props::IP_CONFIGS),
            Ok(Some(&["ip_config1".to_string()][..]))
        );
        assert!(registry.find_device("stub_cellular_device").unwrap().properties().is_empty());
    }

    #[test]
    fn test_from_seeds_skips_duplicate_paths() {
        let seeds = vec![
            DeviceSeed::new("dev0", DeviceKind::Wifi, "first"),
            DeviceSeed::new("dev0", DeviceKind::Cellular, "second").with_property(props::ALLOW_ROAMING, true),
        ];
        let registry = DeviceRegistry::from_seeds(&seeds);
        let device = registry.find_device("dev0").unwrap();
        assert_eq!(device.name(), "first");
        assert!(device.properties().is_empty());
    }
}
