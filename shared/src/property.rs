//! Typed per-device property storage
//!
//! Values are one of boolean, string or ordered list of strings. Reads never
//! coerce between variants: asking for a bool where a string is stored is a
//! caller error reported as [`PropertyError::TypeMismatch`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by typed property access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("Property {name} holds a {actual} value, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        actual: ValueKind,
    },
}

/// Discriminant of a [`PropertyValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    String,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => write!(f, "boolean"),
            ValueKind::String => write!(f, "string"),
            ValueKind::List => write!(f, "list"),
        }
    }
}

/// A single property value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Bool(bool),
    String(String),
    List(Vec<String>),
}

impl PropertyValue {
    /// Get the variant of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::Bool(_) => ValueKind::Bool,
            PropertyValue::String(_) => ValueKind::String,
            PropertyValue::List(_) => ValueKind::List,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::List(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::String(s) => write!(f, "{:?}", s),
            PropertyValue::List(l) => write!(f, "{:?}", l),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        PropertyValue::List(value)
    }
}

type PropertyMap = BTreeMap<String, PropertyValue>;

/// Look up `name` and require it to hold `expected`
fn typed<'a>(
    map: &'a PropertyMap,
    name: &str,
    expected: ValueKind,
) -> Result<Option<&'a PropertyValue>, PropertyError> {
    match map.get(name) {
        None => Ok(None),
        Some(value) if value.kind() == expected => Ok(Some(value)),
        Some(value) => Err(PropertyError::TypeMismatch {
            name: name.to_string(),
            expected,
            actual: value.kind(),
        }),
    }
}

/// Mutable property bag owned by a device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyStore {
    values: PropertyMap,
}

impl PropertyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// Insert or overwrite a property, regardless of the previous variant
    pub fn set(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.values.insert(name.into(), value);
    }

    /// Insert or overwrite a property, keeping the variant of an existing key
    ///
    /// On mismatch the store is left unchanged.
    pub fn update(&mut self, name: &str, value: PropertyValue) -> Result<(), PropertyError> {
        if let Some(existing) = self.values.get(name) {
            if existing.kind() != value.kind() {
                return Err(PropertyError::TypeMismatch {
                    name: name.to_string(),
                    expected: existing.kind(),
                    actual: value.kind(),
                });
            }
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, PropertyError> {
        Ok(typed(&self.values, name, ValueKind::Bool)?.and_then(PropertyValue::as_bool))
    }

    pub fn get_string(&self, name: &str) -> Result<Option<&str>, PropertyError> {
        Ok(typed(&self.values, name, ValueKind::String)?.and_then(PropertyValue::as_str))
    }

    pub fn get_list(&self, name: &str) -> Result<Option<&[String]>, PropertyError> {
        Ok(typed(&self.values, name, ValueKind::List)?.and_then(PropertyValue::as_list))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over properties in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Take an immutable copy of the current contents
    pub fn snapshot(&self) -> PropertySnapshot {
        PropertySnapshot {
            values: Arc::new(self.values.clone()),
        }
    }
}

/// Read-only copy of a [`PropertyStore`] at a point in time
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySnapshot {
    values: Arc<PropertyMap>,
}

impl PropertySnapshot {
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, PropertyError> {
        Ok(typed(&self.values, name, ValueKind::Bool)?.and_then(PropertyValue::as_bool))
    }

    pub fn get_string(&self, name: &str) -> Result<Option<&str>, PropertyError> {
        Ok(typed(&self.values, name, ValueKind::String)?.and_then(PropertyValue::as_str))
    }

    pub fn get_list(&self, name: &str) -> Result<Option<&[String]>, PropertyError> {
        Ok(typed(&self.values, name, ValueKind::List)?.and_then(PropertyValue::as_list))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over properties in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut store = PropertyStore::new();
        assert!(store.is_empty());

        store.set("Cellular.AllowRoaming", PropertyValue::Bool(true));
        assert_eq!(store.get("Cellular.AllowRoaming"), Some(&PropertyValue::Bool(true)));
        assert_eq!(store.get_bool("Cellular.AllowRoaming"), Ok(Some(true)));
        assert_eq!(store.get("missing"), None);
        assert_eq!(store.get_bool("missing"), Ok(None));
    }

    #[test]
    fn test_set_overwrites_any_variant() {
        let mut store = PropertyStore::new();
        store.set("Name", "wifi1".into());
        store.set("Name", PropertyValue::Bool(false));
        assert_eq!(store.get_bool("Name"), Ok(Some(false)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_typed_read_mismatch() {
        let mut store = PropertyStore::new();
        store.set("Name", "wifi1".into());

        let err = store.get_bool("Name").unwrap_err();
        assert_eq!(
            err,
            PropertyError::TypeMismatch {
                name: "Name".into(),
                expected: ValueKind::Bool,
                actual: ValueKind::String,
            }
        );
        assert!(matches!(store.get_list("Name"), Err(PropertyError::TypeMismatch { .. })));
        assert_eq!(store.get_string("Name"), Ok(Some("wifi1")));
    }

    #[test]
    fn test_update_keeps_variant() {
        let mut store = PropertyStore::new();
        store.update("Cellular.AllowRoaming", true.into()).unwrap();
        store.update("Cellular.AllowRoaming", false.into()).unwrap();
        assert_eq!(store.get_bool("Cellular.AllowRoaming"), Ok(Some(false)));

        let result = store.update("Cellular.AllowRoaming", "yes".into());
        assert!(matches!(
            result,
            Err(PropertyError::TypeMismatch {
                expected: ValueKind::Bool,
                actual: ValueKind::String,
                ..
            })
        ));
        // Store unchanged after the rejected write
        assert_eq!(store.get_bool("Cellular.AllowRoaming"), Ok(Some(false)));
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let mut store = PropertyStore::new();
        store.set("IPConfigs", vec!["ip_config1".to_string()].into());
        let snapshot = store.snapshot();

        store.set("IPConfigs", vec!["ip_config2".to_string()].into());
        store.set("Name", "wifi1".into());

        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get_list("IPConfigs"),
            Ok(Some(&["ip_config1".to_string()][..]))
        );
        assert!(!snapshot.contains("Name"));
    }

    #[test]
    fn test_iter_in_name_order() {
        let mut store = PropertyStore::new();
        store.set("b", true.into());
        store.set("a", false.into());
        store.set("c", "x".into());

        let snapshot = store.snapshot();
        let names: Vec<&str> = snapshot.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(PropertyValue::Bool(true).to_string(), "true");
        assert_eq!(PropertyValue::from("carrier").to_string(), "\"carrier\"");
        assert_eq!(ValueKind::List.to_string(), "list");
    }
}
