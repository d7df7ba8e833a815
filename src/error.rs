//! Error kinds delivered to request continuations

use std::fmt;
use thiserror::Error;

/// Opaque failure kind reported to a request's continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested device path is not in the registry
    DeviceNotFound,
}

impl ErrorKind {
    /// Stable identifier for this kind
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::DeviceNotFound => "device-not-found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure outcome of a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} for device {device_path}")]
pub struct RequestError {
    pub device_path: String,
    pub kind: ErrorKind,
}

impl RequestError {
    pub fn device_not_found(device_path: impl Into<String>) -> Self {
        Self {
            device_path: device_path.into(),
            kind: ErrorKind::DeviceNotFound,
        }
    }
}

/// Outcome delivered to a request continuation
pub type RequestResult<T> = Result<T, RequestError>;

/// Errors from direct registry access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Device not found: {path}")]
    DeviceNotFound { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RequestError::device_not_found("unknown_cellular_device");
        assert_eq!(err.kind, ErrorKind::DeviceNotFound);
        assert_eq!(
            err.to_string(),
            "device-not-found for device unknown_cellular_device"
        );
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::DeviceNotFound {
            path: "stub_wifi_device".into(),
        };
        assert_eq!(err.to_string(), "Device not found: stub_wifi_device");
    }
}
