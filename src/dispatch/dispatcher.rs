//! Request dispatcher for device property and action requests

use super::handlers::{self, HandlerContext};
use crate::completion::CompletionChannel;
use crate::error::RequestResult;
use crate::registry::DeviceRegistry;
use netdev_shared::{now_ms, PropertyError, PropertySnapshot, PropertyValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Identifier of an issued request
pub type RequestId = u64;

/// Success payload of a get-properties request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProperties {
    pub device_path: String,
    pub properties: PropertySnapshot,
}

/// Operation carried by a request, with its parameters
#[derive(Clone, PartialEq, Eq)]
pub enum Operation {
    GetProperties,
    SetProperty { name: String, value: PropertyValue },
    RefreshIpConfigs,
    SetCarrier { carrier: String },
    RequirePin { required: bool, pin: String },
    EnterPin { pin: String },
    UnblockPin { puk: String, pin: String },
    ChangePin { old_pin: String, new_pin: String },
}

impl Operation {
    /// Short operation name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetProperties => "GetProperties",
            Operation::SetProperty { .. } => "SetProperty",
            Operation::RefreshIpConfigs => "RefreshIPConfigs",
            Operation::SetCarrier { .. } => "SetCarrier",
            Operation::RequirePin { .. } => "RequirePin",
            Operation::EnterPin { .. } => "EnterPin",
            Operation::UnblockPin { .. } => "UnblockPin",
            Operation::ChangePin { .. } => "ChangePin",
        }
    }
}

// PIN and PUK values are redacted
impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::SetProperty { name, value } => f
                .debug_struct("SetProperty")
                .field("name", name)
                .field("value", value)
                .finish(),
            Operation::SetCarrier { carrier } => f
                .debug_struct("SetCarrier")
                .field("carrier", carrier)
                .finish(),
            Operation::RequirePin { required, .. } => f
                .debug_struct("RequirePin")
                .field("required", required)
                .finish_non_exhaustive(),
            other => f.write_str(other.name()),
        }
    }
}

/// Tracks an issued request awaiting delivery
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub request_id: RequestId,
    pub device_path: String,
    pub operation: Operation,
    pub issued_at: u64,
}

type InFlight = Arc<Mutex<HashMap<RequestId, PendingRequest>>>;

fn lock_in_flight(in_flight: &InFlight) -> MutexGuard<'_, HashMap<RequestId, PendingRequest>> {
    in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Issues requests against the device registry and schedules their outcome
///
/// Every request resolves exactly once: its continuation is scheduled on
/// the completion channel at issue time and runs on a later drain.
pub struct RequestDispatcher {
    registry: DeviceRegistry,
    channel: CompletionChannel,
    request_id: AtomicU64,
    /// Pending requests by request_id
    in_flight: InFlight,
}

impl RequestDispatcher {
    /// Create a new dispatcher over `registry`, delivering through `channel`
    pub fn new(registry: DeviceRegistry, channel: CompletionChannel) -> Self {
        Self {
            registry,
            channel,
            request_id: AtomicU64::new(0),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the backing registry
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Get the completion channel requests are delivered through
    pub fn channel(&self) -> &CompletionChannel {
        &self.channel
    }

    fn next_request_id(&self) -> RequestId {
        self.request_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record the request and schedule its continuation
    fn submit<T, F>(
        &self,
        request_id: RequestId,
        device_path: &str,
        operation: Operation,
        result: RequestResult<T>,
        continuation: F,
    ) -> RequestId
    where
        T: Send + 'static,
        F: FnOnce(RequestResult<T>) + Send + 'static,
    {
        debug!(
            ">>> Request {} ({:?}) on {}",
            request_id, operation, device_path
        );

        let pending = PendingRequest {
            request_id,
            device_path: device_path.to_string(),
            operation,
            issued_at: now_ms(),
        };
        lock_in_flight(&self.in_flight).insert(request_id, pending);

        let in_flight = self.in_flight.clone();
        self.channel.schedule(move || {
            let retired = lock_in_flight(&in_flight).remove(&request_id);
            if let Some(request) = retired {
                match &result {
                    Ok(_) => debug!(
                        "<<< Request {} ({}) on {} succeeded",
                        request_id,
                        request.operation.name(),
                        request.device_path
                    ),
                    Err(e) => debug!(
                        "<<< Request {} ({}) failed: {}",
                        request_id,
                        request.operation.name(),
                        e
                    ),
                }
            }
            continuation(result);
        });

        request_id
    }

    /// Read the full property bag of a device
    pub fn get_device_properties<F>(&self, device_path: &str, continuation: F) -> RequestId
    where
        F: FnOnce(RequestResult<DeviceProperties>) + Send + 'static,
    {
        let request_id = self.next_request_id();
        let ctx = HandlerContext {
            request_id,
            device_path,
        };
        let result = handlers::handle_get_properties(&ctx, &self.registry);
        self.submit(request_id, device_path, Operation::GetProperties, result, continuation)
    }

    /// Write a single device property
    ///
    /// Returns `TypeMismatch` without scheduling anything when the device
    /// already holds `name` with a different value type.
    pub fn set_device_property<F>(
        &mut self,
        device_path: &str,
        name: &str,
        value: PropertyValue,
        continuation: F,
    ) -> Result<RequestId, PropertyError>
    where
        F: FnOnce(RequestResult<()>) + Send + 'static,
    {
        let request_id = self.next_request_id();
        let ctx = HandlerContext {
            request_id,
            device_path,
        };
        let operation = Operation::SetProperty {
            name: name.to_string(),
            value: value.clone(),
        };

        let result = handlers::handle_set_property(&ctx, &mut self.registry, name, value)
            .inspect_err(|e| warn!("Request {} rejected: {}", request_id, e))?;

        Ok(self.submit(request_id, device_path, operation, result, continuation))
    }

    /// Ask the device to refresh its IP configurations
    pub fn request_refresh_ip_configs<F>(&self, device_path: &str, continuation: F) -> RequestId
    where
        F: FnOnce(RequestResult<()>) + Send + 'static,
    {
        let request_id = self.next_request_id();
        let ctx = HandlerContext {
            request_id,
            device_path,
        };
        let result = handlers::handle_refresh_ip_configs(&ctx, &self.registry);
        self.submit(request_id, device_path, Operation::RefreshIpConfigs, result, continuation)
    }

    /// Select the carrier of a cellular device
    pub fn set_carrier<F>(&self, device_path: &str, carrier: &str, continuation: F) -> RequestId
    where
        F: FnOnce(RequestResult<()>) + Send + 'static,
    {
        let request_id = self.next_request_id();
        let ctx = HandlerContext {
            request_id,
            device_path,
        };
        let result = handlers::handle_set_carrier(&ctx, &self.registry, carrier);
        let operation = Operation::SetCarrier {
            carrier: carrier.to_string(),
        };
        self.submit(request_id, device_path, operation, result, continuation)
    }

    /// Enable or disable the SIM lock
    pub fn require_pin<F>(&self, device_path: &str, required: bool, pin: &str, continuation: F) -> RequestId
    where
        F: FnOnce(RequestResult<()>) + Send + 'static,
    {
        let request_id = self.next_request_id();
        let ctx = HandlerContext {
            request_id,
            device_path,
        };
        let result = handlers::handle_require_pin(&ctx, &self.registry, required, pin);
        let operation = Operation::RequirePin {
            required,
            pin: pin.to_string(),
        };
        self.submit(request_id, device_path, operation, result, continuation)
    }

    /// Unlock the SIM with its PIN
    pub fn enter_pin<F>(&self, device_path: &str, pin: &str, continuation: F) -> RequestId
    where
        F: FnOnce(RequestResult<()>) + Send + 'static,
    {
        let request_id = self.next_request_id();
        let ctx = HandlerContext {
            request_id,
            device_path,
        };
        let result = handlers::handle_enter_pin(&ctx, &self.registry, pin);
        let operation = Operation::EnterPin { pin: pin.to_string() };
        self.submit(request_id, device_path, operation, result, continuation)
    }

    /// Unblock the SIM with its PUK, setting a new PIN
    pub fn unblock_pin<F>(&self, device_path: &str, puk: &str, new_pin: &str, continuation: F) -> RequestId
    where
        F: FnOnce(RequestResult<()>) + Send + 'static,
    {
        let request_id = self.next_request_id();
        let ctx = HandlerContext {
            request_id,
            device_path,
        };
        let result = handlers::handle_unblock_pin(&ctx, &self.registry, puk, new_pin);
        let operation = Operation::UnblockPin {
            puk: puk.to_string(),
            pin: new_pin.to_string(),
        };
        self.submit(request_id, device_path, operation, result, continuation)
    }

    /// Change the SIM PIN
    pub fn change_pin<F>(&self, device_path: &str, old_pin: &str, new_pin: &str, continuation: F) -> RequestId
    where
        F: FnOnce(RequestResult<()>) + Send + 'static,
    {
        let request_id = self.next_request_id();
        let ctx = HandlerContext {
            request_id,
            device_path,
        };
        let result = handlers::handle_change_pin(&ctx, &self.registry, old_pin, new_pin);
        let operation = Operation::ChangePin {
            old_pin: old_pin.to_string(),
            new_pin: new_pin.to_string(),
        };
        self.submit(request_id, device_path, operation, result, continuation)
    }

    /// Get count of requests not yet delivered
    pub fn pending_count(&self) -> usize {
        lock_in_flight(&self.in_flight).len()
    }

    /// Get count of undelivered requests for a specific device
    pub fn pending_count_for(&self, device_path: &str) -> usize {
        lock_in_flight(&self.in_flight)
            .values()
            .filter(|r| r.device_path == device_path)
            .count()
    }

    /// Get undelivered requests in issue order
    pub fn pending_requests(&self) -> Vec<PendingRequest> {
        let mut requests: Vec<PendingRequest> =
            lock_in_flight(&self.in_flight).values().cloned().collect();
        requests.sort_by_key(|r| r.request_id);
        requests
    }
}
