//! Request handlers for the different operations
//!
//! Each handler resolves the target device and produces the outcome that the
//! dispatcher later delivers to the request's continuation.

mod carrier;
mod ip_config;
mod properties;
mod sim;

pub use carrier::handle_set_carrier;
pub use ip_config::handle_refresh_ip_configs;
pub use properties::{handle_get_properties, handle_set_property};
pub use sim::{handle_change_pin, handle_enter_pin, handle_require_pin, handle_unblock_pin};

use super::RequestId;
use crate::error::{RequestError, RequestResult};
use crate::registry::{Device, DeviceRegistry};
use tracing::warn;

/// Context passed to request handlers
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext<'a> {
    pub request_id: RequestId,
    pub device_path: &'a str,
}

/// Look up the request's target device
fn resolve_device<'r>(ctx: &HandlerContext<'_>, registry: &'r DeviceRegistry) -> RequestResult<&'r Device> {
    registry.find_device(ctx.device_path).ok_or_else(|| {
        warn!(
            "Request {}: device {} not found",
            ctx.request_id, ctx.device_path
        );
        RequestError::device_not_found(ctx.device_path)
    })
}
