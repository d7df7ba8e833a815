//! SIM PIN handlers
//!
//! PIN and PUK values are never validated or logged; only the target device
//! has to exist.

use super::{resolve_device, HandlerContext};
use crate::error::RequestResult;
use crate::registry::DeviceRegistry;
use tracing::debug;

/// Handle REQUIRE_PIN (enable or disable the SIM lock)
pub fn handle_require_pin(
    ctx: &HandlerContext<'_>,
    registry: &DeviceRegistry,
    required: bool,
    _pin: &str,
) -> RequestResult<()> {
    resolve_device(ctx, registry)?;
    debug!("  [REQUIRE_PIN] {} required={}", ctx.device_path, required);
    Ok(())
}

/// Handle ENTER_PIN
pub fn handle_enter_pin(ctx: &HandlerContext<'_>, registry: &DeviceRegistry, _pin: &str) -> RequestResult<()> {
    resolve_device(ctx, registry)?;
    debug!("  [ENTER_PIN] {}", ctx.device_path);
    Ok(())
}

/// Handle UNBLOCK_PIN
pub fn handle_unblock_pin(
    ctx: &HandlerContext<'_>,
    registry: &DeviceRegistry,
    _puk: &str,
    _new_pin: &str,
) -> RequestResult<()> {
    resolve_device(ctx, registry)?;
    debug!("  [UNBLOCK_PIN] {}", ctx.device_path);
    Ok(())
}

/// Handle CHANGE_PIN
pub fn handle_change_pin(
    ctx: &HandlerContext<'_>,
    registry: &DeviceRegistry,
    _old_pin: &str,
    _new_pin: &str,
) -> RequestResult<()> {
    resolve_device(ctx, registry)?;
    debug!("  [CHANGE_PIN] {}", ctx.device_path);
    Ok(())
}
