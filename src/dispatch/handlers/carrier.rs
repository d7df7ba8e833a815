//! Cellular carrier selection handler

use super::{resolve_device, HandlerContext};
use crate::error::RequestResult;
use crate::registry::DeviceRegistry;
use tracing::debug;

/// Handle SET_CARRIER
pub fn handle_set_carrier(
    ctx: &HandlerContext<'_>,
    registry: &DeviceRegistry,
    carrier: &str,
) -> RequestResult<()> {
    let device = resolve_device(ctx, registry)?;

    debug!(
        "  [SET_CARRIER] {} ({}) -> {}",
        ctx.device_path,
        device.kind(),
        carrier
    );

    Ok(())
}
