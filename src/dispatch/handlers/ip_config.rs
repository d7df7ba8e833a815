//! IP configuration refresh handler

use super::{resolve_device, HandlerContext};
use crate::error::RequestResult;
use crate::registry::DeviceRegistry;
use netdev_shared::props;
use tracing::debug;

/// Handle REFRESH_IP_CONFIGS
///
/// Refresh is fire-and-forget: a known device always succeeds.
pub fn handle_refresh_ip_configs(ctx: &HandlerContext<'_>, registry: &DeviceRegistry) -> RequestResult<()> {
    let device = resolve_device(ctx, registry)?;

    let configs = device
        .properties()
        .get_list(props::IP_CONFIGS)
        .ok()
        .flatten()
        .map_or(0, <[String]>::len);

    debug!(
        "  [REFRESH_IP_CONFIGS] {} ({} configs)",
        ctx.device_path, configs
    );

    Ok(())
}
