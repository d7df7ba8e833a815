//! Property get/set handlers

use super::{resolve_device, HandlerContext};
use crate::dispatch::DeviceProperties;
use crate::error::{RequestError, RequestResult};
use crate::registry::DeviceRegistry;
use netdev_shared::{PropertyError, PropertyValue};
use tracing::{debug, warn};

/// Handle GET_PROPERTIES
pub fn handle_get_properties(
    ctx: &HandlerContext<'_>,
    registry: &DeviceRegistry,
) -> RequestResult<DeviceProperties> {
    let device = resolve_device(ctx, registry)?;
    let properties = device.properties().snapshot();

    debug!(
        "  [GET_PROPERTIES] {} properties on {}",
        properties.len(),
        ctx.device_path
    );

    Ok(DeviceProperties {
        device_path: ctx.device_path.to_string(),
        properties,
    })
}

/// Handle SET_PROPERTY
///
/// The outer error is a call-site rejection (type mismatch against the
/// stored value); the inner result is the outcome to deliver.
pub fn handle_set_property(
    ctx: &HandlerContext<'_>,
    registry: &mut DeviceRegistry,
    name: &str,
    value: PropertyValue,
) -> Result<RequestResult<()>, PropertyError> {
    let Some(device) = registry.find_device_mut(ctx.device_path) else {
        warn!(
            "Request {}: device {} not found",
            ctx.request_id, ctx.device_path
        );
        return Ok(Err(RequestError::device_not_found(ctx.device_path)));
    };

    debug!("  [SET_PROPERTY] {}.{} = {}", ctx.device_path, name, value);
    device.properties_mut().update(name, value)?;

    Ok(Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::registry::DeviceKind;
    use netdev_shared::{props, ValueKind};

    fn registry() -> DeviceRegistry {
        let mut registry = DeviceRegistry::new();
        registry.add_device("stub_cellular_device", DeviceKind::Cellular, "cellular1");
        registry
    }

    fn ctx(device_path: &str) -> HandlerContext<'_> {
        HandlerContext {
            request_id: 1,
            device_path,
        }
    }

    #[test]
    fn test_get_properties_snapshot() {
        let mut registry = registry();
        registry
            .set_device_property("stub_cellular_device", props::ALLOW_ROAMING, true.into())
            .unwrap();

        let result = handle_get_properties(&ctx("stub_cellular_device"), &registry).unwrap();
        assert_eq!(result.device_path, "stub_cellular_device");
        assert_eq!(result.properties.get_bool(props::ALLOW_ROAMING), Ok(Some(true)));
    }

    #[test]
    fn test_get_properties_unknown_device() {
        let registry = registry();
        let err = handle_get_properties(&ctx("unknown_cellular_device"), &registry).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DeviceNotFound);
        assert_eq!(err.device_path, "unknown_cellular_device");
    }

    #[test]
    fn test_set_property_writes_store() {
        let mut registry = registry();
        let outcome =
            handle_set_property(&ctx("stub_cellular_device"), &mut registry, props::ALLOW_ROAMING, true.into());
        assert_eq!(outcome, Ok(Ok(())));

        let device = registry.find_device("stub_cellular_device").unwrap();
        assert_eq!(device.properties().get_bool(props::ALLOW_ROAMING), Ok(Some(true)));
    }

    #[test]
    fn test_set_property_type_mismatch_is_rejected() {
        let mut registry = registry();
        registry
            .set_device_property("stub_cellular_device", props::ALLOW_ROAMING, false.into())
            .unwrap();

        let outcome =
            handle_set_property(&ctx("stub_cellular_device"), &mut registry, props::ALLOW_ROAMING, "on".into());
        assert!(matches!(
            outcome,
            Err(PropertyError::TypeMismatch {
                expected: ValueKind::Bool,
                actual: ValueKind::String,
                ..
            })
        ));

        let device = registry.find_device("stub_cellular_device").unwrap();
        assert_eq!(device.properties().get_bool(props::ALLOW_ROAMING), Ok(Some(false)));
    }

    #[test]
    fn test_set_property_unknown_device() {
        let mut registry = registry();
        let outcome =
            handle_set_property(&ctx("unknown_cellular_device"), &mut registry, props::ALLOW_ROAMING, true.into());
        assert_eq!(
            outcome,
            Ok(Err(RequestError::device_not_found("unknown_cellular_device")))
        );
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains("unknown_cellular_device"));
    }
}
