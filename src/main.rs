use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use netdev_handler::{
    reply, CompletionChannel, DeviceProperties, DeviceRegistry, ErrorKind, HandlerConfig,
    MessagePump, RequestDispatcher, RequestResult,
};
use netdev_shared::props;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const CELLULAR_DEVICE: &str = "stub_cellular_device";
const WIFI_DEVICE: &str = "stub_wifi_device";
const UNKNOWN_DEVICE: &str = "unknown_cellular_device";

/// Replays device handler requests against a seeded stub registry
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Interval between completion channel drains, in milliseconds
    #[arg(long, default_value_t = 10)]
    drain_interval_ms: u64,

    /// Do not seed the stub wifi device
    #[arg(long)]
    skip_wifi: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let mut config = HandlerConfig {
        drain_interval: Duration::from_millis(args.drain_interval_ms.max(1)),
        ..Default::default()
    };
    if args.skip_wifi {
        config.devices.retain(|seed| seed.path != WIFI_DEVICE);
    }

    let registry = DeviceRegistry::from_seeds(&config.devices);
    info!("Device handler starting with {} devices", registry.len());
    for path in registry.device_paths() {
        if let Some(device) = registry.find_device(&path) {
            info!("  {} ({}, {})", path, device.kind(), device.name());
        }
    }

    let channel = CompletionChannel::new();
    let mut dispatcher = RequestDispatcher::new(registry, channel.clone());
    let pump = MessagePump::spawn(channel.clone(), config.drain_interval);

    let outcome = run_scenario(&mut dispatcher, args.skip_wifi).await;

    pump.stop();
    let leftover = channel.run_until_idle(config.max_drain_rounds);
    if leftover > 0 {
        warn!("Delivered {} continuations after pump stop", leftover);
    }

    outcome?;
    info!("All requests resolved as expected");
    Ok(())
}

/// Wait for a continuation to be delivered by the pump
async fn wait<T>(rx: oneshot::Receiver<RequestResult<T>>) -> Result<RequestResult<T>> {
    rx.await.context("continuation dropped before delivery")
}

fn expect_success(label: &str, result: RequestResult<()>) -> Result<()> {
    match result {
        Ok(()) => {
            info!("{}: success", label);
            Ok(())
        }
        Err(e) => Err(anyhow!("{} failed: {}", label, e)),
    }
}

fn expect_not_found(label: &str, result: RequestResult<()>) -> Result<()> {
    match result {
        Err(e) if e.kind == ErrorKind::DeviceNotFound => {
            info!("{}: {} as expected", label, e.kind);
            Ok(())
        }
        Err(e) => Err(anyhow!("{}: unexpected error {}", label, e)),
        Ok(()) => Err(anyhow!("{}: unexpectedly succeeded", label)),
    }
}

async fn run_scenario(dispatcher: &mut RequestDispatcher, skip_wifi: bool) -> Result<()> {
    if !skip_wifi {
        let (continuation, rx) = reply::<DeviceProperties>();
        dispatcher.get_device_properties(WIFI_DEVICE, continuation);
        let properties = wait(rx).await?.map_err(|e| anyhow!("GetDeviceProperties failed: {}", e))?;
        info!(
            "GetDeviceProperties({}): {} properties",
            properties.device_path,
            properties.properties.len()
        );
        for (name, value) in properties.properties.iter() {
            info!("  {} = {}", name, value);
        }

        let (continuation, rx) = reply::<()>();
        dispatcher.request_refresh_ip_configs(WIFI_DEVICE, continuation);
        expect_success("RequestRefreshIPConfigs", wait(rx).await?)?;
    }

    for allow_roaming in [true, false] {
        let (continuation, rx) = reply::<()>();
        dispatcher.set_device_property(
            CELLULAR_DEVICE,
            props::ALLOW_ROAMING,
            allow_roaming.into(),
            continuation,
        )?;
        expect_success("SetDeviceProperty", wait(rx).await?)?;

        let (continuation, rx) = reply::<DeviceProperties>();
        dispatcher.get_device_properties(CELLULAR_DEVICE, continuation);
        let properties = wait(rx).await?.map_err(|e| anyhow!("GetDeviceProperties failed: {}", e))?;
        let stored = properties.properties.get_bool(props::ALLOW_ROAMING)?;
        if stored != Some(allow_roaming) {
            bail!(
                "{} is {:?}, expected {}",
                props::ALLOW_ROAMING,
                stored,
                allow_roaming
            );
        }
        info!("{} = {}", props::ALLOW_ROAMING, allow_roaming);
    }

    for path in [CELLULAR_DEVICE, UNKNOWN_DEVICE] {
        let check: fn(&str, RequestResult<()>) -> Result<()> = if path == CELLULAR_DEVICE {
            expect_success
        } else {
            expect_not_found
        };

        let (continuation, rx) = reply::<()>();
        dispatcher.set_carrier(path, "carrier", continuation);
        check("SetCarrier", wait(rx).await?)?;

        let (continuation, rx) = reply::<()>();
        dispatcher.require_pin(path, true, "1234", continuation);
        check("RequirePin", wait(rx).await?)?;

        let (continuation, rx) = reply::<()>();
        dispatcher.enter_pin(path, "1234", continuation);
        check("EnterPin", wait(rx).await?)?;

        let (continuation, rx) = reply::<()>();
        dispatcher.unblock_pin(path, "12345678", "1234", continuation);
        check("UnblockPin", wait(rx).await?)?;

        let (continuation, rx) = reply::<()>();
        dispatcher.change_pin(path, "4321", "1234", continuation);
        check("ChangePin", wait(rx).await?)?;
    }

    let (continuation, rx) = reply::<()>();
    dispatcher.set_device_property(UNKNOWN_DEVICE, props::ALLOW_ROAMING, true.into(), continuation)?;
    expect_not_found("SetDeviceProperty", wait(rx).await?)?;

    if dispatcher.pending_count() != 0 {
        bail!("{} requests still pending", dispatcher.pending_count());
    }
    Ok(())
}
