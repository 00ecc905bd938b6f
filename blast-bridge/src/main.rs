//! Blastbridge Daemon
//!
//! Bridges an MQTT command topic to IR/RF blaster devices: messages of the
//! form `{"host": ..., "command": ..., "action": ...}` arrive on the bus
//! and are replayed, recorded or expanded into macros by the engine in
//! `blast-core`.
//!
//! The device fleet is configured in `blastbridge.json` and currently runs
//! on the simulated transport from `blast-sim`; hardware backends plug in
//! through the `Discovery`/`Blaster` traits in `blast-device`.

mod config;
mod mqtt;

use std::path::PathBuf;
use std::process::ExitCode;

use blast_core::{run_dispatch_loop, CommandRouter, DeviceRegistry, SignalStore};
use blast_sim::SimDiscovery;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::BridgeConfig;

fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BLASTBRIDGE_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("blastbridge.json"))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "blastbridge=info,blast_core=info,blast_device=info,blast_sim=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting blastbridge");

    let path = config_path();
    let config = match BridgeConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::from(2);
        }
    };

    info!("scanning for blaster devices");
    let discovery = SimDiscovery::from_configs(config.devices.clone());
    let registry = match DeviceRegistry::discover(&config.device_hosts(), &discovery).await {
        Ok(registry) => registry,
        Err(err) => {
            error!("device discovery failed: {}", err);
            return ExitCode::from(2);
        }
    };

    if registry.is_empty() {
        warn!("no devices found, exiting");
        return ExitCode::from(2);
    }
    info!("{} device(s) registered", registry.len());

    let store = SignalStore::new(&config.data_dir);
    let router = CommandRouter::new(registry, store);

    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(run_dispatch_loop(rx, router));

    mqtt::run_bus_loop(config.mqtt, tx).await;
    ExitCode::SUCCESS
}
