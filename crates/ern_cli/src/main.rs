//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `ern_core` linkage outside a device host.
//! - Boot a container on the headless runtime and print a bundle round trip.
//!
//! Environment:
//! - `ERN_CONTAINER_CONFIG`: optional path to a JSON container config.
//! - `ERN_LOG_DIR` / `ERN_LOG_LEVEL`: enable file logging when the dir is set.

use ern_core::container::headless::{HeadlessHostApplication, HeadlessRuntimeFactory};
use ern_core::{
    default_log_level, init_logging, ContainerConfig, ContainerHost, LatLong, Parcelable,
    PluginRegistry,
};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("ern_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    if let Some(log_dir) = env_value("ERN_LOG_DIR") {
        let level = env_value("ERN_LOG_LEVEL").unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, &log_dir).map_err(|err| err.to_string())?;
    }

    let config = match env_value("ERN_CONTAINER_CONFIG") {
        Some(path) => ContainerConfig::load_from_path(path).map_err(|err| err.to_string())?,
        None => ContainerConfig::new(),
    };

    let factory = Arc::new(HeadlessRuntimeFactory::new());
    let container = ContainerHost::global()
        .initialize(
            Arc::new(HeadlessHostApplication::new("ern_cli")),
            config,
            PluginRegistry::new(),
            factory.clone(),
        )
        .map_err(|err| err.to_string())?;
    let context_ready = factory
        .last_manager()
        .and_then(|manager| manager.wait_until_ready())
        .is_some();

    println!("ern_core version={}", ern_core::core_version());
    println!("container config={}", container.config());
    println!("container packages={}", container.packages().join(","));
    println!("runtime context_ready={context_ready}");

    let location = LatLong::builder(42).lon(-71).build();
    let bytes = location.to_parcel_bytes().map_err(|err| err.to_string())?;
    let restored = LatLong::from_bundle(Some(&location.to_bundle()))
        .ok_or_else(|| "latLong bundle round trip lost the value".to_string())?;
    println!(
        "latLong parcel_bytes={} lat={} lon={:?}",
        bytes.len(),
        restored.lat(),
        restored.lon()
    );
    log::info!(
        "event=cli_smoke module=cli status=ok context_ready={}",
        context_ready
    );
    Ok(())
}

fn env_value(name: &str) -> Option<String> {
    let raw = std::env::var(name).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
