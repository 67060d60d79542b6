//! # Relay Runtime
//!
//! The binary entry point for the message-exchange service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize tracing
//! 2. Load and validate configuration
//! 3. Build the endpoint registry
//! 4. Register the dispatch service and spawn its listening loop
//! 5. Run the demo client exchange ("123" → "124")
//! 6. Signal shutdown and join the service task

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use relay_bus::{EndpointRegistry, InProcessChannel};
use relay_client::ClientDriver;
use relay_service::{DispatchService, IncrementResponder};

use crate::config::RelayConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("===========================================");
    info!("  Relay Runtime v0.1.0");
    info!("===========================================");

    let config = RelayConfig::default();
    config.validate().context("Invalid configuration")?;

    // Shared infrastructure: the registry is the only shared mutable state.
    let registry = Arc::new(EndpointRegistry::with_capacity(config.registry.capacity));
    let channel = Arc::new(InProcessChannel::new(registry.clone()));

    // Register the service identity and spawn the listening loop.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let service = DispatchService::new(registry.clone(), Arc::new(IncrementResponder), shutdown_rx)
        .context("Failed to register dispatch service")?;
    let service_id = service.service_id();
    let service_task = tokio::spawn(service.run());

    info!(service = %service_id, capacity = registry.capacity(), "Service started");

    // Demo exchange: increment a decimal integer.
    let driver = ClientDriver::new(channel, service_id)
        .with_timeout(Duration::from_millis(config.client.request_timeout_ms));

    let response = driver
        .request(b"123".to_vec())
        .await
        .context("Demo request failed")?;
    info!(
        request = "123",
        response = %String::from_utf8_lossy(&response),
        "Exchange complete"
    );

    // A deliberately invalid request: the service answers with an error
    // frame instead of leaving the client hanging.
    match driver.request(b"abc".to_vec()).await {
        Ok(_) => warn!("Invalid request unexpectedly succeeded"),
        Err(err) => info!(request = "abc", error = %err, "Invalid request answered"),
    }

    info!(frames = registry.frames_sent(), "Shutting down");
    shutdown_tx
        .send(true)
        .context("Service task already stopped")?;
    service_task.await.context("Service task panicked")?;

    info!("Relay runtime stopped");
    Ok(())
}
