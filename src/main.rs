//! # Road Risk Live
//!
//! Forward the latest road sensor reading and its risk score to a realtime
//! database.
//!
//! # Control Flow
//!
//! 1. **Initialization**
//!    - Load `config/default.toml` if present, otherwise built-in defaults
//!    - Set up logging with tracing subscriber
//!    - Build the HTTP publisher for the configured remote record
//!
//! 2. **Main Loop**
//!    - Every poll interval, read the last row of the sensor log
//!    - Score it and `PUT` the record to the remote
//!    - Log skipped ticks and failed publishes, never exit on them
//!
//! 3. **Graceful Shutdown**
//!    - Ctrl+C stops the loop after the tick in progress
//!    - Log final tick counters
//!
//! Expected output:
//! ```text
//! INFO road_risk_live: Road Risk Live v0.1.0 starting...
//! INFO road_risk_live::poller: Starting poll loop. Reading: live_sensor.csv every 1s
//! INFO road_risk_live::poller: Pushed: {"lat":12.97,"lon":77.59,"acc":6.2,...}
//! ```

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{info, warn};

use road_risk_live::config::{Config, DEFAULT_CONFIG_PATH};
use road_risk_live::logging;
use road_risk_live::poller::Poller;
use road_risk_live::publish::RestPublisher;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_or_default(DEFAULT_CONFIG_PATH)
        .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_PATH))?;

    // Keep the guard alive so file logs are flushed on exit
    let _log_guard = logging::init(&config.logging);

    info!("Road Risk Live v{} starting...", env!("CARGO_PKG_VERSION"));

    let publisher = RestPublisher::new(&config.remote).context("Failed to create HTTP client")?;
    info!("Publishing to {}", publisher.url());

    let mut poller = Poller::new(
        config.sensor.path.clone(),
        config.risk.visibility,
        config.sensor.poll_interval(),
        publisher,
    )
    .with_status_interval(config.logging.status_interval_ticks);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, shutting down...");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                // Without a signal handler, only process termination stops the loop
                warn!("Unable to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });

    info!("Press Ctrl+C to exit");
    poller.run(shutdown_rx).await;

    Ok(())
}
