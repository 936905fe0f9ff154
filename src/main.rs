//! Landmark trigger service
//!
//! Correlates geofence transition events with cached activity-recognition
//! snapshots and launches the matching landmark action at most once per
//! qualifying entry event.
//!
//! Module structure:
//! - `domain/` - core types (transitions, activity, predicates, catalog)
//! - `io/` - external interfaces (event source, settings store, launcher)
//! - `services/` - business logic (engine, matcher, dispatcher, worker)
//! - `infra/` - infrastructure (config, metrics)

use clap::Parser;
use landmark_trigger::infra::{Config, Metrics};
use landmark_trigger::io::{start_stdin_source, AppLauncher, FileSettings};
use landmark_trigger::services::{create_trigger_worker, CorrelationEngine, DispatchSink};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Landmark trigger - location/activity correlated action dispatch
#[derive(Parser, Debug)]
#[command(name = "landmark-trigger", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for full event visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!("landmark-trigger starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        site = %config.site_id(),
        settings_file = %config.settings_file(),
        snapshot_key = %config.snapshot_key(),
        queue_capacity = %config.queue_capacity(),
        "config_loaded"
    );

    // Create shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Shared components
    let metrics = Arc::new(Metrics::new());
    let settings = Arc::new(FileSettings::open(config.settings_file())?);

    let engine = CorrelationEngine::new(
        settings.clone(),
        settings,
        config.snapshot_key(),
        metrics.clone(),
    );
    let launcher = Arc::new(AppLauncher::new(&config));
    let sink = DispatchSink::new(launcher, metrics.clone());

    let (delivery_tx, worker) =
        create_trigger_worker(engine, sink, metrics.clone(), config.queue_capacity());

    // Start the stdin event source
    let source_metrics = metrics.clone();
    let source_shutdown = shutdown_rx.clone();
    tokio::spawn(async move {
        if let Err(e) = start_stdin_source(delivery_tx, source_metrics, source_shutdown).await {
            tracing::error!(error = %e, "event source error");
        }
    });

    // Start metrics reporter
    let metrics_clone = metrics.clone();
    let metrics_interval = config.metrics_interval_secs();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(metrics_interval));
        loop {
            interval.tick().await;
            metrics_clone.report().log();
        }
    });

    // Handle shutdown on Ctrl+C
    let shutdown_signal = shutdown_tx;
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_signal.send(true);
    });

    // Run worker - consumes deliveries until channel closes or shutdown
    worker.run(shutdown_rx).await;

    info!("landmark-trigger shutdown complete");
    Ok(())
}
