//! Arbitrage monitor - cross-exchange spread API
//!
//! Main entry point for the HTTP server

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use arb_core::{MonitorConfig, SystemClock, Watchlist};
use arb_detector::{ArbitrageScanner, ScanCache, ScannerConfig};
use arb_http_server::{AppState, HttpServerBuilder, ServerConfig};
use arb_price_feed::PriceAggregator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting arbitrage monitor v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let server_config = ServerConfig::from_env()?;
    let monitor_config = MonitorConfig::default();

    // Build the pipeline
    let clock = Arc::new(SystemClock);
    let aggregator = PriceAggregator::from_config(&monitor_config.feeds)?;
    let scanner = ArbitrageScanner::new(
        aggregator,
        ScannerConfig {
            watchlist: Watchlist::default(),
            detection: monitor_config.detection.clone(),
        },
        clock.clone(),
    );
    let scanner_stats = scanner.stats();
    info!(
        "Tracking {} symbols with {} (threshold {}%)",
        scanner_stats.watchlist_len,
        scanner_stats.strategy,
        monitor_config.detection.opportunity_threshold_pct
    );

    let cache = ScanCache::new(scanner, clock, &monitor_config.cache);

    // Warm the cache so the first request is served from memory
    let warmup = cache.clone();
    tokio::spawn(async move {
        match warmup.get().await {
            Ok(result) => info!(
                "Initial scan: {} symbols, {} opportunities",
                result.all.len(),
                result.opportunity_count()
            ),
            Err(e) => warn!("Initial scan failed: {}", e),
        }
    });

    let server = HttpServerBuilder::new(AppState::new(cache.clone()))
        .config(server_config)
        .build();

    // Setup shutdown channel
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    // Spawn shutdown signal handler
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    error!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received Ctrl+C");
            }
            _ = terminate => {
                info!("Received termination signal");
            }
        }

        let _ = shutdown_tx.send(());
    });

    // Start server
    info!("HTTP server listening on {}", server.address());
    info!("Press Ctrl+C to shutdown");

    if let Err(e) = server.start_with_shutdown(shutdown_rx).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    let stats = cache.stats();
    let last_update = cache
        .peek()
        .map(|entry| entry.result.updated_at.clone())
        .unwrap_or_else(|| "never".to_string());
    info!(
        "Cache: {} hits, {} refreshes, {} failures, last update {}",
        stats.hits, stats.refreshes, stats.failures, last_update
    );

    info!("Server shutdown complete");
    Ok(())
}
