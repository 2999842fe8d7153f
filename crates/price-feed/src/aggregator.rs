//! Price feed aggregator - fetches both exchanges concurrently

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use arb_core::{FeedConfig, PriceFeedResult, PriceSnapshot};

use crate::feeds::{build_http_client, BinanceFeed, GateIoFeed, PriceSource};

/// Snapshots from both exchanges taken in the same round
#[derive(Debug, Clone)]
pub struct ExchangePrices {
    pub binance: PriceSnapshot,
    pub gateio: PriceSnapshot,
    pub fetch_time: Duration,
}

/// Fans out to both exchange feeds and waits for both
pub struct PriceAggregator {
    binance: Arc<dyn PriceSource>,
    gateio: Arc<dyn PriceSource>,
}

impl PriceAggregator {
    pub fn new(binance: Arc<dyn PriceSource>, gateio: Arc<dyn PriceSource>) -> Self {
        Self { binance, gateio }
    }

    /// Live REST feeds sharing one HTTP client
    pub fn from_config(config: &FeedConfig) -> reqwest::Result<Self> {
        let http = build_http_client(config)?;
        let binance = BinanceFeed::from_config(http.clone(), config);
        let gateio = GateIoFeed::from_config(http, config);

        info!(
            "Price feeds: {} and {} (timeout {:?})",
            binance.url(),
            gateio.url(),
            config.request_timeout()
        );

        Ok(Self::new(Arc::new(binance), Arc::new(gateio)))
    }

    /// Fetch both exchanges in parallel.
    ///
    /// Fails if either feed fails. When both fail, Binance's error wins.
    pub async fn fetch_all(&self) -> PriceFeedResult<ExchangePrices> {
        let start = Instant::now();

        let (binance, gateio) = tokio::join!(self.binance.fetch_prices(), self.gateio.fetch_prices());

        let binance = binance?;
        let gateio = gateio?;
        let fetch_time = start.elapsed();

        debug!(
            "Fetched {} {} and {} {} prices in {:?}",
            binance.len(),
            self.binance.exchange(),
            gateio.len(),
            self.gateio.exchange(),
            fetch_time
        );

        Ok(ExchangePrices {
            binance,
            gateio,
            fetch_time,
        })
    }
}
