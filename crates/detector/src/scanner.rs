//! Main spread scanner

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use arb_core::{
    time_of_day, AggregateResult, Clock, DetectionConfig, PriceFeedResult, PriceSnapshot,
    Watchlist,
};
use arb_price_feed::PriceAggregator;

use crate::strategies::{CrossExchangeSpread, Strategy};

/// Scanner configuration
#[derive(Debug, Clone, Default)]
pub struct ScannerConfig {
    pub watchlist: Watchlist,
    pub detection: DetectionConfig,
}

/// Fetches both exchanges and ranks the watch-list by spread
pub struct ArbitrageScanner {
    aggregator: PriceAggregator,
    watchlist: Watchlist,
    strategy: Box<dyn Strategy>,
    clock: Arc<dyn Clock>,
}

impl ArbitrageScanner {
    pub fn new(aggregator: PriceAggregator, config: ScannerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            aggregator,
            strategy: Box::new(CrossExchangeSpread::new(&config.detection)),
            watchlist: config.watchlist,
            clock,
        }
    }

    /// One full round: fetch both exchanges, join, rank
    pub async fn scan(&self) -> PriceFeedResult<AggregateResult> {
        let start = Instant::now();
        let prices = self.aggregator.fetch_all().await?;
        let result = self.compare(&prices.binance, &prices.gateio);

        info!(
            "Scan complete: {}/{} symbols on both exchanges, {} opportunities, fetch {:?}, total {:?}",
            result.all.len(),
            self.watchlist.len(),
            result.opportunity_count(),
            prices.fetch_time,
            start.elapsed()
        );

        if let Some(best) = result.best() {
            debug!(
                "Widest spread: {} {:.2}% (buy {} at {} / sell {} at {})",
                best.symbol,
                best.spread_pct,
                best.cheap_exchange,
                best.price_on(best.cheap_exchange),
                best.expensive_exchange,
                best.price_on(best.expensive_exchange)
            );
        }

        Ok(result)
    }

    /// Join two snapshots over the watch-list and rank the result
    pub fn compare(&self, binance: &PriceSnapshot, gateio: &PriceSnapshot) -> AggregateResult {
        let records = self
            .watchlist
            .iter()
            .filter_map(|symbol| self.strategy.compare(symbol, binance, gateio))
            .collect();

        AggregateResult::from_records(records, time_of_day(&self.clock.wall_time()))
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn stats(&self) -> ScannerStats {
        ScannerStats {
            watchlist_len: self.watchlist.len(),
            strategy: self.strategy.name(),
        }
    }
}

/// Scanner statistics
#[derive(Debug, Clone)]
pub struct ScannerStats {
    pub watchlist_len: usize,
    pub strategy: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use arb_core::{Exchange, ManualClock, PriceFeedError};
    use arb_price_feed::mock::{timeout_error, MockSource};

    fn scanner(binance: MockSource, gateio: MockSource, symbols: &[&str]) -> ArbitrageScanner {
        let aggregator = PriceAggregator::new(Arc::new(binance), Arc::new(gateio));
        let config = ScannerConfig {
            watchlist: Watchlist::new(symbols),
            ..Default::default()
        };
        ArbitrageScanner::new(aggregator, config, Arc::new(ManualClock::new()))
    }

    #[tokio::test]
    async fn test_btc_eth_example() {
        let scanner = scanner(
            MockSource::with_prices(Exchange::Binance, &[("BTC", 50_000.0), ("ETH", 3_000.0)]),
            MockSource::with_prices(Exchange::GateIo, &[("BTC", 50_200.0), ("ETH", 3_000.0)]),
            &["BTC", "ETH"],
        );

        let result = scanner.scan().await.unwrap();

        let all: Vec<&str> = result.all.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(all, vec!["BTC", "ETH"]);

        let btc = &result.all[0];
        assert_eq!(btc.spread_pct, 0.40);
        assert!(btc.is_opportunity);
        assert_eq!(btc.cheap_exchange, Exchange::Binance);

        let eth = &result.all[1];
        assert_eq!(eth.spread_pct, 0.0);
        assert!(!eth.is_opportunity);

        assert_eq!(result.opportunities.len(), 1);
        assert_eq!(result.opportunities[0].symbol, "BTC");
        assert_eq!(result.updated_at.len(), 8);
    }

    #[tokio::test]
    async fn test_partial_listings_are_dropped() {
        let scanner = scanner(
            MockSource::with_prices(
                Exchange::Binance,
                &[("BTC", 100.0), ("ETH", 10.0), ("DOGE", 0.1), ("PEPE", 1.0)],
            ),
            MockSource::with_prices(Exchange::GateIo, &[("BTC", 101.0), ("SOL", 20.0), ("PEPE", 1.0)]),
            &["BTC", "ETH", "SOL", "DOGE", "XRP"],
        );

        let result = scanner.scan().await.unwrap();

        // PEPE is listed on both but not tracked
        let all: Vec<&str> = result.all.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(all, vec!["BTC"]);
    }

    #[tokio::test]
    async fn test_gateio_timeout_fails_scan() {
        let scanner = scanner(
            MockSource::with_prices(Exchange::Binance, &[("BTC", 50_000.0)]),
            MockSource::failing(Exchange::GateIo, timeout_error(Exchange::GateIo)),
            &["BTC"],
        );

        let err = scanner.scan().await.unwrap_err();
        assert!(matches!(
            err,
            PriceFeedError::ConnectionFailed { exchange: Exchange::GateIo, .. }
        ));
    }

    #[test]
    fn test_lists_sorted_descending() {
        let scanner = scanner(
            MockSource::with_prices(Exchange::Binance, &[]),
            MockSource::with_prices(Exchange::GateIo, &[]),
            &["A", "B", "C", "D"],
        );
        let binance = PriceSnapshot::from_prices(
            Exchange::Binance,
            [("A", 100.0), ("B", 100.0), ("C", 100.0), ("D", 100.0)],
        );
        let gateio = PriceSnapshot::from_prices(
            Exchange::GateIo,
            [("A", 100.1), ("B", 102.0), ("C", 100.5), ("D", 99.0)],
        );

        let result = scanner.compare(&binance, &gateio);

        let spreads: Vec<f64> = result.all.iter().map(|r| r.spread_pct).collect();
        assert!(spreads.windows(2).all(|w| w[0] >= w[1]));

        let opps: Vec<&str> = result.opportunities.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(opps, vec!["B", "D", "C"]);
        assert_eq!(scanner.stats().watchlist_len, 4);
    }

    #[test]
    fn test_invalid_prices_never_reach_ranking() {
        let scanner = scanner(
            MockSource::with_prices(Exchange::Binance, &[]),
            MockSource::with_prices(Exchange::GateIo, &[]),
            &["BTC", "ETH"],
        );
        let binance =
            PriceSnapshot::from_prices(Exchange::Binance, [("BTC", 100.0), ("ETH", f64::NAN)]);
        let gateio = PriceSnapshot::from_prices(Exchange::GateIo, [("BTC", 101.0), ("ETH", -5.0)]);

        let result = scanner.compare(&binance, &gateio);

        assert_eq!(result.all.len(), 1);
        assert_eq!(result.all[0].symbol, "BTC");
        assert!(result.all[0].spread_pct.is_finite());
        assert_eq!(result.opportunities.len(), 1);
    }
}
