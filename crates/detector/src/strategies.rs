//! Spread detection strategies

use arb_core::{
    round_percent, spread_percent, ComparisonRecord, DetectionConfig, Exchange, PriceSnapshot,
};

/// Strategy trait for per-symbol comparisons
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Compare one symbol across both snapshots. `None` unless both list it.
    fn compare(
        &self,
        symbol: &str,
        binance: &PriceSnapshot,
        gateio: &PriceSnapshot,
    ) -> Option<ComparisonRecord>;
}

/// Buy on the cheaper exchange, sell on the more expensive one
#[derive(Debug, Clone)]
pub struct CrossExchangeSpread {
    threshold_pct: f64,
}

impl CrossExchangeSpread {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            threshold_pct: config.opportunity_threshold_pct,
        }
    }

    /// Build the record for a symbol quoted on both exchanges
    pub fn evaluate(&self, symbol: &str, binance_price: f64, gateio_price: f64) -> ComparisonRecord {
        let spread_pct = round_percent(spread_percent(binance_price, gateio_price));

        // Ties go to Gate.io as the cheap side
        let (cheap_exchange, expensive_exchange) = if binance_price < gateio_price {
            (Exchange::Binance, Exchange::GateIo)
        } else {
            (Exchange::GateIo, Exchange::Binance)
        };

        ComparisonRecord {
            symbol: symbol.to_string(),
            binance_price,
            gateio_price,
            spread_pct,
            cheap_exchange,
            expensive_exchange,
            is_opportunity: spread_pct > self.threshold_pct,
        }
    }
}

impl Default for CrossExchangeSpread {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}

impl Strategy for CrossExchangeSpread {
    fn name(&self) -> &'static str {
        "cross_exchange_spread"
    }

    fn compare(
        &self,
        symbol: &str,
        binance: &PriceSnapshot,
        gateio: &PriceSnapshot,
    ) -> Option<ComparisonRecord> {
        let binance_price = binance.get(symbol)?;
        let gateio_price = gateio.get(symbol)?;
        Some(self.evaluate(symbol, binance_price, gateio_price))
    }
}
