//! Core type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Supported centralized exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    #[serde(rename = "Binance")]
    Binance,
    #[serde(rename = "Gate.io")]
    GateIo,
}

impl Exchange {
    pub fn name(&self) -> &'static str {
        match self {
            Exchange::Binance => "Binance",
            Exchange::GateIo => "Gate.io",
        }
    }

    /// Quote-currency suffix used by the exchange's spot pair encoding
    pub fn usdt_suffix(&self) -> &'static str {
        match self {
            Exchange::Binance => "USDT",
            Exchange::GateIo => "_USDT",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Symbol -> last price map from a single exchange fetch
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub exchange: Exchange,
    prices: HashMap<String, f64>,
}

impl PriceSnapshot {
    pub fn new(exchange: Exchange) -> Self {
        Self {
            exchange,
            prices: HashMap::new(),
        }
    }

    pub fn with_capacity(exchange: Exchange, capacity: usize) -> Self {
        Self {
            exchange,
            prices: HashMap::with_capacity(capacity),
        }
    }

    /// Build a snapshot from `(symbol, price)` pairs. Later duplicates win;
    /// invalid prices are dropped as in `insert`.
    pub fn from_prices<I, S>(exchange: Exchange, prices: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut snapshot = Self::new(exchange);
        for (symbol, price) in prices {
            snapshot.insert(symbol, price);
        }
        snapshot
    }

    /// Record a price. Non-finite and negative values are rejected.
    pub fn insert(&mut self, symbol: impl Into<String>, price: f64) -> bool {
        if !is_valid_price(price) {
            return false;
        }
        self.prices.insert(symbol.into(), price);
        true
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Prices must be finite and non-negative
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_wire_names() {
        assert_eq!(serde_json::to_string(&Exchange::Binance).unwrap(), "\"Binance\"");
        assert_eq!(serde_json::to_string(&Exchange::GateIo).unwrap(), "\"Gate.io\"");
        assert_eq!(Exchange::GateIo.to_string(), "Gate.io");
    }

    #[test]
    fn test_snapshot_rejects_invalid_prices() {
        let mut snapshot = PriceSnapshot::new(Exchange::Binance);

        assert!(snapshot.insert("BTC", 50_000.0));
        assert!(snapshot.insert("DEAD", 0.0));
        assert!(!snapshot.insert("NAN", f64::NAN));
        assert!(!snapshot.insert("INF", f64::INFINITY));
        assert!(!snapshot.insert("NEG", -1.0));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("BTC"), Some(50_000.0));
        assert_eq!(snapshot.get("NAN"), None);
    }

    #[test]
    fn test_from_prices_drops_invalid_prices() {
        let snapshot = PriceSnapshot::from_prices(
            Exchange::GateIo,
            [("BTC", 101.0), ("ETH", f64::NAN), ("SOL", -5.0), ("XRP", f64::NEG_INFINITY)],
        );

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("BTC"), Some(101.0));
        assert_eq!(snapshot.get("ETH"), None);
        assert_eq!(snapshot.get("SOL"), None);
    }
}
