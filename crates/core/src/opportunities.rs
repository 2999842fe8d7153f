//! Comparison records and ranked spread results

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::Exchange;

/// One symbol's joined view across both exchanges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub symbol: String,
    #[serde(rename = "binance_fiyat")]
    pub binance_price: f64,
    #[serde(rename = "gateio_fiyat")]
    pub gateio_price: f64,
    /// Spread in percent, rounded to two decimals
    #[serde(rename = "fark_yuzde")]
    pub spread_pct: f64,
    #[serde(rename = "ucuz_borsa")]
    pub cheap_exchange: Exchange,
    #[serde(rename = "pahali_borsa")]
    pub expensive_exchange: Exchange,
    #[serde(rename = "arbitraj_firsati")]
    pub is_opportunity: bool,
}

impl ComparisonRecord {
    pub fn price_on(&self, exchange: Exchange) -> f64 {
        match exchange {
            Exchange::Binance => self.binance_price,
            Exchange::GateIo => self.gateio_price,
        }
    }

    /// Flattened form served by the legacy single-symbol endpoint
    pub fn to_legacy(&self) -> LegacyQuote {
        LegacyQuote {
            binance_price: self.binance_price,
            gateio_price: self.gateio_price,
            spread_pct: self.spread_pct,
            cheap_exchange: self.cheap_exchange,
            expensive_exchange: self.expensive_exchange,
            is_opportunity: self.is_opportunity,
        }
    }
}

/// Legacy flattened quote (no symbol field)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyQuote {
    #[serde(rename = "binance_fiyat")]
    pub binance_price: f64,
    #[serde(rename = "gateio_fiyat")]
    pub gateio_price: f64,
    #[serde(rename = "fark_yuzde")]
    pub spread_pct: f64,
    #[serde(rename = "ucuz_borsa")]
    pub cheap_exchange: Exchange,
    #[serde(rename = "pahali_borsa")]
    pub expensive_exchange: Exchange,
    #[serde(rename = "arbitraj_firsati")]
    pub is_opportunity: bool,
}

/// Ranked comparison snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    #[serde(rename = "firsatlar")]
    pub opportunities: Vec<ComparisonRecord>,
    #[serde(rename = "tum_coinler")]
    pub all: Vec<ComparisonRecord>,
    /// Local time of day, `HH:MM:SS`. Display only.
    #[serde(rename = "guncelleme_zamani")]
    pub updated_at: String,
}

impl AggregateResult {
    /// Rank records by spread (descending, stable) and split out opportunities.
    pub fn from_records(mut records: Vec<ComparisonRecord>, updated_at: impl Into<String>) -> Self {
        records.sort_by(|a, b| by_spread_desc(a, b));

        let opportunities = records
            .iter()
            .filter(|r| r.is_opportunity)
            .cloned()
            .collect();

        Self {
            opportunities,
            all: records,
            updated_at: updated_at.into(),
        }
    }

    pub fn find(&self, symbol: &str) -> Option<&ComparisonRecord> {
        self.all.iter().find(|r| r.symbol == symbol)
    }

    pub fn opportunity_count(&self) -> usize {
        self.opportunities.len()
    }

    /// Widest spread currently observed
    pub fn best(&self) -> Option<&ComparisonRecord> {
        self.all.first()
    }
}

fn by_spread_desc(a: &ComparisonRecord, b: &ComparisonRecord) -> Ordering {
    b.spread_pct.total_cmp(&a.spread_pct)
}

/// Percentage gap between two prices relative to their mean.
///
/// Zero when either side is zero; the result is symmetric in its arguments.
pub fn spread_percent(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        return 0.0;
    }
    let diff = (a - b).abs();
    let avg = (a + b) / 2.0;
    diff / avg * 100.0
}

/// Round to two decimal places
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(symbol: &str, spread_pct: f64, is_opportunity: bool) -> ComparisonRecord {
        ComparisonRecord {
            symbol: symbol.to_string(),
            binance_price: 1.0,
            gateio_price: 1.0,
            spread_pct,
            cheap_exchange: Exchange::GateIo,
            expensive_exchange: Exchange::Binance,
            is_opportunity,
        }
    }

    #[test]
    fn test_spread_example() {
        let spread = round_percent(spread_percent(50_000.0, 50_200.0));
        assert_eq!(spread, 0.40);
    }

    #[test]
    fn test_spread_zero_guard() {
        assert_eq!(spread_percent(0.0, 10.0), 0.0);
        assert_eq!(spread_percent(10.0, 0.0), 0.0);
        assert_eq!(spread_percent(3_000.0, 3_000.0), 0.0);
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(0.2996), 0.30);
        assert_eq!(round_percent(0.30952), 0.31);
        assert_eq!(round_percent(0.0), 0.0);
    }

    #[test]
    fn test_ranking_and_opportunity_subsequence() {
        let result = AggregateResult::from_records(
            vec![
                record("ETH", 0.10, false),
                record("SOL", 0.90, true),
                record("BTC", 0.45, true),
                record("XRP", 0.45, true),
                record("ADA", 0.00, false),
            ],
            "12:00:00",
        );

        let all: Vec<&str> = result.all.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(all, vec!["SOL", "BTC", "XRP", "ETH", "ADA"], "stable on ties");

        let opps: Vec<&str> = result.opportunities.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(opps, vec!["SOL", "BTC", "XRP"]);
        assert!(result.opportunities.iter().all(|r| r.is_opportunity));
        assert_eq!(result.best().map(|r| r.symbol.as_str()), Some("SOL"));
    }

    #[test]
    fn test_wire_format() {
        let result = AggregateResult::from_records(vec![record("BTC", 0.4, true)], "09:30:15");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["guncelleme_zamani"], "09:30:15");
        assert_eq!(json["firsatlar"][0]["symbol"], "BTC");
        assert_eq!(json["tum_coinler"][0]["fark_yuzde"], 0.4);
        assert_eq!(json["tum_coinler"][0]["ucuz_borsa"], "Gate.io");
        assert_eq!(json["tum_coinler"][0]["arbitraj_firsati"], true);

        let legacy = serde_json::to_value(result.all[0].to_legacy()).unwrap();
        assert!(legacy.get("symbol").is_none());
        assert_eq!(legacy["pahali_borsa"], "Binance");
    }

    #[test]
    fn test_empty_records_serialize_as_arrays() {
        let result = AggregateResult::from_records(vec![], "00:00:00");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["firsatlar"].as_array().unwrap().is_empty());
        assert!(json["tum_coinler"].as_array().unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_spread_symmetric_and_non_negative(a in 0.0f64..1e7, b in 0.0f64..1e7) {
            let ab = spread_percent(a, b);
            let ba = spread_percent(b, a);
            prop_assert_eq!(ab, ba);
            prop_assert!(ab >= 0.0);
            prop_assert_eq!(round_percent(ab), round_percent(ba));
        }

        #[test]
        fn prop_equal_prices_have_zero_spread(p in 0.0f64..1e7) {
            prop_assert_eq!(spread_percent(p, p), 0.0);
        }
    }
}
