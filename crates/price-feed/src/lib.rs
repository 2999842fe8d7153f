//! Exchange price feeds
//!
//! Features:
//! - REST ticker fetchers for Binance and Gate.io
//! - Per-exchange symbol normalization
//! - Concurrent fan-out with fixed error priority

pub mod aggregator;
pub mod feeds;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use aggregator::{ExchangePrices, PriceAggregator};
pub use feeds::{build_http_client, BinanceFeed, GateIoFeed, PriceSource};
