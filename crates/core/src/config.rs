//! Configuration types
//!
//! Defaults carry the fixed operating constants. Nothing here is read from the
//! environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::Exchange;

pub const BINANCE_API_URL: &str = "https://api.binance.com";
pub const GATEIO_API_URL: &str = "https://api.gateio.ws";

/// Upstream REST endpoints and transport limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub binance_url: String,
    pub gateio_url: String,
    pub request_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            binance_url: BINANCE_API_URL.to_string(),
            gateio_url: GATEIO_API_URL.to_string(),
            request_timeout_ms: 15_000,
            user_agent: format!("arb-monitor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FeedConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn base_url(&self, exchange: Exchange) -> &str {
        match exchange {
            Exchange::Binance => &self.binance_url,
            Exchange::GateIo => &self.gateio_url,
        }
    }
}

/// Spread detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Rounded spread must be strictly above this to count as an opportunity
    pub opportunity_threshold_pct: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            opportunity_threshold_pct: 0.3,
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub freshness_window_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_window_ms: 3_000,
        }
    }
}

impl CacheConfig {
    pub fn freshness_window(&self) -> Duration {
        Duration::from_millis(self.freshness_window_ms)
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub feeds: FeedConfig,
    pub detection: DetectionConfig,
    pub cache: CacheConfig,
}
