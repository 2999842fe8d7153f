//! Cross-exchange spread detection
//!
//! Features:
//! - Watch-list join of two exchange snapshots
//! - Deterministic spread ranking
//! - Time-windowed result cache with single-flight refresh

pub mod cache;
pub mod scanner;
pub mod strategies;

pub use cache::{CacheEntry, CacheStats, ScanCache};
pub use scanner::{ArbitrageScanner, ScannerConfig};
pub use strategies::{CrossExchangeSpread, Strategy};
