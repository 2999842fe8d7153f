//! Time-windowed result cache
//!
//! Requests inside the freshness window share the last ranked result. Expired
//! requests trigger one scan at a time; a failed scan leaves the previous
//! entry in place.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use arb_core::{AggregateResult, CacheConfig, Clock, PriceFeedError, PriceFeedResult};

use crate::scanner::ArbitrageScanner;

/// Last successful result and when it was produced
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub result: Arc<AggregateResult>,
    pub fetched_at: Instant,
}

struct CacheInner {
    scanner: ArbitrageScanner,
    clock: Arc<dyn Clock>,
    window: Duration,
    entry: RwLock<Option<CacheEntry>>,
    refresh_lock: tokio::sync::Mutex<()>,
    hits: AtomicU64,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

/// Shared handle to the scan cache
#[derive(Clone)]
pub struct ScanCache {
    inner: Arc<CacheInner>,
}

impl ScanCache {
    pub fn new(scanner: ArbitrageScanner, clock: Arc<dyn Clock>, config: &CacheConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                scanner,
                clock,
                window: config.freshness_window(),
                entry: RwLock::new(None),
                refresh_lock: tokio::sync::Mutex::new(()),
                hits: AtomicU64::new(0),
                refreshes: AtomicU64::new(0),
                failures: AtomicU64::new(0),
            }),
        }
    }

    /// Latest result, scanning first if the cached one is missing or expired.
    ///
    /// The scan runs on its own task: dropping this future does not cancel
    /// the upstream calls, and their result still lands in the cache.
    pub async fn get(&self) -> PriceFeedResult<Arc<AggregateResult>> {
        if let Some(result) = self.inner.fresh() {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Serving cached scan from {}", result.updated_at);
            return Ok(result);
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.refresh().await })
            .await
            .map_err(|e| PriceFeedError::TaskFailed(e.to_string()))?
    }

    /// Current entry regardless of age
    pub fn peek(&self) -> Option<CacheEntry> {
        self.inner.entry.read().clone()
    }

    pub fn scanner(&self) -> &ArbitrageScanner {
        &self.inner.scanner
    }

    pub fn stats(&self) -> CacheStats {
        let entry_age = self
            .inner
            .entry
            .read()
            .as_ref()
            .map(|e| self.inner.clock.now().saturating_duration_since(e.fetched_at));

        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            refreshes: self.inner.refreshes.load(Ordering::Relaxed),
            failures: self.inner.failures.load(Ordering::Relaxed),
            entry_age,
        }
    }
}

impl CacheInner {
    fn fresh(&self) -> Option<Arc<AggregateResult>> {
        let entry = self.entry.read();
        let entry = entry.as_ref()?;
        let age = self.clock.now().saturating_duration_since(entry.fetched_at);
        (age < self.window).then(|| Arc::clone(&entry.result))
    }

    async fn refresh(&self) -> PriceFeedResult<Arc<AggregateResult>> {
        let _guard = self.refresh_lock.lock().await;

        // Another request may have refreshed while we waited
        if let Some(result) = self.fresh() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(result);
        }

        match self.scanner.scan().await {
            Ok(result) => {
                let result = Arc::new(result);
                *self.entry.write() = Some(CacheEntry {
                    result: Arc::clone(&result),
                    fetched_at: self.clock.now(),
                });
                self.refreshes.fetch_add(1, Ordering::Relaxed);
                Ok(result)
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                if self.entry.read().is_some() {
                    warn!("Price refresh failed, keeping previous snapshot: {}", e);
                } else {
                    warn!("Price refresh failed, no snapshot cached yet: {}", e);
                }
                Err(e)
            }
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub refreshes: u64,
    pub failures: u64,
    pub entry_age: Option<Duration>,
}
