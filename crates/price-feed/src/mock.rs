//! In-memory price sources for tests

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arb_core::{Exchange, PriceFeedError, PriceFeedResult, PriceSnapshot};

use crate::feeds::PriceSource;

#[derive(Debug, Clone)]
enum Reply {
    Prices(Vec<(String, f64)>),
    Fail(PriceFeedError),
}

/// Scripted source: returns the configured prices or error, after an optional delay
#[derive(Debug)]
pub struct MockSource {
    exchange: Exchange,
    reply: Mutex<Reply>,
    delay: Mutex<Duration>,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn with_prices(exchange: Exchange, prices: &[(&str, f64)]) -> Self {
        Self {
            exchange,
            reply: Mutex::new(Reply::Prices(to_owned(prices))),
            delay: Mutex::new(Duration::ZERO),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(exchange: Exchange, error: PriceFeedError) -> Self {
        let source = Self::with_prices(exchange, &[]);
        source.set_error(error);
        source
    }

    pub fn set_prices(&self, prices: &[(&str, f64)]) {
        *self.reply.lock() = Reply::Prices(to_owned(prices));
    }

    pub fn set_error(&self, error: PriceFeedError) {
        *self.reply.lock() = Reply::Fail(error);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = delay;
    }

    /// Number of fetches started so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn to_owned(prices: &[(&str, f64)]) -> Vec<(String, f64)> {
    prices.iter().map(|(s, p)| (s.to_string(), *p)).collect()
}

/// Error a timed-out upstream call would produce
pub fn timeout_error(exchange: Exchange) -> PriceFeedError {
    PriceFeedError::ConnectionFailed {
        exchange,
        reason: "request timed out".to_string(),
    }
}

#[async_trait::async_trait]
impl PriceSource for MockSource {
    fn exchange(&self) -> Exchange {
        self.exchange
    }

    async fn fetch_prices(&self) -> PriceFeedResult<PriceSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let reply = self.reply.lock().clone();
        match reply {
            Reply::Prices(prices) => Ok(PriceSnapshot::from_prices(self.exchange, prices)),
            Reply::Fail(error) => Err(error),
        }
    }
}
