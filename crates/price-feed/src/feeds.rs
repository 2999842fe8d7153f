//! REST ticker feed implementations

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, trace};

use arb_core::{Exchange, FeedConfig, PriceFeedError, PriceFeedResult, PriceSnapshot};

pub const BINANCE_TICKER_PATH: &str = "/api/v3/ticker/price";
pub const GATEIO_TICKER_PATH: &str = "/api/v4/spot/tickers";

/// Source of a full price snapshot for one exchange
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    fn exchange(&self) -> Exchange;
    async fn fetch_prices(&self) -> PriceFeedResult<PriceSnapshot>;
}

/// Shared HTTP client with the configured request timeout
pub fn build_http_client(config: &FeedConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.as_str())
        .build()
}

/// Binance `/api/v3/ticker/price` entry
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceTicker {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub price: String,
}

/// Gate.io `/api/v4/spot/tickers` entry (other fields ignored)
#[derive(Debug, Clone, Deserialize)]
pub struct GateIoTicker {
    #[serde(default)]
    pub currency_pair: String,
    #[serde(default)]
    pub last: String,
}

/// `BTCUSDT` -> `BTC`
pub fn normalize_binance_symbol(symbol: &str) -> Option<&str> {
    strip_quote(symbol, Exchange::Binance.usdt_suffix())
}

/// `BTC_USDT` -> `BTC`
pub fn normalize_gateio_pair(pair: &str) -> Option<&str> {
    strip_quote(pair, Exchange::GateIo.usdt_suffix())
}

fn strip_quote<'a>(raw: &'a str, suffix: &str) -> Option<&'a str> {
    if raw.len() <= suffix.len() {
        return None;
    }
    raw.strip_suffix(suffix)
}

pub fn binance_snapshot(tickers: &[BinanceTicker]) -> PriceSnapshot {
    collect_snapshot(
        Exchange::Binance,
        tickers.iter().map(|t| (t.symbol.as_str(), t.price.as_str())),
        normalize_binance_symbol,
    )
}

pub fn gateio_snapshot(tickers: &[GateIoTicker]) -> PriceSnapshot {
    collect_snapshot(
        Exchange::GateIo,
        tickers.iter().map(|t| (t.currency_pair.as_str(), t.last.as_str())),
        normalize_gateio_pair,
    )
}

fn collect_snapshot<'a, I>(
    exchange: Exchange,
    entries: I,
    normalize: fn(&str) -> Option<&str>,
) -> PriceSnapshot
where
    I: ExactSizeIterator<Item = (&'a str, &'a str)>,
{
    let mut snapshot = PriceSnapshot::with_capacity(exchange, entries.len());

    for (raw, price) in entries {
        let Some(symbol) = normalize(raw) else {
            continue;
        };
        let inserted = price
            .trim()
            .parse::<f64>()
            .map(|value| snapshot.insert(symbol, value))
            .unwrap_or(false);

        if !inserted {
            trace!("Skipping {} {} with unusable price {:?}", exchange, raw, price);
        }
    }

    snapshot
}

/// GET a JSON document, mapping each failure stage to its error kind
async fn get_json<T: DeserializeOwned>(
    http: &Client,
    exchange: Exchange,
    url: &str,
) -> PriceFeedResult<T> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| connection_error(exchange, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PriceFeedError::BadStatus {
            exchange,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| connection_error(exchange, e))?;

    serde_json::from_slice(&body).map_err(|e| PriceFeedError::InvalidBody {
        exchange,
        reason: e.to_string(),
    })
}

fn connection_error(exchange: Exchange, err: reqwest::Error) -> PriceFeedError {
    let reason = if err.is_timeout() {
        format!("request timed out ({})", err)
    } else {
        err.to_string()
    };
    PriceFeedError::ConnectionFailed { exchange, reason }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Binance spot ticker feed
#[derive(Debug, Clone)]
pub struct BinanceFeed {
    http: Client,
    url: String,
}

impl BinanceFeed {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            url: endpoint(base_url, BINANCE_TICKER_PATH),
        }
    }

    pub fn from_config(http: Client, config: &FeedConfig) -> Self {
        Self::new(http, config.base_url(Exchange::Binance))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl PriceSource for BinanceFeed {
    fn exchange(&self) -> Exchange {
        Exchange::Binance
    }

    async fn fetch_prices(&self) -> PriceFeedResult<PriceSnapshot> {
        let start = Instant::now();
        let tickers: Vec<BinanceTicker> = get_json(&self.http, Exchange::Binance, &self.url).await?;
        let snapshot = binance_snapshot(&tickers);

        debug!(
            "Fetched {} Binance tickers ({} USDT pairs) in {:?}",
            tickers.len(),
            snapshot.len(),
            start.elapsed()
        );

        Ok(snapshot)
    }
}

/// Gate.io spot ticker feed
#[derive(Debug, Clone)]
pub struct GateIoFeed {
    http: Client,
    url: String,
}

impl GateIoFeed {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            url: endpoint(base_url, GATEIO_TICKER_PATH),
        }
    }

    pub fn from_config(http: Client, config: &FeedConfig) -> Self {
        Self::new(http, config.base_url(Exchange::GateIo))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl PriceSource for GateIoFeed {
    fn exchange(&self) -> Exchange {
        Exchange::GateIo
    }

    async fn fetch_prices(&self) -> PriceFeedResult<PriceSnapshot> {
        let start = Instant::now();
        let tickers: Vec<GateIoTicker> = get_json(&self.http, Exchange::GateIo, &self.url).await?;
        let snapshot = gateio_snapshot(&tickers);

        debug!(
            "Fetched {} Gate.io tickers ({} USDT pairs) in {:?}",
            tickers.len(),
            snapshot.len(),
            start.elapsed()
        );

        Ok(snapshot)
    }
}
