//! HTTP API for the spread monitor
//!
//! Serves the cached, ranked comparison of Binance and Gate.io prices.

pub mod config;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use routes::{router, ApiError, AppState};
pub use server::{HttpServer, HttpServerBuilder};
