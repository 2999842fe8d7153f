//! Core types and utilities for the cross-exchange spread monitor
//!
//! This crate provides shared types used across all components:
//! - Exchange identifiers and per-exchange price snapshots
//! - The tracked watch-list
//! - Comparison records, spread math and ranked results
//! - Configuration defaults, clocks and error types

pub mod types;
pub mod watchlist;
pub mod opportunities;
pub mod config;
pub mod clock;
pub mod errors;

pub use types::*;
pub use watchlist::*;
pub use opportunities::*;
pub use config::*;
pub use clock::*;
pub use errors::*;
