//! Terminal price watcher with an audible alert.
//!
//! Polls an average price endpoint for an asset and a fiat currency, both
//! quoted in a common stable coin, derives the asset's price in fiat, and
//! shows the last samples in a full-screen table. When the move since the
//! previous sample exceeds the configured trigger, a sound is played.

pub mod alert;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod monitor;
pub mod tui;

pub use error::{AlertError, Result};
