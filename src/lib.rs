//! Sentiment Dashboard Analytics Core
//!
//! Turns per-day, per-keyword sentiment rows into dashboard views:
//! time series, distribution pies, leaderboards and controversy rankings.

pub mod analytics;
pub mod client;
pub mod config;
pub mod error;
pub mod keywords;
pub mod state;
pub mod types;
