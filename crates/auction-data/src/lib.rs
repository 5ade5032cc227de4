//! Data layer for the auction dashboard.
//!
//! Loads and normalises the scraped results file, filters the item table,
//! computes summary statistics and chart-ready views, and writes exports.

pub mod aggregator;
pub mod analysis;
pub mod export;
pub mod filter;
pub mod reader;

pub use auction_core as core;
