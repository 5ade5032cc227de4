//! Runtime layer for the auction dashboard.
//!
//! Caches the loaded dataset by content hash and memoizes the derived views
//! for each filter the front-end asks for.

pub mod data_manager;
pub mod snapshot;

pub use auction_core as core;
pub use auction_data as data;
