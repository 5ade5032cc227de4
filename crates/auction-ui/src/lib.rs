//! Terminal UI layer for the auction dashboard.
//!
//! Provides themes, header and bar components, the data table, summary,
//! category, scatter and insight views, and the main application event loop
//! built on top of [`ratatui`].

pub mod app;
pub mod category_view;
pub mod components;
pub mod insights_view;
pub mod scatter_view;
pub mod summary_view;
pub mod table_view;
pub mod themes;

pub use auction_core as core;
