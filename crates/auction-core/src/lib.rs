//! Domain model for the auction dashboard.
//!
//! Items, categories, price parsing, filter specifications, display
//! formatting, errors and CLI settings shared by every other crate.

pub mod categories;
pub mod error;
pub mod filter_spec;
pub mod formatting;
pub mod models;
pub mod pricing;
pub mod settings;

pub use categories::{detect_category, Category};
pub use error::{DashboardError, Result};
pub use filter_spec::{FilterSpec, PriceRange};
pub use models::{Item, MalformedPolicy, RawRecord, SkippedRecord};
