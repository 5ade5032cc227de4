use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::categories::{detect_category, Category};
use crate::error::DashboardError;
use crate::pricing::Estimate;

/// One auction-lot record exactly as it appears in the source JSON.
///
/// Unknown extra fields in the source are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Title")]
    pub title: String,
    /// Sold price string, e.g. `"$1,000"`.
    #[serde(rename = "Sold Price")]
    pub sold_price: String,
    /// Estimate string, a single value or a hyphen-joined pair.
    #[serde(rename = "Estimated Price")]
    pub estimated_price: String,
    /// Lot page.
    #[serde(rename = "Item URL")]
    pub item_url: String,
    #[serde(rename = "Item Image")]
    pub item_image: String,
}

/// A normalized auction lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub sold_price: u64,
    pub estimated_low: u64,
    pub estimated_high: u64,
    /// Mean of the estimate bounds.
    pub estimated_average: f64,
    /// Estimate string as supplied by the source, kept for display.
    pub estimated_price_raw: String,
    pub category: Category,
    /// Opaque image reference, passed through to renderers.
    pub image_url: String,
    /// Opaque lot-page reference, passed through to renderers.
    pub detail_url: String,
    /// `log10(sold_price + 1)`, used as a colour-scale input.
    pub log_sold_price: f64,
}

impl Item {
    /// Build an item from already-parsed prices, deriving the category, the
    /// estimate average and the log-scaled price.
    pub fn new(
        title: impl Into<String>,
        sold_price: u64,
        estimate: Estimate,
        estimated_price_raw: impl Into<String>,
        detail_url: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let category = detect_category(&title);
        Self {
            title,
            sold_price,
            estimated_low: estimate.low,
            estimated_high: estimate.high,
            estimated_average: estimate.average(),
            estimated_price_raw: estimated_price_raw.into(),
            category,
            image_url: image_url.into(),
            detail_url: detail_url.into(),
            log_sold_price: log_price(sold_price),
        }
    }

    /// Sold price relative to the estimate average, in percent.
    ///
    /// Positive when the lot sold above its estimate. `None` when the
    /// estimate average is zero.
    pub fn estimate_delta_percent(&self) -> Option<f64> {
        if self.estimated_average == 0.0 {
            return None;
        }
        Some((self.sold_price as f64 - self.estimated_average) / self.estimated_average * 100.0)
    }
}

/// `log10(price + 1)`.
pub fn log_price(price: u64) -> f64 {
    (price as f64 + 1.0).log10()
}

/// What to do with a record whose prices cannot be parsed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the whole load on the first bad record.
    #[default]
    Abort,
    /// Drop the record, log a warning, and count it in the load report.
    Skip,
}

impl fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedPolicy::Abort => f.write_str("abort"),
            MalformedPolicy::Skip => f.write_str("skip"),
        }
    }
}

impl FromStr for MalformedPolicy {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(MalformedPolicy::Abort),
            "skip" => Ok(MalformedPolicy::Skip),
            other => Err(DashboardError::Config(format!(
                "invalid malformed-record policy '{}'",
                other
            ))),
        }
    }
}

/// A record dropped under [`MalformedPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Zero-based position in the source array.
    pub index: usize,
    pub reason: String,
}
