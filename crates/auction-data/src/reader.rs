//! Dataset loading and record normalization.
//!
//! Reads the JSON array of auction lots, parses each record's price strings
//! and builds the immutable [`Item`] table. Records that fail to parse are
//! handled according to the caller's [`MalformedPolicy`].

use std::path::Path;
use std::time::Instant;

use auction_core::error::{DashboardError, Result};
use auction_core::models::{Item, MalformedPolicy, RawRecord, SkippedRecord};
use auction_core::pricing::{parse_estimate, parse_price};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside a loaded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadMetadata {
    /// RFC 3339 timestamp when the table was built.
    pub generated_at: String,
    /// Where the records came from (usually a file path).
    pub source: String,
    /// Number of records in the source array.
    pub records_read: usize,
    /// Number of items in the normalized table.
    pub items_loaded: usize,
    /// Number of records dropped under [`MalformedPolicy::Skip`].
    pub records_skipped: usize,
    /// Wall-clock seconds spent parsing and normalizing.
    pub load_time_seconds: f64,
}

/// The complete output of a load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Normalized items in source order.
    pub items: Vec<Item>,
    /// Records dropped under [`MalformedPolicy::Skip`]; always empty for
    /// [`MalformedPolicy::Abort`].
    pub skipped: Vec<SkippedRecord>,
    pub metadata: LoadMetadata,
}

// ── Normalization ─────────────────────────────────────────────────────────────

/// Normalize one raw record.
pub fn normalize_record(raw: &RawRecord) -> Result<Item> {
    let sold_price = parse_price(&raw.sold_price).map_err(|e| field_error("Sold Price", e))?;
    let estimate =
        parse_estimate(&raw.estimated_price).map_err(|e| field_error("Estimated Price", e))?;

    Ok(Item::new(
        raw.title.clone(),
        sold_price,
        estimate,
        raw.estimated_price.clone(),
        raw.item_url.clone(),
        raw.item_image.clone(),
    ))
}

/// Normalize typed records, failing on the first bad one.
pub fn normalize_records(records: &[RawRecord]) -> Result<Vec<Item>> {
    records
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            normalize_record(raw).map_err(|e| DashboardError::MalformedRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Normalize untyped JSON records under `policy`.
///
/// Each element is deserialized on its own so that a missing field or a
/// wrong JSON type is a per-record failure rather than a whole-document one.
pub fn normalize_values(
    values: Vec<serde_json::Value>,
    policy: MalformedPolicy,
) -> Result<(Vec<Item>, Vec<SkippedRecord>)> {
    let mut items = Vec::with_capacity(values.len());
    let mut skipped = Vec::new();

    for (index, value) in values.into_iter().enumerate() {
        let outcome = serde_json::from_value::<RawRecord>(value)
            .map_err(|e| e.to_string())
            .and_then(|raw| normalize_record(&raw).map_err(|e| e.to_string()));

        match outcome {
            Ok(item) => items.push(item),
            Err(reason) => match policy {
                MalformedPolicy::Abort => {
                    return Err(DashboardError::MalformedRecord { index, reason });
                }
                MalformedPolicy::Skip => {
                    warn!(index, %reason, "skipping malformed record");
                    skipped.push(SkippedRecord { index, reason });
                }
            },
        }
    }

    Ok((items, skipped))
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parse a JSON document (an array of records) into a [`LoadReport`].
pub fn load_items_from_str(
    content: &str,
    source: &str,
    policy: MalformedPolicy,
) -> Result<LoadReport> {
    let start = Instant::now();

    let values: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let records_read = values.len();
    let (items, skipped) = normalize_values(values, policy)?;

    let metadata = LoadMetadata {
        generated_at: chrono::Utc::now().to_rfc3339(),
        source: source.to_string(),
        records_read,
        items_loaded: items.len(),
        records_skipped: skipped.len(),
        load_time_seconds: start.elapsed().as_secs_f64(),
    };

    debug!(
        source,
        records_read,
        items = metadata.items_loaded,
        skipped = metadata.records_skipped,
        "normalized dataset"
    );

    Ok(LoadReport {
        items,
        skipped,
        metadata,
    })
}

/// Read and normalize the dataset at `path`.
///
/// A missing or unreadable file is [`DashboardError::SourceNotFound`].
pub fn load_items(path: &Path, policy: MalformedPolicy) -> Result<LoadReport> {
    let content = read_source(path)?;
    load_items_from_str(&content, &path.display().to_string(), policy)
}

/// Read the raw text of the dataset.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DashboardError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn field_error(field: &str, err: DashboardError) -> DashboardError {
    match err {
        DashboardError::PriceParse { value, reason } => DashboardError::PriceParse {
            value,
            reason: format!("{} {}", field, reason),
        },
        other => other,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
