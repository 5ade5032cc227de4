//! Content-hash cached loader for the auction dataset.
//!
//! Wraps [`load_items_from_str`] so that re-reading an unchanged file skips
//! normalization. Callers use [`DataManager::get_data`] to obtain the current
//! [`LoadReport`]; a changed file is reloaded, an unchanged one is served from
//! cache. A failed reload falls back to the previous table when there is one.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use auction_core::error::Result;
use auction_core::models::MalformedPolicy;
use auction_data::reader::{load_items_from_str, read_source, LoadReport};

/// Hash of the raw source text.
pub fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Loader that only re-normalizes when the source content changes.
///
/// # Example
/// ```no_run
/// use auction_core::models::MalformedPolicy;
/// use auction_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new("auction_data.json", MalformedPolicy::Abort);
/// let report = mgr.get_data(false).unwrap();
/// println!("{} items", report.items.len());
/// ```
pub struct DataManager {
    path: PathBuf,
    policy: MalformedPolicy,
    /// Most recent load together with the hash of the text it came from.
    cache: Option<(u64, LoadReport)>,
    last_error: Option<String>,
}

impl DataManager {
    pub fn new(path: impl Into<PathBuf>, policy: MalformedPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            cache: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the dataset, re-reading the file to detect changes.
    ///
    /// When `force_refresh` is `true` the table is rebuilt even if the content
    /// hash matches. On failure the previous table (if any) is returned and
    /// the error is kept in [`last_error`](Self::last_error); with no previous
    /// table the error is propagated.
    pub fn get_data(&mut self, force_refresh: bool) -> Result<&LoadReport> {
        match self.refresh(force_refresh) {
            Ok(()) => {
                self.last_error = None;
            }
            Err(e) => {
                if self.cache.is_none() {
                    return Err(e);
                }
                tracing::warn!(error = %e, "reload failed; serving previous table");
                self.last_error = Some(e.to_string());
            }
        }
        match &self.cache {
            Some((_, report)) => Ok(report),
            None => unreachable!("cache populated by successful refresh"),
        }
    }

    /// Hash of the content the cached table was built from.
    pub fn current_hash(&self) -> Option<u64> {
        self.cache.as_ref().map(|(hash, _)| *hash)
    }

    /// Drop the cached table so the next [`get_data`](Self::get_data) reloads.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
        tracing::debug!("dataset cache invalidated");
    }

    /// Description of the last reload error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn refresh(&mut self, force_refresh: bool) -> Result<()> {
        let content = read_source(&self.path)?;
        let hash = content_hash(&content);

        if !force_refresh && self.current_hash() == Some(hash) {
            tracing::debug!(hash, "source unchanged; using cached table");
            return Ok(());
        }

        let report = load_items_from_str(&content, &self.path.display().to_string(), self.policy)?;
        tracing::debug!(
            hash,
            items = report.items.len(),
            skipped = report.skipped.len(),
            "dataset cache updated"
        );
        self.cache = Some((hash, report));
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
