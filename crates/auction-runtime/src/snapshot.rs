//! Per-filter derived views, memoized on dataset hash and filter.
//!
//! A [`DashboardSnapshot`] bundles everything the front-end draws for one
//! [`FilterSpec`]: the subset, its statistics, rankings and chart data.

use std::collections::HashMap;

use auction_core::filter_spec::FilterSpec;
use auction_core::models::Item;
use auction_data::aggregator::{
    category_breakdown, summarize, top_n, CategoryBreakdown, RankOrder, SummaryStats,
};
use auction_data::analysis::{
    estimate_comparison, estimate_insights, price_histogram, scatter_series, treemap,
    EstimateComparison, EstimateInsights, HistogramBin, ScatterSeries, TreemapNode,
    DEFAULT_HISTOGRAM_BINS,
};
use auction_data::filter::{apply_filter, FilterSummary};
use serde::Serialize;

/// All derived views for one filter over one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub spec: FilterSpec,
    /// Matching items in table order.
    pub items: Vec<Item>,
    pub stats: SummaryStats,
    pub summary: FilterSummary,
    pub top_expensive: Vec<Item>,
    pub top_cheapest: Vec<Item>,
    pub breakdown: Vec<CategoryBreakdown>,
    pub treemap: Vec<TreemapNode>,
    pub scatter: Vec<ScatterSeries>,
    pub comparison: Vec<EstimateComparison>,
    pub insights: EstimateInsights,
    pub histogram: Vec<HistogramBin>,
}

impl DashboardSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Filter `items` by `spec` and compute every derived view.
pub fn build_snapshot(items: &[Item], spec: &FilterSpec, top: usize) -> DashboardSnapshot {
    let subset = apply_filter(items, spec);
    tracing::debug!(
        total = items.len(),
        matched = subset.len(),
        keyword = %spec.keyword,
        "building snapshot"
    );

    DashboardSnapshot {
        spec: spec.clone(),
        stats: summarize(&subset),
        summary: FilterSummary::new(spec, items.len(), subset.len()),
        top_expensive: top_n(&subset, top, RankOrder::Largest),
        top_cheapest: top_n(&subset, top, RankOrder::Smallest),
        breakdown: category_breakdown(&subset),
        treemap: treemap(&subset),
        scatter: scatter_series(&subset),
        comparison: estimate_comparison(&subset, top),
        insights: estimate_insights(&subset),
        histogram: price_histogram(&subset, DEFAULT_HISTOGRAM_BINS),
        items: subset,
    }
}

/// Memo of snapshots keyed on `(content hash, FilterSpec)`.
///
/// Entries for an older content hash are dropped as soon as a snapshot for a
/// new hash is requested.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    top: usize,
    entries: HashMap<(u64, FilterSpec), DashboardSnapshot>,
    hits: u64,
    misses: u64,
}

impl SnapshotCache {
    pub fn new(top: usize) -> Self {
        Self {
            top,
            ..Self::default()
        }
    }

    /// Return the snapshot for `spec`, computing it on a miss.
    pub fn get_or_build(
        &mut self,
        content_hash: u64,
        items: &[Item],
        spec: &FilterSpec,
    ) -> &DashboardSnapshot {
        if self.entries.keys().any(|(hash, _)| *hash != content_hash) {
            tracing::debug!(content_hash, "dataset changed; clearing snapshot cache");
            self.entries.retain(|(hash, _), _| *hash == content_hash);
        }

        let key = (content_hash, spec.clone());
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        let top = self.top;
        self.entries
            .entry(key)
            .or_insert_with(|| build_snapshot(items, spec, top))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use auction_core::categories::Category;
    use auction_core::filter_spec::PriceRange;
    use auction_core::pricing::Estimate;

    fn item(title: &str, price: u64, low: u64, high: u64) -> Item {
        Item::new(
            title,
            price,
            Estimate { low, high },
            format!("${} - ${}", low, high),
            "",
            "",
        )
    }

    fn table() -> Vec<Item> {
        vec![
            item("Signed Script", 1000, 800, 1200),
            item("Coffee Mug", 50, 20, 40),
            item("Red Chair", 300, 400, 600),
            item("Blue Chair", 75, 50, 100),
        ]
    }

    #[test]
    fn test_build_snapshot_all() {
        let snap = build_snapshot(&table(), &FilterSpec::all(), 2);
        assert_eq!(snap.items.len(), 4);
        assert_eq!(snap.stats.total_value, 1425);
        assert_eq!(snap.summary.describe(), "Showing 4 of 4 items");
        assert_eq!(snap.top_expensive.len(), 2);
        assert_eq!(snap.top_expensive[0].title, "Signed Script");
        assert_eq!(snap.top_cheapest[0].title, "Coffee Mug");
        assert_eq!(snap.comparison.len(), 2);
        assert_eq!(snap.histogram.len(), DEFAULT_HISTOGRAM_BINS);
        assert_eq!(snap.stats.most_common_category, Some(Category::Furniture));
    }

    #[test]
    fn test_build_snapshot_empty_subset() {
        let snap = build_snapshot(&table(), &FilterSpec::none(), 10);
        assert!(snap.is_empty());
        assert!(snap.stats.is_empty());
        assert!(snap.breakdown.is_empty());
        assert!(snap.treemap.is_empty());
        assert!(snap.top_expensive.is_empty());
        assert_eq!(snap.summary.describe(), "Showing 0 of 4 items");
    }

    #[test]
    fn test_build_snapshot_filtered() {
        let spec = FilterSpec::all()
            .with_keyword("chair")
            .with_price_range(Some(PriceRange::new(100, 500)));
        let snap = build_snapshot(&table(), &spec, 5);
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.items[0].title, "Red Chair");
        assert_eq!(snap.insights.below_estimate, 1);
    }

    #[test]
    fn test_cache_hits_on_repeat() {
        let items = table();
        let mut cache = SnapshotCache::new(5);
        let spec = FilterSpec::all().with_keyword("chair");

        let first = cache.get_or_build(1, &items, &spec).items.len();
        let second = cache.get_or_build(1, &items, &spec).items.len();
        assert_eq!(first, second);
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_distinguishes_specs() {
        let items = table();
        let mut cache = SnapshotCache::new(5);
        cache.get_or_build(1, &items, &FilterSpec::all());
        cache.get_or_build(1, &items, &FilterSpec::all().toggle_category(Category::Kitchen));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats(), (0, 2));
    }

    #[test]
    fn test_cache_drops_stale_hash() {
        let items = table();
        let mut cache = SnapshotCache::new(5);
        cache.get_or_build(1, &items, &FilterSpec::all());
        cache.get_or_build(1, &items, &FilterSpec::none());
        assert_eq!(cache.len(), 2);

        let fewer = &items[..2];
        let snap = cache.get_or_build(2, fewer, &FilterSpec::all());
        assert_eq!(snap.items.len(), 2);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
