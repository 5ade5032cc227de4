//! Chart-ready views derived from a filtered subset.
//!
//! Each function takes the subset in table order and returns plain data that
//! a renderer can draw without further computation: a category/title
//! hierarchy for area charts, per-category scatter series, estimate vs sold
//! comparisons, and a log-scaled price histogram.

use auction_core::categories::Category;
use auction_core::formatting::percentage;
use auction_core::models::{log_price, Item};
use serde::{Deserialize, Serialize};

use crate::aggregator::{top_n, RankOrder};

// ── Treemap ───────────────────────────────────────────────────────────────────

/// Leaf of the category/title hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapLeaf {
    pub title: String,
    /// Area weight.
    pub value: u64,
    /// Colour-scale input (`log10(price + 1)`).
    pub color: f64,
}

/// Category node holding its lots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapNode {
    pub category: Category,
    /// Sum of the leaf values.
    pub value: u64,
    pub leaves: Vec<TreemapLeaf>,
}

/// Group `items` by category. Nodes are ordered by descending value (ties in
/// category order); leaves keep table order.
pub fn treemap(items: &[Item]) -> Vec<TreemapNode> {
    let mut nodes: Vec<TreemapNode> = Category::ALL
        .into_iter()
        .map(|category| TreemapNode {
            category,
            value: 0,
            leaves: Vec::new(),
        })
        .collect();

    for item in items {
        let node = &mut nodes[item.category.index()];
        node.value = node.value.saturating_add(item.sold_price);
        node.leaves.push(TreemapLeaf {
            title: item.title.clone(),
            value: item.sold_price,
            color: item.log_sold_price,
        });
    }

    nodes.retain(|n| !n.leaves.is_empty());
    nodes.sort_by(|a, b| b.value.cmp(&a.value));
    nodes
}

// ── Scatter ───────────────────────────────────────────────────────────────────

/// One point of the estimate-vs-sold scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub title: String,
    pub estimated_average: f64,
    pub sold_price: u64,
}

/// All points of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub category: Category,
    pub points: Vec<ScatterPoint>,
}

/// Per-category `(estimated_average, sold_price)` series in category order;
/// points keep table order. Categories without items are omitted.
pub fn scatter_series(items: &[Item]) -> Vec<ScatterSeries> {
    let mut series: Vec<ScatterSeries> = Category::ALL
        .into_iter()
        .map(|category| ScatterSeries {
            category,
            points: Vec::new(),
        })
        .collect();

    for item in items {
        series[item.category.index()].points.push(ScatterPoint {
            title: item.title.clone(),
            estimated_average: item.estimated_average,
            sold_price: item.sold_price,
        });
    }

    series.retain(|s| !s.points.is_empty());
    series
}

// ── Estimate comparison ───────────────────────────────────────────────────────

/// Estimate average against realised price for one lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateComparison {
    pub title: String,
    pub estimated_average: f64,
    pub sold_price: u64,
    /// `sold_price - estimated_average`.
    pub delta: f64,
}

/// Dumbbell rows for the `n` most expensive lots, most expensive first.
pub fn estimate_comparison(items: &[Item], n: usize) -> Vec<EstimateComparison> {
    top_n(items, n, RankOrder::Largest)
        .into_iter()
        .map(|item| EstimateComparison {
            delta: item.sold_price as f64 - item.estimated_average,
            estimated_average: item.estimated_average,
            sold_price: item.sold_price,
            title: item.title,
        })
        .collect()
}

/// How the subset performed against its estimates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimateInsights {
    pub above_estimate: usize,
    pub below_estimate: usize,
    /// Percent of the subset sold above estimate.
    pub above_percentage: f64,
    /// Percent of the subset sold below estimate.
    pub below_percentage: f64,
    /// Mean `(sold - avg) / avg` over above-estimate lots, in percent.
    /// Lots with a zero estimate count as above but have no premium.
    pub average_premium: f64,
    /// Mean `(avg - sold) / avg` over below-estimate lots, in percent.
    pub average_discount: f64,
    pub total_estimated_low: u64,
    pub total_estimated_high: u64,
}

/// Above/below-estimate counts, premiums and estimate totals.
///
/// Lots sold exactly at their estimate average count in neither group.
pub fn estimate_insights(items: &[Item]) -> EstimateInsights {
    if items.is_empty() {
        return EstimateInsights::default();
    }

    let mut insights = EstimateInsights::default();
    let mut premium_sum = 0.0;
    let mut premium_lots = 0usize;
    let mut discount_sum = 0.0;
    let mut discount_lots = 0usize;

    for item in items {
        insights.total_estimated_low = insights.total_estimated_low.saturating_add(item.estimated_low);
        insights.total_estimated_high =
            insights.total_estimated_high.saturating_add(item.estimated_high);

        let sold = item.sold_price as f64;
        if sold > item.estimated_average {
            insights.above_estimate += 1;
            if let Some(delta) = item.estimate_delta_percent() {
                premium_sum += delta;
                premium_lots += 1;
            }
        } else if sold < item.estimated_average {
            insights.below_estimate += 1;
            if let Some(delta) = item.estimate_delta_percent() {
                discount_sum += -delta;
                discount_lots += 1;
            }
        }
    }

    let total = items.len() as f64;
    insights.above_percentage = percentage(insights.above_estimate as f64, total, 1);
    insights.below_percentage = percentage(insights.below_estimate as f64, total, 1);
    if premium_lots > 0 {
        insights.average_premium = premium_sum / premium_lots as f64;
    }
    if discount_lots > 0 {
        insights.average_discount = discount_sum / discount_lots as f64;
    }
    insights
}

// ── Histogram ─────────────────────────────────────────────────────────────────

/// Default bucket count for price histograms.
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// One bucket of the price histogram, bounds in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Histogram of sold prices over `bins` equal-width buckets in
/// `log10(price + 1)` space. The last bucket is closed on the right.
pub fn price_histogram(items: &[Item], bins: usize) -> Vec<HistogramBin> {
    if items.is_empty() || bins == 0 {
        return Vec::new();
    }

    let logs: Vec<f64> = items.iter().map(|i| log_price(i.sold_price)).collect();
    let lo = logs.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };

    let mut counts = vec![0usize; bins];
    for value in logs {
        let slot = (((value - lo) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: 10f64.powf(lo + width * i as f64) - 1.0,
            upper: 10f64.powf(lo + width * (i + 1) as f64) - 1.0,
            count,
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
