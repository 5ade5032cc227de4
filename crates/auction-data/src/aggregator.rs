//! Summary statistics and rankings over a filtered subset.

use std::collections::HashMap;

use auction_core::categories::Category;
use auction_core::formatting::percentage;
use auction_core::models::Item;
use serde::{Deserialize, Serialize};

/// Label shown when a subset has no modal category.
pub const NO_CATEGORY: &str = "N/A";

// ── SummaryStats ──────────────────────────────────────────────────────────────

/// Count / sum / mean / extremes / modal category of a subset.
///
/// An empty subset yields zero counts and prices, no extremal items and no
/// modal category; it is a valid value, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_items: usize,
    pub total_value: u64,
    pub average_price: f64,
    pub min_price: u64,
    pub max_price: u64,
    /// First item in table order carrying `max_price`.
    pub most_expensive: Option<Item>,
    /// First item in table order carrying `min_price`.
    pub cheapest: Option<Item>,
    pub most_common_category: Option<Category>,
}

impl SummaryStats {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// Modal category label, or [`NO_CATEGORY`] for an empty subset.
    pub fn most_common_category_label(&self) -> &'static str {
        self.most_common_category
            .map(|c| c.label())
            .unwrap_or(NO_CATEGORY)
    }
}

/// Compute [`SummaryStats`] over `items`.
pub fn summarize(items: &[Item]) -> SummaryStats {
    let Some(first) = items.first() else {
        return SummaryStats::default();
    };

    let mut total_value: u64 = 0;
    let mut cheapest = first;
    let mut most_expensive = first;

    for item in items {
        total_value = total_value.saturating_add(item.sold_price);
        // Strict comparisons keep the first occurrence on ties.
        if item.sold_price < cheapest.sold_price {
            cheapest = item;
        }
        if item.sold_price > most_expensive.sold_price {
            most_expensive = item;
        }
    }

    SummaryStats {
        total_items: items.len(),
        total_value,
        average_price: total_value as f64 / items.len() as f64,
        min_price: cheapest.sold_price,
        max_price: most_expensive.sold_price,
        most_expensive: Some(most_expensive.clone()),
        cheapest: Some(cheapest.clone()),
        most_common_category: modal_category(items),
    }
}

/// Most frequent category.
///
/// Ties go to the category whose running count reaches the final maximum
/// first while scanning in table order.
/// For categories seen as `A, B, B, A` the result is `B`: B reaches two
/// before A does.
pub fn modal_category(items: &[Item]) -> Option<Category> {
    let mut counts: HashMap<Category, usize> = HashMap::new();
    let mut best: Option<(Category, usize)> = None;

    for item in items {
        let count = counts.entry(item.category).or_insert(0);
        *count += 1;
        if best.map_or(true, |(_, n)| *count > n) {
            best = Some((item.category, *count));
        }
    }

    best.map(|(category, _)| category)
}

// ── Rankings ──────────────────────────────────────────────────────────────────

/// Direction of a top-N ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankOrder {
    /// Most expensive first.
    Largest,
    /// Cheapest first.
    Smallest,
}

/// The `n` most extreme items by sold price.
///
/// Ties are broken by table order. The result is in display order:
/// descending for [`RankOrder::Largest`], ascending for
/// [`RankOrder::Smallest`].
pub fn top_n(items: &[Item], n: usize, order: RankOrder) -> Vec<Item> {
    let mut ranked: Vec<&Item> = items.iter().collect();
    // `sort_by` is stable, so equal prices keep their table order.
    match order {
        RankOrder::Largest => ranked.sort_by(|a, b| b.sold_price.cmp(&a.sold_price)),
        RankOrder::Smallest => ranked.sort_by(|a, b| a.sold_price.cmp(&b.sold_price)),
    }
    ranked.into_iter().take(n).cloned().collect()
}

// ── Category breakdown ────────────────────────────────────────────────────────

/// Per-category totals within a subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub count: usize,
    pub total_value: u64,
    pub average_price: f64,
    /// Share of the subset's total sold value, in percent.
    pub share_of_value: f64,
}

/// Totals for every category present in `items`, in category order.
pub fn category_breakdown(items: &[Item]) -> Vec<CategoryBreakdown> {
    let mut counts = [0usize; Category::ALL.len()];
    let mut values = [0u64; Category::ALL.len()];
    for item in items {
        let i = item.category.index();
        counts[i] += 1;
        values[i] = values[i].saturating_add(item.sold_price);
    }

    let grand_total: u64 = values.iter().fold(0u64, |acc, v| acc.saturating_add(*v));

    Category::ALL
        .into_iter()
        .filter(|c| counts[c.index()] > 0)
        .map(|category| {
            let i = category.index();
            CategoryBreakdown {
                category,
                count: counts[i],
                total_value: values[i],
                average_price: values[i] as f64 / counts[i] as f64,
                share_of_value: percentage(values[i] as f64, grand_total as f64, 1),
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
