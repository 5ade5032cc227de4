//! Stable filtering of the item table by a [`FilterSpec`].

use auction_core::filter_spec::FilterSpec;
use auction_core::models::Item;
use serde::{Deserialize, Serialize};

/// Compiled form of a [`FilterSpec`] with the keyword lowercased once.
struct Matcher<'a> {
    spec: &'a FilterSpec,
    keyword: Option<String>,
}

impl<'a> Matcher<'a> {
    fn new(spec: &'a FilterSpec) -> Self {
        Self {
            spec,
            keyword: spec.has_keyword().then(|| spec.keyword.to_lowercase()),
        }
    }

    fn matches(&self, item: &Item) -> bool {
        if !self.spec.categories.contains(&item.category) {
            return false;
        }
        if let Some(keyword) = &self.keyword {
            if !item.title.to_lowercase().contains(keyword.as_str()) {
                return false;
            }
        }
        self.spec
            .price_range
            .map_or(true, |range| range.contains(item.sold_price))
    }
}

/// `true` when `item` satisfies every clause of `spec`.
pub fn item_matches(spec: &FilterSpec, item: &Item) -> bool {
    Matcher::new(spec).matches(item)
}

/// Return the items matching `spec`, in table order.
///
/// The base table is never modified; the result is a new owned view.
pub fn apply_filter(items: &[Item], spec: &FilterSpec) -> Vec<Item> {
    let matcher = Matcher::new(spec);
    items.iter().filter(|i| matcher.matches(i)).cloned().collect()
}

/// Positions of the matching items in the base table.
pub fn filter_indices(items: &[Item], spec: &FilterSpec) -> Vec<usize> {
    let matcher = Matcher::new(spec);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matcher.matches(item))
        .map(|(i, _)| i)
        .collect()
}

/// "Showing X of Y items" context for a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub total_items: usize,
    pub filtered_items: usize,
    pub selected_categories: Vec<String>,
    pub keyword: String,
}

impl FilterSummary {
    pub fn new(spec: &FilterSpec, total_items: usize, filtered_items: usize) -> Self {
        Self {
            total_items,
            filtered_items,
            selected_categories: spec
                .categories
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
            keyword: spec.keyword.clone(),
        }
    }

    /// One-line description, e.g. `Showing 12 of 340 items matching "lamp"`.
    pub fn describe(&self) -> String {
        let mut line = format!(
            "Showing {} of {} items",
            self.filtered_items, self.total_items
        );
        if !self.keyword.is_empty() {
            line.push_str(&format!(" matching \"{}\"", self.keyword));
        }
        line
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
