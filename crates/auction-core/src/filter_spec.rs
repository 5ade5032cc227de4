//! Immutable description of a view over the item table.
//!
//! A [`FilterSpec`] is a plain value: the UI replaces it on every
//! interaction instead of mutating shared state, and it is `Hash + Eq` so
//! it can key memoized results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::categories::Category;

/// Inclusive sold-price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Build a range from optional CLI bounds. Returns `None` when both are
    /// absent; a missing bound is open-ended.
    pub fn from_bounds(min: Option<u64>, max: Option<u64>) -> Option<Self> {
        match (min, max) {
            (None, None) => None,
            (min, max) => Some(Self {
                min: min.unwrap_or(0),
                max: max.unwrap_or(u64::MAX),
            }),
        }
    }

    pub fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Category subset, title keyword, and optional price range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSpec {
    pub categories: BTreeSet<Category>,
    /// Case-insensitive title substring; empty means no keyword filter.
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterSpec {
    /// Every category, no keyword, no price range.
    pub fn all() -> Self {
        Self {
            categories: Category::ALL.into_iter().collect(),
            keyword: String::new(),
            price_range: None,
        }
    }

    /// No categories selected: matches nothing.
    pub fn none() -> Self {
        Self {
            categories: BTreeSet::new(),
            keyword: String::new(),
            price_range: None,
        }
    }

    pub fn with_categories(self, categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            ..self
        }
    }

    pub fn with_keyword(self, keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..self
        }
    }

    pub fn with_price_range(self, price_range: Option<PriceRange>) -> Self {
        Self {
            price_range,
            ..self
        }
    }

    /// Return a copy with `category` flipped in or out of the subset.
    pub fn toggle_category(&self, category: Category) -> Self {
        let mut categories = self.categories.clone();
        if !categories.remove(&category) {
            categories.insert(category);
        }
        Self {
            categories,
            ..self.clone()
        }
    }

    /// Return a copy with every category selected.
    pub fn select_all(&self) -> Self {
        Self {
            categories: Category::ALL.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Return a copy with no category selected.
    pub fn clear_all(&self) -> Self {
        Self {
            categories: BTreeSet::new(),
            ..self.clone()
        }
    }

    pub fn has_keyword(&self) -> bool {
        !self.keyword.is_empty()
    }

    pub fn is_selected(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// `true` when the spec cannot exclude any item.
    pub fn is_unrestricted(&self) -> bool {
        self.categories.len() == Category::ALL.len()
            && !self.has_keyword()
            && self.price_range.is_none()
    }
}
