//! Keyword-based lot classification.
//!
//! Every title maps to exactly one [`Category`]. The keyword table is scanned
//! top-to-bottom and the first category with a matching substring wins, so
//! the table order is the priority order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Closed set of lot categories, declared in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Scripts & Screenplays")]
    Scripts,
    #[serde(rename = "Cameras & Camcorders")]
    Cameras,
    #[serde(rename = "Lighting Equipment")]
    Lighting,
    #[serde(rename = "Books & Reference")]
    Books,
    #[serde(rename = "Posters & Prints")]
    Posters,
    #[serde(rename = "Furniture")]
    Furniture,
    #[serde(rename = "Coffee & Kitchen")]
    Kitchen,
    #[serde(rename = "Instruments & Audio")]
    Instruments,
    #[serde(rename = "Records & Music")]
    Records,
    #[serde(rename = "Props & Memorabilia")]
    Props,
    #[serde(rename = "Other")]
    Other,
}

/// Ordered `(category, keywords)` table. `Other` has no keywords; it is the
/// fallback when nothing here matches.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Scripts, &["script", "screenplay"]),
    (Category::Cameras, &["camera", "camcorder"]),
    (Category::Lighting, &["light", "lighting"]),
    (Category::Books, &["book", "volume", "reference"]),
    (Category::Posters, &["poster", "signed poster"]),
    (Category::Furniture, &["sofa", "chair", "table", "furniture"]),
    (Category::Kitchen, &["mug", "cup", "coffee maker", "espresso"]),
    (
        Category::Instruments,
        &["guitar", "bass", "keyboard", "drum", "microphone", "audio", "speaker"],
    ),
    (Category::Records, &["record", "album", "vinyl"]),
    (Category::Props, &["prop", "memorabilia", "production slate"]),
];

impl Category {
    /// All categories, in declaration (priority) order.
    pub const ALL: [Category; 11] = [
        Category::Scripts,
        Category::Cameras,
        Category::Lighting,
        Category::Books,
        Category::Posters,
        Category::Furniture,
        Category::Kitchen,
        Category::Instruments,
        Category::Records,
        Category::Props,
        Category::Other,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Scripts => "Scripts & Screenplays",
            Category::Cameras => "Cameras & Camcorders",
            Category::Lighting => "Lighting Equipment",
            Category::Books => "Books & Reference",
            Category::Posters => "Posters & Prints",
            Category::Furniture => "Furniture",
            Category::Kitchen => "Coffee & Kitchen",
            Category::Instruments => "Instruments & Audio",
            Category::Records => "Records & Music",
            Category::Props => "Props & Memorabilia",
            Category::Other => "Other",
        }
    }

    /// Zero-based position in [`Category::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DashboardError;

    /// Accepts the exact label, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DashboardError::Config(format!("unknown category '{}'", s)))
    }
}

/// Classify a lot title.
///
/// The title is lowercased and tested against [`CATEGORY_KEYWORDS`] in
/// order; titles that match nothing fall into [`Category::Other`].
pub fn detect_category(title: &str) -> Category {
    let title = title.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| title.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
