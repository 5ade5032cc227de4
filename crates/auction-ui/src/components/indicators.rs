use crate::themes::Theme;
use auction_core::categories::Category;
use auction_core::filter_spec::FilterSpec;
use ratatui::text::{Line, Span};

/// Toggle keys, one per category in [`Category::ALL`] order.
pub const CATEGORY_KEYS: [char; 11] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-'];

/// Category bound to a toggle key, if any.
pub fn category_for_key(key: char) -> Option<Category> {
    CATEGORY_KEYS
        .iter()
        .position(|k| *k == key)
        .map(|i| Category::ALL[i])
}

// ── CategoryToggle ───────────────────────────────────────────────────────────

/// One checkbox entry of the category filter, e.g. `1 [x] Scripts & Screenplays`.
pub struct CategoryToggle<'a> {
    pub category: Category,
    pub selected: bool,
    pub theme: &'a Theme,
}

impl<'a> CategoryToggle<'a> {
    pub fn new(category: Category, selected: bool, theme: &'a Theme) -> Self {
        Self {
            category,
            selected,
            theme,
        }
    }

    pub fn to_spans(&self) -> Vec<Span<'a>> {
        let key = CATEGORY_KEYS[self.category.index()];
        let (mark, label_style) = if self.selected {
            ("[x]", self.theme.category_style(self.category))
        } else {
            ("[ ]", self.theme.dim)
        };
        vec![
            Span::styled(format!("{} ", key), self.theme.label),
            Span::styled(mark, self.theme.text),
            Span::raw(" "),
            Span::styled(self.category.label(), label_style),
        ]
    }
}

/// Every category checkbox for `spec`, one per line.
pub fn category_checklist<'a>(spec: &FilterSpec, theme: &'a Theme) -> Vec<Line<'a>> {
    Category::ALL
        .into_iter()
        .map(|category| {
            Line::from(CategoryToggle::new(category, spec.is_selected(category), theme).to_spans())
        })
        .collect()
}

// ── StatIndicator ────────────────────────────────────────────────────────────

/// A `label: value` pair for the summary panel.
pub struct StatIndicator<'a> {
    pub label: &'a str,
    pub value: String,
    pub theme: &'a Theme,
}

impl<'a> StatIndicator<'a> {
    pub fn new(label: &'a str, value: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            label,
            value: value.into(),
            theme,
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{}: ", self.label), self.theme.label),
            Span::styled(self.value.clone(), self.theme.value),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
