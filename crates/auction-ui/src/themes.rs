use auction_core::categories::Category;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark; 7–15 are light. Absent or unparseable values give
/// `BackgroundType::Dark`.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|val| val.split(';').next_back().and_then(|bg| bg.parse::<u8>().ok()))
        .map_or(BackgroundType::Dark, |bg| {
            if bg <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            }
        })
}

/// Every style the dashboard views draw with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Bars ─────────────────────────────────────────────────────────────────
    pub bar_empty: Style,
    pub bar_label: Style,

    // ── Prices ───────────────────────────────────────────────────────────────
    /// Sold below $100.
    pub price_low: Style,
    /// Sold between $100 and $1,000.
    pub price_medium: Style,
    /// Sold at $1,000 or more.
    pub price_high: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    /// One colour per [`Category`], indexed by [`Category::index`].
    pub category_palette: [Color; 11],
}

const BRIGHT_PALETTE: [Color; 11] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightGreen,
    Color::LightCyan,
    Color::Gray,
];

const DEEP_PALETTE: [Color; 11] = [
    Color::Blue,
    Color::Magenta,
    Color::Rgb(176, 112, 0),
    Color::Green,
    Color::Red,
    Color::Rgb(0, 95, 135),
    Color::Rgb(135, 95, 0),
    Color::Rgb(95, 0, 135),
    Color::Rgb(0, 120, 60),
    Color::Rgb(0, 120, 120),
    Color::DarkGray,
];

const ANSI_PALETTE: [Color; 11] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Cyan,
    Color::White,
];

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            bar_empty: Style::default().fg(Color::DarkGray),
            bar_label: Style::default().fg(Color::Gray),

            price_low: Style::default().fg(Color::Green),
            price_medium: Style::default().fg(Color::Yellow),
            price_high: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            category_palette: BRIGHT_PALETTE,
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),
            tab_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            bar_empty: Style::default().fg(Color::Gray),
            bar_label: Style::default().fg(Color::DarkGray),

            price_low: Style::default().fg(Color::Green),
            price_medium: Style::default().fg(Color::Yellow),
            price_high: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            category_palette: DEEP_PALETTE,
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::REVERSED),
            tab_inactive: Style::default().fg(Color::White),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            bar_empty: Style::default().fg(Color::DarkGray),
            bar_label: Style::default().fg(Color::White),

            price_low: Style::default().fg(Color::Green),
            price_medium: Style::default().fg(Color::Yellow),
            price_high: Style::default().fg(Color::Red),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),

            category_palette: ANSI_PALETTE,
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names (including `"auto"`) detect.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Colour for a category's series, slice or bar.
    pub fn category_color(&self, category: Category) -> Color {
        self.category_palette[category.index()]
    }

    pub fn category_style(&self, category: Category) -> Style {
        Style::default().fg(self.category_color(category))
    }

    /// Style for a sold price.
    ///
    /// * `< $100`         → `price_low`
    /// * `$100 – $999`    → `price_medium`
    /// * `≥ $1,000`       → `price_high`
    pub fn price_style(&self, price: u64) -> Style {
        if price >= 1_000 {
            self.price_high
        } else if price >= 100 {
            self.price_medium
        } else {
            self.price_low
        }
    }

    /// Style for a sold-vs-estimate delta: green above, red below.
    pub fn delta_style(&self, delta: f64) -> Style {
        if delta > 0.0 {
            self.success
        } else if delta < 0.0 {
            self.error
        } else {
            self.dim
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.success.fg, Some(Color::Green));
        assert_eq!(t.error.fg, Some(Color::Red));
        assert_eq!(t.category_color(Category::Scripts), Color::Cyan);
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
        assert_eq!(t.category_color(Category::Other), Color::DarkGray);
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.bold.add_modifier.contains(Modifier::BOLD));
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert_eq!(t.table_total.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert!(Theme::from_name("does-not-exist").header.fg.is_some());
    }

    #[test]
    fn test_every_category_has_a_colour() {
        let t = Theme::dark();
        for category in Category::ALL {
            assert_eq!(t.category_style(category).fg, Some(t.category_color(category)));
        }
    }

    #[test]
    fn test_price_style_thresholds() {
        let t = Theme::dark();
        assert_eq!(t.price_style(0).fg, Some(Color::Green));
        assert_eq!(t.price_style(99).fg, Some(Color::Green));
        assert_eq!(t.price_style(100).fg, Some(Color::Yellow));
        assert_eq!(t.price_style(999).fg, Some(Color::Yellow));
        assert_eq!(t.price_style(1_000).fg, Some(Color::Red));
    }

    #[test]
    fn test_delta_style() {
        let t = Theme::dark();
        assert_eq!(t.delta_style(12.0).fg, Some(Color::Green));
        assert_eq!(t.delta_style(-3.0).fg, Some(Color::Red));
        assert_eq!(t.delta_style(0.0).fg, Some(Color::DarkGray));
    }
}
