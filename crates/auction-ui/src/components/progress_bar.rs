use crate::themes::Theme;
use auction_core::formatting::format_price;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Configuration controlling visual appearance of a share bar.
pub struct BarConfig {
    /// Total width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
    /// Whether to append the percentage and value after the bar.
    pub show_label: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
            show_label: true,
        }
    }
}

// ── ShareBar ─────────────────────────────────────────────────────────────────

/// Horizontal bar showing a part's share of a whole, e.g. one category's
/// sold value against the subset total.
pub struct ShareBar<'a> {
    /// Share of the whole, clamped to `[0.0, 100.0]`.
    pub percentage: f64,
    pub value: u64,
    pub fill_style: Style,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> ShareBar<'a> {
    /// Construct a bar for `value` out of `total`.
    pub fn new(value: u64, total: u64, fill_style: Style, theme: &'a Theme) -> Self {
        let percentage = if total > 0 {
            ((value as f64 / total as f64) * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            percentage,
            value,
            fill_style,
            theme,
            config: BarConfig::default(),
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    /// Number of filled columns.
    pub fn filled_columns(&self) -> u16 {
        ((self.percentage / 100.0) * self.config.width as f64).round() as u16
    }

    /// Render the bar as a single [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let filled = self.filled_columns().min(self.config.width);
        let empty = self.config.width - filled;

        let mut spans = vec![
            Span::styled(
                self.config.filled_char.to_string().repeat(filled as usize),
                self.fill_style,
            ),
            Span::styled(
                self.config.empty_char.to_string().repeat(empty as usize),
                self.theme.bar_empty,
            ),
        ];
        if self.config.show_label {
            spans.push(Span::styled(
                format!(" {:>5.1}% {}", self.percentage, format_price(self.value)),
                self.theme.bar_label,
            ));
        }
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_share_bar_half() {
        let theme = Theme::dark();
        let bar = ShareBar::new(50, 100, theme.info, &theme).with_width(10);
        assert_eq!(bar.percentage, 50.0);
        assert_eq!(bar.filled_columns(), 5);

        let line = bar.to_line();
        assert_eq!(line.spans[0].content, "█████");
        assert_eq!(line.spans[1].content, "░░░░░");
        assert!(text(&line).contains("50.0% $50"));
    }

    #[test]
    fn test_share_bar_zero_total() {
        let theme = Theme::dark();
        let bar = ShareBar::new(10, 0, theme.info, &theme).with_width(8);
        assert_eq!(bar.percentage, 0.0);
        assert_eq!(bar.to_line().spans[1].content.chars().count(), 8);
    }

    #[test]
    fn test_share_bar_full_and_clamped() {
        let theme = Theme::dark();
        let bar = ShareBar::new(200, 100, theme.info, &theme).with_width(4);
        assert_eq!(bar.percentage, 100.0);
        let line = bar.to_line();
        assert_eq!(line.spans[0].content, "████");
        assert_eq!(line.spans[1].content, "");
    }

    #[test]
    fn test_share_bar_without_label() {
        let theme = Theme::classic();
        let mut bar = ShareBar::new(1, 4, theme.info, &theme).with_width(4);
        bar.config.show_label = false;
        assert_eq!(bar.to_line().spans.len(), 2);
    }
}
