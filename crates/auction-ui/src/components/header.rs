use crate::themes::Theme;
use auction_data::filter::FilterSummary;
use ratatui::text::{Line, Span};

/// Application title shown on the first header line.
pub const TITLE: &str = "AUCTION RESULTS DASHBOARD";

/// Width of the `=` separator under the title.
pub const SEPARATOR_WIDTH: usize = 60;

/// Dashboard header rendering three lines:
///
/// 1. Application title.
/// 2. A 60-column `=` separator.
/// 3. Filter context: `[ Showing X of Y items | N categories | "keyword" ]`.
pub struct Header<'a> {
    pub summary: &'a FilterSummary,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(summary: &'a FilterSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let counts = format!(
            "Showing {} of {} items",
            self.summary.filtered_items, self.summary.total_items
        );
        let categories = match self.summary.selected_categories.len() {
            1 => "1 category".to_string(),
            n => format!("{} categories", n),
        };

        let mut info = vec![
            Span::styled("[ ", self.theme.label),
            Span::styled(counts, self.theme.value),
            Span::styled(" | ", self.theme.label),
            Span::styled(categories, self.theme.value),
        ];
        if !self.summary.keyword.is_empty() {
            info.push(Span::styled(" | ", self.theme.label));
            info.push(Span::styled(
                format!("\"{}\"", self.summary.keyword),
                self.theme.info,
            ));
        }
        info.push(Span::styled(" ]", self.theme.label));

        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            Line::from(info),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use auction_core::filter_spec::FilterSpec;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_lines() {
        let theme = Theme::dark();
        let summary = FilterSummary::new(&FilterSpec::all(), 340, 340);
        let lines = Header::new(&summary, &theme).to_lines();

        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), TITLE);
        assert_eq!(line_text(&lines[1]), "=".repeat(60));
        assert_eq!(
            line_text(&lines[2]),
            "[ Showing 340 of 340 items | 11 categories ]"
        );
    }

    #[test]
    fn test_header_with_keyword() {
        let theme = Theme::dark();
        let spec = FilterSpec::none()
            .with_categories([auction_core::categories::Category::Posters])
            .with_keyword("lamp");
        let summary = FilterSummary::new(&spec, 340, 12);
        let lines = Header::new(&summary, &theme).to_lines();

        assert_eq!(
            line_text(&lines[2]),
            "[ Showing 12 of 340 items | 1 category | \"lamp\" ]"
        );
    }
}
