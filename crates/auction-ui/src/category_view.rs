//! Categories tab: each category's share of sold value, with its biggest lots.

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use auction_core::formatting::format_price;
use auction_data::aggregator::CategoryBreakdown;
use auction_data::analysis::TreemapNode;

use crate::components::progress_bar::ShareBar;
use crate::table_view::truncate_to_width;
use crate::themes::Theme;

/// Leaves listed under each category node.
pub const LEAVES_PER_CATEGORY: usize = 3;

/// Build the category lines: one share bar per node followed by its largest
/// leaves.
pub fn category_lines<'a>(
    nodes: &[TreemapNode],
    breakdown: &[CategoryBreakdown],
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let total: u64 = nodes.iter().map(|n| n.value).sum();
    let mut lines = Vec::new();

    for node in nodes {
        let count = breakdown
            .iter()
            .find(|b| b.category == node.category)
            .map_or(node.leaves.len(), |b| b.count);

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<22}", node.category.label()),
                theme.category_style(node.category),
            ),
            Span::styled(format!(" {:>4} items ", count), theme.dim),
        ]));

        let mut bar_line = vec![Span::raw("  ")];
        bar_line.extend(
            ShareBar::new(node.value, total, theme.category_style(node.category), theme)
                .to_line()
                .spans,
        );
        lines.push(Line::from(bar_line));

        let mut leaves: Vec<_> = node.leaves.iter().collect();
        leaves.sort_by(|a, b| b.value.cmp(&a.value));
        for leaf in leaves.into_iter().take(LEAVES_PER_CATEGORY) {
            lines.push(Line::from(vec![
                Span::styled("    • ", theme.dim),
                Span::styled(truncate_to_width(&leaf.title, 40), theme.text),
                Span::styled(format!("  {}", format_price(leaf.value)), theme.price_style(leaf.value)),
            ]));
        }
    }
    lines
}

pub fn render_category_view(
    frame: &mut Frame,
    area: Rect,
    nodes: &[TreemapNode],
    breakdown: &[CategoryBreakdown],
    theme: &Theme,
) {
    frame.render_widget(
        Paragraph::new(Text::from(category_lines(nodes, breakdown, theme))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Categories by Sold Value "),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use auction_core::models::Item;
    use auction_core::pricing::Estimate;
    use auction_data::aggregator::category_breakdown;
    use auction_data::analysis::treemap;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn items() -> Vec<Item> {
        [
            ("Mug", 10u64),
            ("Red Chair", 300),
            ("Cup", 20),
            ("Blue Chair", 100),
            ("Espresso Cup", 5),
            ("Tea Cup", 1),
        ]
        .into_iter()
        .map(|(t, p)| {
            Item::new(
                t,
                p,
                Estimate { low: p, high: p },
                format!("${}", p),
                "",
                "",
            )
        })
        .collect()
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_category_lines_order_and_leaves() {
        let theme = Theme::dark();
        let items = items();
        let lines: Vec<String> = category_lines(&treemap(&items), &category_breakdown(&items), &theme)
            .iter()
            .map(text)
            .collect();

        // Furniture (400) first, then Kitchen (36).
        assert!(lines[0].starts_with("Furniture"));
        assert!(lines[0].contains("2 items"));
        assert!(lines[2].contains("Red Chair"));
        assert!(lines[3].contains("Blue Chair"));

        let kitchen = lines.iter().position(|l| l.starts_with("Coffee & Kitchen")).unwrap();
        assert!(lines[kitchen].contains("4 items"));
        // Only the three largest kitchen lots are listed.
        let listed = lines[kitchen + 2..].iter().filter(|l| l.contains('•')).count();
        assert_eq!(listed, LEAVES_PER_CATEGORY);
        assert!(!lines.iter().any(|l| l.contains("Tea Cup")));
    }

    #[test]
    fn test_category_lines_empty() {
        let theme = Theme::dark();
        assert!(category_lines(&[], &[], &theme).is_empty());
    }

    #[test]
    fn test_render_category_view() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let items = items();
        let nodes = treemap(&items);
        let breakdown = category_breakdown(&items);

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_category_view(frame, area, &nodes, &breakdown, &theme);
            })
            .unwrap();
    }
}
