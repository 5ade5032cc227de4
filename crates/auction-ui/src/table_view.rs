//! Item table view for the auction dashboard.
//!
//! Renders the filtered subset as a bordered [`ratatui::widgets::Table`] with
//! a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use auction_core::formatting::{format_currency, format_price, format_signed_percent};
use auction_core::models::Item;
use auction_data::aggregator::SummaryStats;

use crate::themes::Theme;

/// Display width reserved for the title column.
pub const TITLE_WIDTH: usize = 40;

/// Shorten `text` to at most `max_width` terminal columns, ending with `…`
/// when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Render the item table into `area`.
///
/// `state` carries the selected row so the table scrolls with the cursor.
pub fn render_items_table(
    frame: &mut Frame,
    area: Rect,
    items: &[Item],
    stats: &SummaryStats,
    state: &mut TableState,
    theme: &Theme,
) {
    let header_cells = [
        "Title",
        "Sold",
        "Estimate",
        "Est. Avg",
        "vs Est.",
        "Category",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let mut rows: Vec<Row> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let delta = item.estimate_delta_percent();
            Row::new(vec![
                Cell::from(truncate_to_width(&item.title, TITLE_WIDTH)),
                Cell::from(format_price(item.sold_price)).style(theme.price_style(item.sold_price)),
                Cell::from(item.estimated_price_raw.clone()),
                Cell::from(format_currency(item.estimated_average)),
                Cell::from(delta.map_or_else(|| "-".to_string(), format_signed_percent))
                    .style(theme.delta_style(delta.unwrap_or(0.0))),
                Cell::from(item.category.label()).style(theme.category_style(item.category)),
            ])
            .style(style)
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from("TOTAL").style(theme.table_total),
            Cell::from(format_price(stats.total_value)),
            Cell::from(""),
            Cell::from(format!("avg {}", format_currency(stats.average_price))),
            Cell::from(""),
            Cell::from(format!("{} items", stats.total_items)),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(TITLE_WIDTH as u16 + 1),
        Constraint::Length(11),
        Constraint::Length(18),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Data Table "),
        )
        .row_highlight_style(theme.tab_active)
        .style(theme.text);

    frame.render_stateful_widget(table, area, state);
}

/// Render the placeholder shown when the filter matches nothing.
pub fn render_no_results(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No items match the current filters", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'a' to select every category or '/' to change the keyword.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" No Results "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use auction_core::pricing::Estimate;
    use auction_data::aggregator::summarize;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_items() -> Vec<Item> {
        vec![
            Item::new(
                "Signed Script",
                1000,
                Estimate {
                    low: 800,
                    high: 1200,
                },
                "$800 - $1,200",
                "",
                "",
            ),
            Item::new(
                "A very long lot title that keeps going well beyond the column width",
                50,
                Estimate { low: 0, high: 0 },
                "$0",
                "",
                "",
            ),
        ]
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_to_width("Mug", 10), "Mug");
        assert_eq!(truncate_to_width("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_long_text() {
        let out = truncate_to_width("Signed Script Collection", 10);
        assert_eq!(out, "Signed Sc…");
        assert_eq!(out.width(), 10);
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each CJK glyph is two columns wide.
        let out = truncate_to_width("日本語のタイトル", 7);
        assert!(out.width() <= 7, "{out}");
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_render_items_table() {
        let backend = TestBackend::new(120, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let items = make_items();
        let stats = summarize(&items);
        let mut state = TableState::default();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_items_table(frame, area, &items, &stats, &mut state, &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Signed Script"));
        assert!(text.contains("$1,000"));
        assert!(text.contains("TOTAL"));
    }

    #[test]
    fn test_render_empty_table_does_not_panic() {
        let backend = TestBackend::new(120, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let mut state = TableState::default();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_items_table(frame, area, &[], &SummaryStats::default(), &mut state, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_no_results() {
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_results(frame, area, &theme);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("No items match"));
    }
}
