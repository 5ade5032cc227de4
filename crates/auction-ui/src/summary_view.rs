//! Summary statistics panel and its plain-text counterpart.

use std::fmt::Write as _;

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use auction_core::formatting::{format_currency, format_price};
use auction_core::models::Item;
use auction_data::aggregator::SummaryStats;
use auction_runtime::snapshot::DashboardSnapshot;

use crate::components::indicators::{category_checklist, StatIndicator};
use crate::table_view::truncate_to_width;
use crate::themes::Theme;

fn describe_item(item: Option<&Item>) -> String {
    match item {
        Some(item) => format!(
            "{} ({})",
            truncate_to_width(&item.title, 32),
            format_price(item.sold_price)
        ),
        None => "-".to_string(),
    }
}

/// Lines of the statistics block, one `label: value` pair each.
pub fn summary_lines<'a>(stats: &SummaryStats, theme: &'a Theme) -> Vec<Line<'a>> {
    vec![
        StatIndicator::new("Total Items", stats.total_items.to_string(), theme).to_line(),
        StatIndicator::new("Total Value", format_price(stats.total_value), theme).to_line(),
        StatIndicator::new("Average Price", format_currency(stats.average_price), theme).to_line(),
        StatIndicator::new(
            "Most Expensive",
            describe_item(stats.most_expensive.as_ref()),
            theme,
        )
        .to_line(),
        StatIndicator::new("Cheapest", describe_item(stats.cheapest.as_ref()), theme).to_line(),
        StatIndicator::new(
            "Most Common Category",
            stats.most_common_category_label(),
            theme,
        )
        .to_line(),
    ]
}

/// Render the sidebar: statistics on top, category checkboxes below.
pub fn render_summary_panel(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    theme: &Theme,
) {
    let mut lines = summary_lines(&snapshot.stats, theme);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Categories", theme.bold)));
    lines.extend(category_checklist(&snapshot.spec, theme));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Keyword: ", theme.label),
        Span::styled(
            if snapshot.spec.keyword.is_empty() {
                "(none)".to_string()
            } else {
                snapshot.spec.keyword.clone()
            },
            theme.info,
        ),
    ]));

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Summary "),
        ),
        area,
    );
}

/// Plain-text report of a snapshot for non-interactive output.
pub fn plain_report(snapshot: &DashboardSnapshot) -> String {
    let stats = &snapshot.stats;
    let mut out = String::new();

    let _ = writeln!(out, "{}", snapshot.summary.describe());
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Items:          {}", stats.total_items);
    let _ = writeln!(out, "Total Value:          {}", format_price(stats.total_value));
    let _ = writeln!(out, "Average Price:        {}", format_currency(stats.average_price));
    let _ = writeln!(
        out,
        "Most Expensive:       {}",
        describe_item(stats.most_expensive.as_ref())
    );
    let _ = writeln!(out, "Cheapest:             {}", describe_item(stats.cheapest.as_ref()));
    let _ = writeln!(
        out,
        "Most Common Category: {}",
        stats.most_common_category_label()
    );

    if !snapshot.breakdown.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "By category:");
        for row in &snapshot.breakdown {
            let _ = writeln!(
                out,
                "  {:<22} {:>5} items {:>12} {:>5.1}%",
                row.category.label(),
                row.count,
                format_price(row.total_value),
                row.share_of_value
            );
        }
    }

    for (heading, items) in [
        ("Most expensive", &snapshot.top_expensive),
        ("Cheapest", &snapshot.top_cheapest),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}:", heading, items.len());
        for (rank, item) in items.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>3}. {:<42} {:>10}",
                rank + 1,
                truncate_to_width(&item.title, 42),
                format_price(item.sold_price)
            );
        }
    }

    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
