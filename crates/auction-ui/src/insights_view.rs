//! Insights tab: top lots against their estimates, estimate performance and
//! the price distribution.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

use auction_core::formatting::{format_currency, format_price, format_signed_percent};
use auction_data::analysis::{EstimateComparison, EstimateInsights, HistogramBin};
use auction_runtime::snapshot::DashboardSnapshot;

use crate::components::progress_bar::ShareBar;
use crate::table_view::truncate_to_width;
use crate::themes::Theme;

/// Dumbbell-style rows: a bar scaled to the largest sale, then the estimate
/// and the delta.
pub fn comparison_lines<'a>(rows: &[EstimateComparison], theme: &'a Theme) -> Vec<Line<'a>> {
    let max = rows.iter().map(|r| r.sold_price).max().unwrap_or(0);
    rows.iter()
        .map(|row| {
            let mut bar = ShareBar::new(row.sold_price, max, theme.price_style(row.sold_price), theme)
                .with_width(20);
            bar.config.show_label = false;

            let mut spans = vec![Span::styled(
                format!("{:<30} ", truncate_to_width(&row.title, 30)),
                theme.text,
            )];
            spans.extend(bar.to_line().spans);
            spans.push(Span::styled(
                format!(" {:>10}", format_price(row.sold_price)),
                theme.value,
            ));
            spans.push(Span::styled(
                format!("  est {:>9}", format_currency(row.estimated_average)),
                theme.dim,
            ));
            spans.push(Span::styled(
                format!("  {:>+.0}", row.delta),
                theme.delta_style(row.delta),
            ));
            Line::from(spans)
        })
        .collect()
}

/// Above/below estimate summary.
pub fn insight_lines<'a>(insights: &EstimateInsights, theme: &'a Theme) -> Vec<Line<'a>> {
    vec![
        Line::from(vec![
            Span::styled("Sold above estimate: ", theme.label),
            Span::styled(
                format!(
                    "{} ({:.1}%)",
                    insights.above_estimate, insights.above_percentage
                ),
                theme.success,
            ),
            Span::styled("   average premium ", theme.label),
            Span::styled(
                format_signed_percent(insights.average_premium),
                theme.success,
            ),
        ]),
        Line::from(vec![
            Span::styled("Sold below estimate: ", theme.label),
            Span::styled(
                format!(
                    "{} ({:.1}%)",
                    insights.below_estimate, insights.below_percentage
                ),
                theme.error,
            ),
            Span::styled("   average discount ", theme.label),
            Span::styled(
                format_signed_percent(-insights.average_discount),
                theme.error,
            ),
        ]),
        Line::from(vec![
            Span::styled("Total estimate range: ", theme.label),
            Span::styled(
                format!(
                    "{} - {}",
                    format_price(insights.total_estimated_low),
                    format_price(insights.total_estimated_high)
                ),
                theme.value,
            ),
        ]),
    ]
}

/// Bucket counts for the sparkline.
pub fn histogram_counts(bins: &[HistogramBin]) -> Vec<u64> {
    bins.iter().map(|b| b.count as u64).collect()
}

pub fn render_insights_view(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(5),
            Constraint::Length(6),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Text::from(comparison_lines(&snapshot.comparison, theme))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(
                    " Top {} by Sold Price vs Estimate ",
                    snapshot.comparison.len()
                )),
        ),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(Text::from(insight_lines(&snapshot.insights, theme))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Estimate Performance "),
        ),
        chunks[1],
    );

    let counts = histogram_counts(&snapshot.histogram);
    let range = match (snapshot.histogram.first(), snapshot.histogram.last()) {
        (Some(first), Some(last)) => format!(
            " Price Distribution (log) {} - {} ",
            format_price(first.lower.max(0.0).round() as u64),
            format_price(last.upper.max(0.0).round() as u64)
        ),
        _ => " Price Distribution (log) ".to_string(),
    };
    frame.render_widget(
        Sparkline::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.table_border)
                    .title(range),
            )
            .data(&counts)
            .style(theme.info),
        chunks[2],
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
