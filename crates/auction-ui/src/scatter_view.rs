//! Scatter tab: estimate average against sold price, one series per category.
//!
//! The x axis is `log10(estimate + 1)` so lots from a few dollars to tens of
//! thousands fit on one chart.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use auction_core::formatting::format_price;
use auction_data::analysis::ScatterSeries;

use crate::themes::Theme;

/// Chart-space points for each series: `(log10(estimate + 1), sold_price)`.
pub fn chart_points(series: &[ScatterSeries]) -> Vec<Vec<(f64, f64)>> {
    series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|p| ((p.estimated_average + 1.0).log10(), p.sold_price as f64))
                .collect()
        })
        .collect()
}

/// `[min, max]` of the x and y values over every point, padded so a single
/// point still spans a visible range.
pub fn chart_bounds(points: &[Vec<(f64, f64)>]) -> ([f64; 2], [f64; 2]) {
    let mut x = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y = [0.0, f64::NEG_INFINITY];
    for &(px, py) in points.iter().flatten() {
        x[0] = x[0].min(px);
        x[1] = x[1].max(px);
        y[1] = y[1].max(py);
    }
    if !x[0].is_finite() {
        return ([0.0, 1.0], [0.0, 1.0]);
    }
    x[0] = x[0].floor();
    x[1] = x[1].ceil().max(x[0] + 1.0);
    y[1] = (y[1] * 1.05).max(1.0);
    (x, y)
}

/// Dollar label for a log-axis tick.
fn log_tick(value: f64) -> String {
    format_price((10f64.powf(value) - 1.0).max(0.0).round() as u64)
}

pub fn render_scatter_view(frame: &mut Frame, area: Rect, series: &[ScatterSeries], theme: &Theme) {
    let points = chart_points(series);
    let (x_bounds, y_bounds) = chart_bounds(&points);

    let datasets: Vec<Dataset> = series
        .iter()
        .zip(points.iter())
        .map(|(s, data)| {
            Dataset::default()
                .name(s.category.label())
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme.category_color(s.category)))
                .data(data)
        })
        .collect();

    let x_mid = (x_bounds[0] + x_bounds[1]) / 2.0;
    let x_axis = Axis::default()
        .title(Span::styled("Estimate (log)", theme.label))
        .style(theme.dim)
        .bounds(x_bounds)
        .labels(vec![log_tick(x_bounds[0]), log_tick(x_mid), log_tick(x_bounds[1])]);
    let y_axis = Axis::default()
        .title(Span::styled("Sold", theme.label))
        .style(theme.dim)
        .bounds(y_bounds)
        .labels(vec![
            format_price(0),
            format_price((y_bounds[1] / 2.0) as u64),
            format_price(y_bounds[1] as u64),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Estimate vs Sold Price "),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
