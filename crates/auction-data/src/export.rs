//! CSV and HTML export of a filtered item table.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use auction_core::error::{DashboardError, Result};
use auction_core::formatting::{format_currency, format_price};
use auction_core::models::Item;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

/// Header order of the CSV export.
pub const CSV_HEADERS: [&str; 10] = [
    "Title",
    "Sold Price",
    "Estimated Low",
    "Estimated High",
    "Estimate Avg",
    "Estimated Price",
    "URL",
    "Image",
    "Category",
    "Log Sold Price",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Sold Price")]
    sold_price: u64,
    #[serde(rename = "Estimated Low")]
    estimated_low: u64,
    #[serde(rename = "Estimated High")]
    estimated_high: u64,
    #[serde(rename = "Estimate Avg")]
    estimated_average: f64,
    #[serde(rename = "Estimated Price")]
    estimated_price: &'a str,
    #[serde(rename = "URL")]
    url: &'a str,
    #[serde(rename = "Image")]
    image: &'a str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Log Sold Price")]
    log_sold_price: f64,
}

impl<'a> From<&'a Item> for CsvRow<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            title: &item.title,
            sold_price: item.sold_price,
            estimated_low: item.estimated_low,
            estimated_high: item.estimated_high,
            estimated_average: item.estimated_average,
            estimated_price: &item.estimated_price_raw,
            url: &item.detail_url,
            image: &item.image_url,
            category: item.category.label(),
            log_sold_price: item.log_sold_price,
        }
    }
}

/// Write `items` as CSV with a header row.
///
/// The header is written even when `items` is empty.
pub fn write_csv<W: Write>(items: &[Item], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer
        .write_record(CSV_HEADERS)
        .map_err(std::io::Error::from)?;
    for item in items {
        writer
            .serialize(CsvRow::from(item))
            .map_err(std::io::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render `items` as a self-contained HTML document holding one table.
///
/// All text is HTML-escaped; lot pages are linked with `target="_blank"`.
pub fn render_html_table(items: &[Item]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Auction Results</title>\n");
    html.push_str(
        "<style>table{border-collapse:collapse}th,td{border:1px solid #ccc;padding:4px 8px}\
         td.num{text-align:right}</style>\n",
    );
    html.push_str("</head>\n<body>\n<table>\n<thead>\n<tr>");
    for header in [
        "Title",
        "Sold Price",
        "Estimated Price",
        "Estimate Avg",
        "Category",
        "Link",
    ] {
        let _ = write!(html, "<th>{}</th>", header);
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for item in items {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td class=\"num\">{}</td><td>{}</td><td class=\"num\">{}</td>\
             <td>{}</td><td><a href=\"{}\" target=\"_blank\">Open</a></td></tr>",
            escape_html(&item.title),
            format_price(item.sold_price),
            escape_html(&item.estimated_price_raw),
            format_currency(item.estimated_average),
            escape_html(item.category.label()),
            escape_html(&item.detail_url),
        );
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

/// Write the CSV export to `path`.
pub fn export_csv(path: &Path, items: &[Item]) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| export_error(path, e))?;
    write_csv(items, file).map_err(|e| export_error(path, e))?;
    info!(path = %path.display(), rows = items.len(), "wrote CSV export");
    Ok(())
}

/// Write the HTML export to `path`.
pub fn export_html(path: &Path, items: &[Item]) -> Result<()> {
    let html = render_html_table(items);
    std::fs::write(path, html).map_err(|e| export_error(path, e))?;
    info!(path = %path.display(), rows = items.len(), "wrote HTML export");
    Ok(())
}

/// Minimal escaping for text and attribute positions.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn export_error(path: &Path, err: impl std::fmt::Display) -> DashboardError {
    debug!(path = %path.display(), error = %err, "export failed");
    DashboardError::Export {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
