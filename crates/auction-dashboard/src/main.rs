mod bootstrap;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use auction_core::models::Item;
use auction_core::settings::Settings;
use auction_data::export::{export_csv, export_html};
use auction_runtime::data_manager::DataManager;
use auction_runtime::snapshot::build_snapshot;
use auction_ui::app::App;
use auction_ui::summary_view::plain_report;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let app_dir = bootstrap::ensure_directories()?;
    let log_file = settings.log_file.clone().or_else(|| {
        (settings.view == "dashboard").then(|| bootstrap::default_log_file(&app_dir))
    });
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Auction Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, View: {}, Theme: {}",
        settings.data_file.display(),
        settings.view,
        settings.theme
    );

    let policy = settings.malformed_policy();
    let spec = settings.filter_spec()?;
    let top_n = settings.top_n as usize;

    let mut manager = DataManager::new(&settings.data_file, policy);
    let report = manager
        .get_data(false)
        .with_context(|| format!("failed to load {}", settings.data_file.display()))?;
    tracing::info!(
        items = report.metadata.items_loaded,
        skipped = report.metadata.records_skipped,
        seconds = report.metadata.load_time_seconds,
        "dataset loaded"
    );
    for skipped in &report.skipped {
        tracing::warn!(index = skipped.index, reason = %skipped.reason, "record skipped");
    }
    let items = report.items.clone();
    let content_hash = manager.current_hash().unwrap_or_default();

    match settings.view.as_str() {
        "dashboard" => {
            let snapshot = build_snapshot(&items, &spec, top_n);
            write_exports(&settings, &snapshot.items, None)?;

            let app = App::new(&settings.theme, items, content_hash, spec, top_n);
            app.run().context("terminal UI failed")?;
        }

        "summary" => {
            let snapshot = build_snapshot(&items, &spec, top_n);
            print!("{}", plain_report(&snapshot));
            write_exports(&settings, &snapshot.items, None)?;
        }

        "export" => {
            let snapshot = build_snapshot(&items, &spec, top_n);
            let written = write_exports(&settings, &snapshot.items, Some(&app_dir))?;
            println!("{}", snapshot.summary.describe());
            for path in written {
                println!("Wrote {}", path.display());
            }
        }

        unknown => anyhow::bail!("unknown view mode: {}", unknown),
    }

    Ok(())
}

/// Write the requested exports of `items`.
///
/// With `default_root` set and no explicit targets, both formats are written
/// under `default_root/exports`.
fn write_exports(
    settings: &Settings,
    items: &[Item],
    default_root: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut csv_target = settings.export_csv.clone();
    let mut html_target = settings.export_html.clone();
    if let Some(root) = default_root {
        if csv_target.is_none() && html_target.is_none() {
            csv_target = Some(bootstrap::default_export_file(root, "csv"));
            html_target = Some(bootstrap::default_export_file(root, "html"));
        }
    }

    let mut written = Vec::new();
    if let Some(path) = csv_target {
        export_csv(&path, items)?;
        written.push(path);
    }
    if let Some(path) = html_target {
        export_html(&path, items)?;
        written.push(path);
    }
    Ok(written)
}
