use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the per-user state directory under `$HOME`.
pub const APP_DIR: &str = ".auction-dashboard";

/// File name used for the TUI's default log and export targets.
pub const DEFAULT_STEM: &str = "auction-dashboard";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.auction-dashboard`, or `./.auction-dashboard` without a home directory.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Ensure the standard `~/.auction-dashboard/` hierarchy exists.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    ensure_directories_in(&app_dir())
}

/// Create `root`, `root/logs` and `root/exports` if absent.
pub fn ensure_directories_in(root: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(root)?;
    std::fs::create_dir_all(root.join("logs"))?;
    std::fs::create_dir_all(root.join("exports"))?;
    Ok(root.to_path_buf())
}

/// Default log file used by the interactive dashboard, which owns the
/// terminal and cannot log to stderr.
pub fn default_log_file(root: &Path) -> PathBuf {
    root.join("logs").join(format!("{}.log", DEFAULT_STEM))
}

/// Default export target with the given extension.
pub fn default_export_file(root: &Path, extension: &str) -> PathBuf {
    root.join("exports")
        .join(format!("{}.{}", DEFAULT_STEM, extension))
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map upper-case level names (`WARNING`, `CRITICAL`) onto `tracing` directives.
pub fn normalise_level(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive,
/// falling back to `"info"` if unrecognised. With `log_file` set, output is
/// appended to that file without ANSI colours; otherwise it goes to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(normalise_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer().with_target(false).with_thread_ids(false);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()?;
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
