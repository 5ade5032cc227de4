use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::categories::Category;
use crate::error::{DashboardError, Result};
use crate::filter_spec::{FilterSpec, PriceRange};
use crate::models::MalformedPolicy;

/// Default source dataset, resolved relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "auction_data.json";

/// Accepted `--view` values.
pub const VIEWS: [&str; 3] = ["dashboard", "summary", "export"];

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive explorer for auction results
#[derive(Parser, Debug, Clone)]
#[command(
    name = "auction-dashboard",
    about = "Interactive explorer for auction results",
    version
)]
pub struct Settings {
    /// Source JSON dataset
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = VIEWS)]
    pub view: String,

    /// Restrict to a category label (repeatable; default is every category)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Case-insensitive keyword to search for in titles
    #[arg(long, default_value = "")]
    pub keyword: String,

    /// Minimum sold price (inclusive)
    #[arg(long)]
    pub min_price: Option<u64>,

    /// Maximum sold price (inclusive)
    #[arg(long)]
    pub max_price: Option<u64>,

    /// Number of lots in top / bottom rankings (1-100)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub top_n: u32,

    /// What to do with records whose prices cannot be parsed
    #[arg(long, value_enum, default_value_t = MalformedPolicy::Abort)]
    pub on_malformed: MalformedPolicy,

    /// Write the filtered lots to a CSV file
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Write the filtered lots to a self-contained HTML table
    #[arg(long)]
    pub export_html: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.auction-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_malformed: Option<MalformedPolicy>,
}

impl LastUsedParams {
    /// Default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".auction-dashboard").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "ignoring unreadable last-used params");
            Self::default()
        })
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with an explicit argument
    /// list and config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "failed to clear saved configuration");
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over saved values.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            // Saved files bypass clap validation.
            if let Some(v) = last.view.filter(|v| VIEWS.contains(&v.as_str())) {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "data_file") {
            if let Some(v) = last.data_file {
                settings.data_file = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "top_n") {
            if let Some(v) = last.top_n.filter(|n| (1..=100).contains(n)) {
                settings.top_n = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "on_malformed") {
            if let Some(v) = last.on_malformed {
                settings.on_malformed = v;
            }
        }

        settings = Self::apply_debug(settings);

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!(error = %e, "failed to persist last-used params");
        }

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Policy selected by `--on-malformed`.
    pub fn malformed_policy(&self) -> MalformedPolicy {
        self.on_malformed
    }

    /// Build the initial [`FilterSpec`] from the CLI filter flags.
    pub fn filter_spec(&self) -> Result<FilterSpec> {
        let categories = if self.categories.is_empty() {
            Category::ALL.into_iter().collect()
        } else {
            self.categories
                .iter()
                .map(|label| label.parse::<Category>())
                .collect::<Result<_>>()?
        };

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(DashboardError::Config(format!(
                    "--min-price {} is greater than --max-price {}",
                    min, max
                )));
            }
        }

        Ok(FilterSpec {
            categories,
            keyword: self.keyword.clone(),
            price_range: PriceRange::from_bounds(self.min_price, self.max_price),
        })
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            view: Some(s.view.clone()),
            data_file: Some(s.data_file.clone()),
            top_n: Some(s.top_n),
            on_malformed: Some(s.on_malformed),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
///
/// clap stores the arg id under the field name (underscores), not the long
/// flag spelling.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("auction-dashboard")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::parse_from(args(&[]));
        assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(settings.view, "dashboard");
        assert_eq!(settings.top_n, 10);
        assert_eq!(settings.on_malformed, MalformedPolicy::Abort);
        assert!(settings.categories.is_empty());
        assert_eq!(settings.filter_spec().unwrap(), FilterSpec::all());
    }

    #[test]
    fn test_filter_spec_from_flags() {
        let settings = Settings::parse_from(args(&[
            "--category",
            "Furniture",
            "--category",
            "coffee & kitchen",
            "--keyword",
            "Mug",
            "--min-price",
            "10",
        ]));
        let spec = settings.filter_spec().unwrap();
        assert_eq!(spec.categories.len(), 2);
        assert!(spec.is_selected(Category::Furniture));
        assert!(spec.is_selected(Category::Kitchen));
        assert_eq!(spec.keyword, "Mug");
        assert_eq!(spec.price_range, Some(PriceRange::new(10, u64::MAX)));
    }

    #[test]
    fn test_filter_spec_unknown_category() {
        let settings = Settings::parse_from(args(&["--category", "Boats"]));
        assert!(matches!(
            settings.filter_spec(),
            Err(DashboardError::Config(_))
        ));
    }

    #[test]
    fn test_filter_spec_inverted_range() {
        let settings = Settings::parse_from(args(&["--min-price", "50", "--max-price", "10"]));
        assert!(settings.filter_spec().is_err());
    }

    #[test]
    fn test_malformed_policy() {
        let settings = Settings::parse_from(args(&["--on-malformed", "skip"]));
        assert_eq!(settings.malformed_policy(), MalformedPolicy::Skip);
        assert!(Settings::try_parse_from(args(&["--on-malformed", "ignore"])).is_err());
    }

    #[test]
    fn test_top_n_range_enforced() {
        assert!(Settings::try_parse_from(args(&["--top-n", "0"])).is_err());
        assert!(Settings::try_parse_from(args(&["--top-n", "101"])).is_err());
    }

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            view: Some("summary".to_string()),
            data_file: Some(PathBuf::from("/data/lots.json")),
            top_n: Some(5),
            on_malformed: Some(MalformedPolicy::Skip),
        };
        params.save_to(&path).expect("save");

        let loaded = LastUsedParams::load_from(&path);
        assert_eq!(loaded.theme.as_deref(), Some("dark"));
        assert_eq!(loaded.view.as_deref(), Some("summary"));
        assert_eq!(loaded.data_file, Some(PathBuf::from("/data/lots.json")));
        assert_eq!(loaded.top_n, Some(5));
        assert_eq!(loaded.on_malformed, Some(MalformedPolicy::Skip));
    }

    #[test]
    fn test_load_from_missing_or_corrupt_returns_default() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        assert!(LastUsedParams::load_from(&path).theme.is_none());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert!(LastUsedParams::load_from(&path).view.is_none());
    }

    #[test]
    fn test_saved_values_fill_unset_args() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            theme: Some("light".to_string()),
            top_n: Some(25),
            ..Default::default()
        }
        .save_to(&path)
        .unwrap();

        let settings = Settings::load_with_last_used_impl(args(&[]), &path);
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.top_n, 25);
    }

    #[test]
    fn test_unknown_saved_view_is_ignored() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"view": "gallery", "top_n": 7}"#).unwrap();

        let settings = Settings::load_with_last_used_impl(args(&[]), &path);
        assert_eq!(settings.view, "dashboard");
        assert_eq!(settings.top_n, 7);
    }

    #[test]
    fn test_cli_wins_over_saved_values() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            theme: Some("light".to_string()),
            ..Default::default()
        }
        .save_to(&path)
        .unwrap();

        let settings = Settings::load_with_last_used_impl(args(&["--theme", "classic"]), &path);
        assert_eq!(settings.theme, "classic");

        // The explicit value is persisted for the next run.
        assert_eq!(
            LastUsedParams::load_from(&path).theme.as_deref(),
            Some("classic")
        );
    }

    #[test]
    fn test_clear_removes_file_and_debug_sets_level() {
        let tmp = TempDir::new().expect("tempdir");
        let path = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams::default().save_to(&path).unwrap();
        assert!(path.exists());

        let settings = Settings::load_with_last_used_impl(args(&["--clear", "--debug"]), &path);
        assert!(!path.exists());
        assert_eq!(settings.log_level, "DEBUG");
    }
}
