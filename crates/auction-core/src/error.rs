use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the auction dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The source dataset could not be opened or read from disk.
    #[error("Source file not found or unreadable {path}: {source}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A price or estimate string did not match the expected currency format.
    #[error("Invalid price value '{value}': {reason}")]
    PriceParse { value: String, reason: String },

    /// A record failed normalization and the load policy is to abort.
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// An export file could not be written.
    #[error("Failed to export {path}: {reason}")]
    Export { path: PathBuf, reason: String },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashboardError {
    /// Shorthand for a [`DashboardError::PriceParse`].
    pub fn price(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PriceParse {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_source_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::SourceNotFound {
            path: PathBuf::from("/some/lots.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Source file not found"));
        assert!(msg.contains("/some/lots.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_price_parse() {
        let err = DashboardError::price("$12a", "not numeric");
        assert_eq!(err.to_string(), "Invalid price value '$12a': not numeric");
    }

    #[test]
    fn test_error_display_malformed_record() {
        let err = DashboardError::MalformedRecord {
            index: 3,
            reason: "missing field `Title`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed record at index 3: missing field `Title`"
        );
    }

    #[test]
    fn test_error_display_export() {
        let err = DashboardError::Export {
            path: PathBuf::from("/tmp/out.csv"),
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to export /tmp/out.csv: disk full");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("unknown category 'Boats'".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown category 'Boats'"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
