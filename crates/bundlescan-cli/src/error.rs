//! Error handling for the bundlescan CLI.
//!
//! Library errors convert into [`CliError`] through `#[from]`, commands
//! return [`Result`], and `main` turns the final error into a miette report
//! with [`cli_error_to_miette`].
//!
//! # Example
//!
//! ```rust,no_run
//! use bundlescan_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_snapshot(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Record a build snapshot first")
//! }
//! ```

mod report;

use std::path::PathBuf;
use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be found, loaded or validated
    #[error("Configuration error: {0}")]
    Config(#[from] bundlescan_config::ConfigError),

    /// The analysis aborted
    #[error("Analysis failed: {0}")]
    Graph(#[from] bundlescan_graph::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The snapshot file is not a valid build snapshot
    #[error("Invalid snapshot {}: {message}\n\nHint: A snapshot is a JSON object with optional 'groups', 'tables' and 'database' sections", .path.display())]
    InvalidSnapshot {
        /// Snapshot that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlescan_config::ConfigError;
    use bundlescan_graph::AssetId;

    #[test]
    fn test_cli_error_from_config_error() {
        let config_err = ConfigError::NotFound(PathBuf::from("bundlescan.toml"));
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert!(cli_err.to_string().contains("bundlescan.toml"));
    }

    #[test]
    fn test_cli_error_from_graph_error() {
        let graph_err = bundlescan_graph::Error::ExplicitAssetNotConfigured {
            id: AssetId::new("abc").unwrap(),
        };
        let cli_err: CliError = graph_err.into();
        assert!(matches!(cli_err, CliError::Graph(_)));
        assert!(cli_err.to_string().starts_with("Analysis failed"));
    }

    #[test]
    fn test_invalid_snapshot_has_hint() {
        let err = CliError::InvalidSnapshot {
            path: PathBuf::from("build.json"),
            message: "expected value".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("build.json"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/snapshot.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_path_keeps_other_io_errors() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));

        let err = result.with_path("/test/snapshot.json").unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("bundlescan.toml")));

        let err = result.with_hint("Try creating the file").unwrap_err();
        assert!(err.to_string().contains("Hint: Try creating the file"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("bundlescan.toml")));

        let err = result.context("Failed to load settings").unwrap_err();
        assert!(err.to_string().starts_with("Failed to load settings: "));
    }
}
