//! Shared utilities for command implementations.

use std::path::Path;

use bundlescan_config::{AnalysisConfig, ConfigDiscovery, GlobalSettings};
use tracing::debug;

use crate::error::{Result, ResultExt};

/// Load the configuration for a command.
///
/// An explicit `--config` path must exist. Without one, `bundlescan.toml` in
/// the working directory is used when present, otherwise defaults. The
/// environment overrides both.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            Ok(ConfigDiscovery::load_from(path)?)
        }
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            Ok(ConfigDiscovery::new(cwd).load_or_default()?)
        }
    }
}

/// Global settings only, falling back to defaults when the configuration
/// cannot be loaded.
pub fn load_settings(path: Option<&Path>) -> GlobalSettings {
    load_config(path)
        .map(|config| config.settings)
        .unwrap_or_default()
}

/// Write a command output file.
pub fn write_output(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).with_path(parent)?;
        }
    }
    std::fs::write(path, contents)
        .with_path(path)
        .with_hint("Check that the output location is writable")
}
