//! File-based config discovery and layered loading.
//!
//! Sources are merged in increasing priority: built-in defaults, the
//! `bundlescan.toml` file, then `BUNDLESCAN_`-prefixed environment variables
//! (nested keys separated by `__`, e.g. `BUNDLESCAN_NAMING__MAX_ATTEMPTS=50`).

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format as _, Serialized, Toml};
use figment::Figment;

use crate::config::AnalysisConfig;
use crate::error::{ConfigError, Result};
use crate::validation::validate;

pub const CONFIG_FILE_NAME: &str = "bundlescan.toml";
pub const ENV_PREFIX: &str = "BUNDLESCAN_";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use bundlescan_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load_or_default().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find `bundlescan.toml` in the root directory.
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Load the discovered config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if there is no config file in the root.
    pub fn load(&self) -> Result<AnalysisConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        load_layered(Some(&path))
    }

    /// Load the discovered config file, or defaults plus environment when
    /// there is none.
    pub fn load_or_default(&self) -> Result<AnalysisConfig> {
        let path = self.find();
        if path.is_none() {
            tracing::debug!(root = %self.root.display(), "no {CONFIG_FILE_NAME}, using defaults");
        }
        load_layered(path.as_deref())
    }

    /// Load a specific file.
    pub fn load_from(path: &Path) -> Result<AnalysisConfig> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        load_layered(Some(path))
    }
}

/// Build the layered figment without extracting it.
pub fn layered_figment(file: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(AnalysisConfig::default()));
    if let Some(path) = file {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

fn load_layered(file: Option<&Path>) -> Result<AnalysisConfig> {
    let config: AnalysisConfig = layered_figment(file).extract()?;
    validate(&config)?;
    if let Some(path) = file {
        tracing::debug!(path = %path.display(), "loaded configuration");
    }
    Ok(config)
}

/// Discover and load config from the current directory.
pub fn discover() -> Result<AnalysisConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn find_discovers_toml_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[naming]\nmax_attempts = 3\n").unwrap();

        assert_eq!(ConfigDiscovery::new(dir.path()).find().unwrap(), config_path);
    }
}
