//! High-level configuration structure for bundlescan.
//!
//! For file discovery and layered loading, see the `discovery` module.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};
use crate::policy::{MissingBundlePolicy, NameExhaustionPolicy, UnresolvedDependencyPolicy};
use crate::settings::GlobalSettings;

/// Default first suffix tried by the unique-name resolver.
pub const DEFAULT_START_SUFFIX: u32 = 1;

/// Default attempt bound of the unique-name resolver.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub policies: PolicyConfig,

    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub filter: PathFilterConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub settings: GlobalSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub unresolved_dependency: UnresolvedDependencyPolicy,

    #[serde(default)]
    pub name_exhaustion: NameExhaustionPolicy,

    #[serde(default)]
    pub missing_bundle: MissingBundlePolicy,
}

/// Bounds for the unique-name resolver used during packing preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    #[serde(default = "default_start_suffix")]
    pub start_suffix: u32,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            start_suffix: DEFAULT_START_SUFFIX,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

fn default_start_suffix() -> u32 {
    DEFAULT_START_SUFFIX
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// Which asset paths are worth reporting as duplicates.
///
/// Scripts, editor-only content and `Resources` folders never end up in a
/// bundle the user can act on, so they are filtered out of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathFilterConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,

    #[serde(default = "default_true")]
    pub exclude_resources: bool,

    #[serde(default = "default_true")]
    pub exclude_editor: bool,

    /// Folder holding the packing configuration itself. Empty disables the
    /// rule.
    #[serde(default = "default_config_folder")]
    pub config_folder: String,

    /// Engine-provided resource files that are never user content.
    #[serde(default = "default_builtin_paths")]
    pub builtin_paths: Vec<String>,
}

impl Default for PathFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            excluded_extensions: default_excluded_extensions(),
            exclude_resources: true,
            exclude_editor: true,
            config_folder: default_config_folder(),
            builtin_paths: default_builtin_paths(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_excluded_extensions() -> Vec<String> {
    [".cs", ".js", ".boo", ".exe", ".dll", ".meta"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_config_folder() -> String {
    "Assets/AddressableAssetsData".to_string()
}

fn default_builtin_paths() -> Vec<String> {
    [
        "Library/unity editor resources",
        "Library/unity default resources",
        "Resources/unity_builtin_extra",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Also report duplicated assets that were explicitly added.
    #[serde(default)]
    pub include_addressable: bool,
}

impl AnalysisConfig {
    /// Create from serde_json::Value (for programmatic config).
    ///
    /// # Example
    ///
    /// ```
    /// use bundlescan_config::{AnalysisConfig, UnresolvedDependencyPolicy};
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "policies": { "unresolved_dependency": "fail" },
    ///     "naming": { "max_attempts": 10 }
    /// });
    ///
    /// let config = AnalysisConfig::from_value(value).unwrap();
    /// assert_eq!(config.policies.unresolved_dependency, UnresolvedDependencyPolicy::Fail);
    /// assert_eq!(config.naming.max_attempts, 10);
    /// assert_eq!(config.naming.start_suffix, 1);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid("config", e.to_string()))
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid("config", e.to_string()))
    }

    /// Render as `bundlescan.toml` contents.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::invalid("config", e.to_string()))
    }
}
