//! Filter over asset paths deciding which duplicates are worth reporting.

use bundlescan_config::PathFilterConfig;

/// Decides whether an asset path is user content that can be acted on.
///
/// Scripts, editor-only folders, `Resources` folders, engine built-ins and
/// the packing configuration itself are never reported.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    config: PathFilterConfig,
}

impl PathFilter {
    pub fn new(config: PathFilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PathFilterConfig {
        &self.config
    }

    /// Whether `path` passes the filter. Backslashes are treated as
    /// separators.
    pub fn accepts(&self, path: &str) -> bool {
        if !self.config.enabled {
            return true;
        }

        let path = path.replace('\\', "/");
        self.is_valid_entry_path(&path) && !(self.config.exclude_resources && in_resources(&path))
    }

    fn is_valid_entry_path(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }

        if !starts_with_ignore_case(path, "assets") && !is_package_asset(path) {
            return false;
        }

        if self.config.builtin_paths.iter().any(|builtin| builtin == path) {
            return false;
        }

        if self.config.exclude_editor && (path.ends_with("/Editor") || path.contains("/Editor/")) {
            return false;
        }

        if path == "Assets" {
            return false;
        }

        let folder = self.config.config_folder.as_str();
        if !folder.is_empty() && path.starts_with(folder) {
            return false;
        }

        match extension(path) {
            Some(ext) => !self
                .config
                .excluded_extensions
                .iter()
                .any(|excluded| excluded.eq_ignore_ascii_case(ext)),
            None => true,
        }
    }
}

fn starts_with_ignore_case(path: &str, prefix: &str) -> bool {
    path.len() >= prefix.len()
        && path.is_char_boundary(prefix.len())
        && path[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// `Packages/<name>/<file>` where the file is not the package manifest.
fn is_package_asset(path: &str) -> bool {
    let lower = path.to_lowercase();
    let segments: Vec<&str> = lower.split('/').collect();
    segments.len() >= 3 && segments[0] == "packages" && segments[2] != "package.json"
}

fn in_resources(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower.contains("/resources/") || lower.starts_with("resources/")
}

/// Extension of the last path segment including the dot.
fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rfind('.').map(|i| &name[i..])
}
