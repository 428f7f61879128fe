//! Recorded build snapshots.
//!
//! A snapshot carries everything the analysis needs from outside the graph
//! crate: the group configuration, the tables the build engine produced and
//! the asset database answers.
//!
//! ```json
//! {
//!   "groups": [{ "id": "g1", "name": "Characters", "schema": { "mode": "pack_together" }, "entries": [] }],
//!   "tables": {
//!     "file_to_bundle": { "CAB-1": "characters_assets_all.bundle" },
//!     "file_to_objects": { "CAB-1": [{ "guid": "e1", "local_id": 0 }] },
//!     "asset_to_files": { "e1": ["CAB-1"] },
//!     "group_to_bundles": { "g1": ["characters_assets_all.bundle"] }
//!   },
//!   "database": {
//!     "assets": { "e1": "Assets/Hero.prefab" },
//!     "dependencies": { "Assets/Hero.prefab": ["Assets/Hero.mat"] }
//!   }
//! }
//! ```

use std::path::Path;

use bundlescan_graph::{BuildTables, GroupCatalog, RecordedBuild, StaticAssetDatabase};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result, ResultExt};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    #[serde(default)]
    pub groups: GroupCatalog,
    #[serde(default)]
    pub tables: BuildTables,
    #[serde(default)]
    pub database: StaticAssetDatabase,
}

impl Snapshot {
    /// Read and parse a snapshot file.
    ///
    /// # Errors
    ///
    /// [`CliError::FileNotFound`] when the file does not exist and
    /// [`CliError::InvalidSnapshot`] when it does not parse. Misaligned build
    /// tables are reported as a parse failure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_path(path)?;
        let snapshot = Self::from_json(&content).map_err(|err| CliError::InvalidSnapshot {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        debug!(
            path = %path.display(),
            groups = snapshot.groups.groups().len(),
            files = snapshot.tables.files.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// A build engine that replays this snapshot's tables.
    pub fn engine(&self) -> RecordedBuild {
        RecordedBuild::new(self.tables.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
        "groups": [
            { "id": "g1", "name": "Characters", "schema": { "mode": "pack_together" },
              "entries": [{ "id": "e1", "path": "Assets/Hero.prefab" }] }
        ],
        "tables": {
            "file_to_bundle": { "CAB-1": "characters_assets_all.bundle" },
            "file_to_objects": { "CAB-1": [{ "guid": "e1", "local_id": 1 }, { "guid": "i1" }] },
            "asset_to_files": { "e1": ["CAB-1"] },
            "group_to_bundles": { "g1": ["characters_assets_all.bundle"] }
        },
        "database": {
            "assets": { "i1": "Assets/Hero.mat" },
            "dependencies": { "Assets/Hero.prefab": ["Assets/Hero.mat"] }
        }
    }"#;

    #[test]
    fn parses_all_sections() {
        let snapshot = Snapshot::from_json(MINIMAL).unwrap();
        assert_eq!(snapshot.groups.groups().len(), 1);
        assert_eq!(snapshot.tables.files.len(), 1);
        assert_eq!(snapshot.tables.files[0].objects.len(), 2);
        assert_eq!(snapshot.tables.files[0].objects[1].local_id, 0);
    }

    #[test]
    fn every_section_is_optional() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert!(snapshot.groups.is_empty());
        assert!(snapshot.tables.is_empty());
    }

    #[test]
    fn misaligned_tables_do_not_parse() {
        let content = r#"{ "tables": {
            "file_to_bundle": { "CAB-1": "a.bundle", "CAB-2": "b.bundle" },
            "file_to_objects": { "CAB-1": [] }
        } }"#;
        assert!(Snapshot::from_json(content).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Snapshot::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn load_reports_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Snapshot::load(&path).unwrap_err();
        assert!(matches!(err, CliError::InvalidSnapshot { .. }));
    }
}
