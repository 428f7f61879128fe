//! Group configuration: the packing groups a project defines and the asset
//! entries explicitly placed in them.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::{AssetId, GroupId};

/// How a group splits its entries into bundles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    /// Every entry of the group goes into one bundle.
    #[default]
    PackTogether,
    /// One bundle per entry.
    PackSeparately,
    /// One bundle per distinct label set.
    PackTogetherByLabel,
}

/// Packing schema attached to a group. Groups without one are not built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingSchema {
    #[serde(default)]
    pub mode: PackingMode,
}

/// An asset explicitly placed in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub id: AssetId,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub is_sub_asset: bool,
    #[serde(default)]
    pub is_scene: Option<bool>,
}

impl AssetEntry {
    pub fn new(id: AssetId, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            address: None,
            labels: BTreeSet::new(),
            read_only: false,
            is_sub_asset: false,
            is_scene: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub schema: Option<PackingSchema>,
    #[serde(default)]
    pub entries: Vec<AssetEntry>,
}

impl GroupConfig {
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_default: false,
            is_read_only: false,
            schema: None,
            entries: Vec::new(),
        }
    }

    pub fn with_schema(mut self, schema: PackingSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_entry(mut self, entry: AssetEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// Ordered set of configured groups with an index over their entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GroupConfig>", into = "Vec<GroupConfig>")]
pub struct GroupCatalog {
    groups: Vec<GroupConfig>,
    entries: HashMap<AssetId, (usize, usize)>,
}

impl GroupCatalog {
    pub fn new(groups: Vec<GroupConfig>) -> Self {
        let mut entries = HashMap::default();
        for (g, group) in groups.iter().enumerate() {
            for (e, entry) in group.entries.iter().enumerate() {
                // first group to claim an asset owns the entry
                entries.entry(entry.id.clone()).or_insert((g, e));
            }
        }
        Self { groups, entries }
    }

    pub fn groups(&self) -> &[GroupConfig] {
        &self.groups
    }

    pub fn group(&self, id: &GroupId) -> Option<&GroupConfig> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// Look up the configured entry for an asset across all groups.
    pub fn find_entry(&self, id: &AssetId) -> Option<&AssetEntry> {
        let &(g, e) = self.entries.get(id)?;
        self.groups.get(g)?.entries.get(e)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl From<Vec<GroupConfig>> for GroupCatalog {
    fn from(groups: Vec<GroupConfig>) -> Self {
        Self::new(groups)
    }
}

impl From<GroupCatalog> for Vec<GroupConfig> {
    fn from(catalog: GroupCatalog) -> Self {
        catalog.groups
    }
}
