//! Identity-keyed records: assets, bundles and groups.
//!
//! Every record compares and hashes by its key field alone. Relationship
//! sets hold arena indices into the owning [`BuildGraph`](crate::BuildGraph)
//! and are only mutated through the graph, which keeps both directions of an
//! edge in sync.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::group::AssetEntry;
use crate::{AssetId, FxIndexSet, GroupId};

macro_rules! arena_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub(crate) usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_index!(
    /// Position of an [`AssetRecord`] in its graph.
    AssetIdx
);
arena_index!(
    /// Position of a [`BundleRecord`] in its graph.
    BundleIdx
);
arena_index!(
    /// Position of a [`GroupRecord`] in its graph.
    GroupIdx
);

/// Extension the engine uses for scene files.
const SCENE_EXTENSION: &str = ".unity";

/// Whether a project path names a scene file.
pub fn is_scene_path(path: &str) -> bool {
    path.len() >= SCENE_EXTENSION.len()
        && path.is_char_boundary(path.len() - SCENE_EXTENSION.len())
        && path[path.len() - SCENE_EXTENSION.len()..].eq_ignore_ascii_case(SCENE_EXTENSION)
}

/// One build-visible asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    id: AssetId,
    pub file_path: Option<String>,
    pub address: Option<String>,
    pub labels: BTreeSet<String>,
    pub is_read_only: bool,
    pub is_sub_asset: bool,
    pub is_scene_asset: bool,
    pub(crate) depends_on: FxIndexSet<AssetIdx>,
    pub(crate) depended_on_by: FxIndexSet<AssetIdx>,
    pub(crate) containing_bundles: FxIndexSet<BundleIdx>,
}

impl AssetRecord {
    pub fn builder(id: AssetId) -> AssetRecordBuilder {
        AssetRecordBuilder {
            id,
            file_path: None,
            address: None,
            labels: BTreeSet::new(),
            read_only: false,
            sub_asset: false,
            scene: None,
        }
    }

    /// Record for an explicitly configured entry.
    ///
    /// An entry with an empty path falls back to `fallback_path`.
    pub fn from_entry(entry: &AssetEntry, fallback_path: Option<String>) -> Self {
        let path = if entry.path.is_empty() {
            fallback_path
        } else {
            Some(entry.path.clone())
        };

        Self::builder(entry.id.clone())
            .file_path(path)
            .address(entry.address.clone())
            .labels(entry.labels.iter().cloned())
            .read_only(entry.read_only)
            .sub_asset(entry.is_sub_asset)
            .scene(entry.is_scene)
            .build()
    }

    pub fn id(&self) -> &AssetId {
        &self.id
    }

    /// An asset with a non-empty address was explicitly added to the build.
    pub fn is_addressable(&self) -> bool {
        self.address.as_deref().is_some_and(|a| !a.is_empty())
    }

    /// Packed into more than one bundle.
    pub fn is_duplicate(&self) -> bool {
        self.containing_bundles.len() > 1
    }

    /// Assets this one statically references.
    pub fn depends_on(&self) -> &FxIndexSet<AssetIdx> {
        &self.depends_on
    }

    /// Assets that reference this one.
    pub fn depended_on_by(&self) -> &FxIndexSet<AssetIdx> {
        &self.depended_on_by
    }

    pub fn containing_bundles(&self) -> &FxIndexSet<BundleIdx> {
        &self.containing_bundles
    }

    /// Human-facing label: the path when known, the id otherwise.
    pub fn display_name(&self) -> &str {
        self.file_path.as_deref().unwrap_or(self.id.as_str())
    }
}

impl PartialEq for AssetRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AssetRecord {}

impl Hash for AssetRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Builder for [`AssetRecord`].
#[derive(Debug, Clone)]
pub struct AssetRecordBuilder {
    id: AssetId,
    file_path: Option<String>,
    address: Option<String>,
    labels: BTreeSet<String>,
    read_only: bool,
    sub_asset: bool,
    scene: Option<bool>,
}

impl AssetRecordBuilder {
    pub fn file_path(mut self, path: Option<String>) -> Self {
        self.file_path = path;
        self
    }

    pub fn address(mut self, address: Option<String>) -> Self {
        self.address = address;
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn read_only(mut self, value: bool) -> Self {
        self.read_only = value;
        self
    }

    pub fn sub_asset(mut self, value: bool) -> Self {
        self.sub_asset = value;
        self
    }

    /// Override the scene flag. `None` derives it from the file extension.
    pub fn scene(mut self, value: Option<bool>) -> Self {
        self.scene = value;
        self
    }

    pub fn build(self) -> AssetRecord {
        let is_scene_asset = self
            .scene
            .unwrap_or_else(|| self.file_path.as_deref().is_some_and(is_scene_path));

        AssetRecord {
            id: self.id,
            file_path: self.file_path,
            address: self.address,
            labels: self.labels,
            is_read_only: self.read_only,
            is_sub_asset: self.sub_asset,
            is_scene_asset,
            depends_on: FxIndexSet::default(),
            depended_on_by: FxIndexSet::default(),
            containing_bundles: FxIndexSet::default(),
        }
    }
}

/// One produced archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleRecord {
    name: String,
    pub(crate) assets: FxIndexSet<AssetIdx>,
    pub(crate) group: Option<GroupIdx>,
}

impl BundleRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assets: FxIndexSet::default(),
            group: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assets(&self) -> &FxIndexSet<AssetIdx> {
        &self.assets
    }

    /// Owning group, once linked.
    pub fn group(&self) -> Option<GroupIdx> {
        self.group
    }
}

impl PartialEq for BundleRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for BundleRecord {}

impl Hash for BundleRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// One configured packing group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    id: GroupId,
    pub name: String,
    pub is_default: bool,
    pub is_read_only: bool,
    pub(crate) bundles: FxIndexSet<BundleIdx>,
}

impl GroupRecord {
    pub fn new(id: GroupId, name: impl Into<String>, is_default: bool, is_read_only: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_default,
            is_read_only,
            bundles: FxIndexSet::default(),
        }
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn bundles(&self) -> &FxIndexSet<BundleIdx> {
        &self.bundles
    }
}

impl PartialEq for GroupRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GroupRecord {}

impl Hash for GroupRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
