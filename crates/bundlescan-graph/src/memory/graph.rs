//! Arena storage and edge maintenance for [`BuildGraph`].

use std::ops::Index;

use rustc_hash::FxHashMap as HashMap;

use crate::record::{AssetIdx, AssetRecord, BundleIdx, BundleRecord, GroupIdx, GroupRecord};
use crate::{AssetId, FxIndexMap, GroupId};

/// Groups → bundles → assets for one build, plus asset dependency edges.
///
/// Built once per analysis and dropped as a unit; nothing is removed while
/// it is alive, so arena indices stay valid for its whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
    pub(super) groups: FxIndexMap<GroupId, GroupRecord>,
    pub(super) bundles: FxIndexMap<String, BundleRecord>,
    pub(super) assets: FxIndexMap<AssetId, AssetRecord>,
    /// Secondary index used to resolve dependency paths.
    pub(super) paths: HashMap<String, AssetIdx>,
}

impl BuildGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn bundle_count(&self) -> usize {
        self.bundles.len()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.bundles.is_empty() && self.assets.is_empty()
    }

    pub fn asset_index(&self, id: &str) -> Option<AssetIdx> {
        self.assets.get_index_of(id).map(AssetIdx)
    }

    pub fn bundle_index(&self, name: &str) -> Option<BundleIdx> {
        self.bundles.get_index_of(name).map(BundleIdx)
    }

    pub fn group_index(&self, id: &str) -> Option<GroupIdx> {
        self.groups.get_index_of(id).map(GroupIdx)
    }

    /// Resolve a project path to the asset stored there.
    pub fn asset_index_by_path(&self, path: &str) -> Option<AssetIdx> {
        self.paths.get(path).copied()
    }

    pub fn asset(&self, id: &str) -> Option<&AssetRecord> {
        self.assets.get(id)
    }

    pub fn bundle(&self, name: &str) -> Option<&BundleRecord> {
        self.bundles.get(name)
    }

    pub fn group(&self, id: &str) -> Option<&GroupRecord> {
        self.groups.get(id)
    }

    pub fn assets(&self) -> impl ExactSizeIterator<Item = (AssetIdx, &AssetRecord)> {
        self.assets.values().enumerate().map(|(i, r)| (AssetIdx(i), r))
    }

    pub fn bundles(&self) -> impl ExactSizeIterator<Item = (BundleIdx, &BundleRecord)> {
        self.bundles
            .values()
            .enumerate()
            .map(|(i, r)| (BundleIdx(i), r))
    }

    pub fn groups(&self) -> impl ExactSizeIterator<Item = (GroupIdx, &GroupRecord)> {
        self.groups.values().enumerate().map(|(i, r)| (GroupIdx(i), r))
    }

    /// Return the asset keyed by `id`, creating it with `create` if absent.
    pub(crate) fn obtain_asset<E>(
        &mut self,
        id: &AssetId,
        create: impl FnOnce() -> Result<AssetRecord, E>,
    ) -> Result<AssetIdx, E> {
        if let Some(idx) = self.assets.get_index_of(id) {
            return Ok(AssetIdx(idx));
        }

        let record = create()?;
        debug_assert_eq!(record.id(), id);
        let path = record.file_path.clone();
        let (idx, _) = self.assets.insert_full(id.clone(), record);
        if let Some(path) = path {
            self.paths.entry(path).or_insert(AssetIdx(idx));
        }
        Ok(AssetIdx(idx))
    }

    /// Return the bundle named `name`, creating an empty one if absent.
    pub(crate) fn obtain_bundle(&mut self, name: &str) -> BundleIdx {
        if let Some(idx) = self.bundles.get_index_of(name) {
            return BundleIdx(idx);
        }
        let (idx, _) = self
            .bundles
            .insert_full(name.to_string(), BundleRecord::new(name));
        BundleIdx(idx)
    }

    /// Return the group keyed by `record`'s id, inserting `record` if absent.
    pub(crate) fn obtain_group(&mut self, record: GroupRecord) -> GroupIdx {
        let entry = self.groups.entry(record.id().clone());
        let idx = entry.index();
        entry.or_insert(record);
        GroupIdx(idx)
    }

    /// Record that `asset` was packed into `bundle`, in both directions.
    pub(crate) fn link_membership(&mut self, asset: AssetIdx, bundle: BundleIdx) {
        self.bundles[bundle.0].assets.insert(asset);
        self.assets[asset.0].containing_bundles.insert(bundle);
    }

    /// Link `bundle` to `group`.
    ///
    /// The group always lists the bundle and the latest claim becomes the
    /// bundle's owner. Returns the previous owner when it was another group.
    pub(crate) fn link_group(&mut self, group: GroupIdx, bundle: BundleIdx) -> Option<GroupIdx> {
        self.groups[group.0].bundles.insert(bundle);
        let previous = self.bundles[bundle.0].group.replace(group);
        previous.filter(|owner| *owner != group)
    }

    /// `asset` statically references `dependency`.
    ///
    /// Adds the forward and reverse edge. Self-references are ignored.
    /// Returns whether anything changed.
    pub fn depends_on(&mut self, asset: AssetIdx, dependency: AssetIdx) -> bool {
        if asset == dependency {
            return false;
        }
        let added = self.assets[asset.0].depends_on.insert(dependency);
        self.assets[dependency.0].depended_on_by.insert(asset);
        added
    }

    /// Insert a standalone asset record. Existing records win.
    pub fn insert_asset(&mut self, record: AssetRecord) -> AssetIdx {
        let id = record.id().clone();
        match self.obtain_asset::<std::convert::Infallible>(&id, || Ok(record)) {
            Ok(idx) => idx,
            Err(never) => match never {},
        }
    }

    /// Insert or fetch a bundle and record that `asset` is packed into it.
    pub fn pack(&mut self, asset: AssetIdx, bundle: &str) -> BundleIdx {
        let bundle = self.obtain_bundle(bundle);
        self.link_membership(asset, bundle);
        bundle
    }
}

impl Index<AssetIdx> for BuildGraph {
    type Output = AssetRecord;

    fn index(&self, idx: AssetIdx) -> &AssetRecord {
        &self.assets[idx.0]
    }
}

impl Index<BundleIdx> for BuildGraph {
    type Output = BundleRecord;

    fn index(&self, idx: BundleIdx) -> &BundleRecord {
        &self.bundles[idx.0]
    }
}

impl Index<GroupIdx> for BuildGraph {
    type Output = GroupRecord;

    fn index(&self, idx: GroupIdx) -> &GroupRecord {
        &self.groups[idx.0]
    }
}
