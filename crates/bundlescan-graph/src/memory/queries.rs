//! Read-only queries over a completed graph.

use super::graph::BuildGraph;
use crate::record::{AssetIdx, AssetRecord, BundleIdx, BundleRecord, GroupRecord};

impl BuildGraph {
    /// Packed into more than one bundle.
    pub fn is_duplicate(&self, asset: AssetIdx) -> bool {
        self[asset].is_duplicate()
    }

    /// Topmost implicit asset of a chain: not addressable itself, but
    /// referenced directly by at least one addressable asset.
    pub fn is_implicit_root(&self, asset: AssetIdx) -> bool {
        let record = &self[asset];
        !record.is_addressable()
            && record
                .depended_on_by()
                .iter()
                .any(|referrer| self[*referrer].is_addressable())
    }

    /// Every asset packed into more than one bundle.
    pub fn duplicates(&self) -> impl Iterator<Item = AssetIdx> + '_ {
        self.assets()
            .filter(|(_, record)| record.is_duplicate())
            .map(|(idx, _)| idx)
    }

    /// Duplicated assets the user never added explicitly.
    pub fn implicit_duplicates(&self) -> impl Iterator<Item = AssetIdx> + '_ {
        self.assets()
            .filter(|(_, record)| !record.is_addressable() && record.is_duplicate())
            .map(|(idx, _)| idx)
    }

    pub fn implicit_roots(&self) -> impl Iterator<Item = AssetIdx> + '_ {
        self.assets()
            .map(|(idx, _)| idx)
            .filter(|idx| self.is_implicit_root(*idx))
    }

    pub fn explicit_assets(&self) -> impl Iterator<Item = AssetIdx> + '_ {
        self.assets()
            .filter(|(_, record)| record.is_addressable())
            .map(|(idx, _)| idx)
    }

    /// Assets `asset` references.
    pub fn dependencies(&self, asset: AssetIdx) -> impl Iterator<Item = &AssetRecord> + '_ {
        self[asset].depends_on().iter().map(|idx| &self[*idx])
    }

    /// Assets referencing `asset`.
    pub fn dependents(&self, asset: AssetIdx) -> impl Iterator<Item = &AssetRecord> + '_ {
        self[asset].depended_on_by().iter().map(|idx| &self[*idx])
    }

    pub fn assets_in_bundle(&self, bundle: BundleIdx) -> impl Iterator<Item = &AssetRecord> + '_ {
        self[bundle].assets().iter().map(|idx| &self[*idx])
    }

    pub fn bundles_of_asset(&self, asset: AssetIdx) -> impl Iterator<Item = &BundleRecord> + '_ {
        self[asset]
            .containing_bundles()
            .iter()
            .map(|idx| &self[*idx])
    }

    pub fn group_of_bundle(&self, bundle: BundleIdx) -> Option<&GroupRecord> {
        self[bundle].group().map(|group| &self[group])
    }

    /// Total number of asset → asset edges.
    pub fn dependency_edge_count(&self) -> usize {
        self.assets().map(|(_, record)| record.depends_on().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssetId;

    fn add(graph: &mut BuildGraph, id: &str, address: Option<&str>) -> AssetIdx {
        graph.insert_asset(
            AssetRecord::builder(AssetId::new(id).unwrap())
                .address(address.map(String::from))
                .build(),
        )
    }

    #[test]
    fn implicit_root_is_first_implicit_asset_below_an_explicit_one() {
        let mut graph = BuildGraph::new();
        let e = add(&mut graph, "E", Some("entry"));
        let i1 = add(&mut graph, "I1", None);
        let i2 = add(&mut graph, "I2", None);
        graph.depends_on(e, i1);
        graph.depends_on(i1, i2);

        assert!(!graph.is_implicit_root(e));
        assert!(graph.is_implicit_root(i1));
        assert!(!graph.is_implicit_root(i2));
        assert_eq!(graph.implicit_roots().collect::<Vec<_>>(), vec![i1]);
    }

    #[test]
    fn duplicate_needs_two_bundles_in_any_order() {
        let mut graph = BuildGraph::new();
        let single = add(&mut graph, "single", None);
        let twice = add(&mut graph, "twice", None);
        let explicit = add(&mut graph, "explicit", Some("e"));

        graph.pack(single, "x");
        graph.pack(twice, "y");
        graph.pack(twice, "x");
        graph.pack(explicit, "x");
        graph.pack(explicit, "y");

        assert!(!graph.is_duplicate(single));
        assert!(graph.is_duplicate(twice));
        assert_eq!(graph.duplicates().count(), 2);
        assert_eq!(graph.implicit_duplicates().collect::<Vec<_>>(), vec![twice]);

        let x = graph.bundle_index("x").unwrap();
        assert_eq!(graph.assets_in_bundle(x).count(), 3);
        let names: Vec<_> = graph.bundles_of_asset(twice).map(|b| b.name()).collect();
        assert_eq!(names, vec!["y", "x"]);
        assert!(graph.group_of_bundle(x).is_none());
    }

    #[test]
    fn dependencies_and_dependents_mirror_each_other() {
        let mut graph = BuildGraph::new();
        let a = add(&mut graph, "a", None);
        let b = add(&mut graph, "b", None);
        graph.depends_on(a, b);

        let deps: Vec<_> = graph.dependencies(a).map(|r| r.id().as_str()).collect();
        let dependents: Vec<_> = graph.dependents(b).map(|r| r.id().as_str()).collect();
        assert_eq!(deps, vec!["b"]);
        assert_eq!(dependents, vec!["a"]);
        assert_eq!(graph.dependency_edge_count(), 1);
    }
}
