//! Duplicate report: the actionable output of an analysis.

use serde::Serialize;

use crate::filter::PathFilter;
use crate::memory::BuildGraph;
use crate::record::AssetIdx;
use crate::statistics::GraphStatistics;
use crate::{AssetId, FxIndexMap};

/// Group name used in [`DuplicateReport::issues_by_group`] for bundles that
/// no group owns.
pub const UNGROUPED: &str = "<ungrouped>";

/// One duplicated asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateAsset {
    pub id: AssetId,
    pub path: String,
    pub bundles: Vec<String>,
    pub is_addressable: bool,
    pub is_implicit_root: bool,
}

/// Assets duplicated across exactly the same set of bundles.
///
/// Moving such a set into one shared bundle removes all of the duplication
/// at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCluster {
    /// Sorted bundle names.
    pub bundles: Vec<String>,
    pub assets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    pub duplicates: Vec<DuplicateAsset>,
    pub clusters: Vec<DuplicateCluster>,
    issues: FxIndexMap<String, FxIndexMap<String, Vec<String>>>,
    pub statistics: GraphStatistics,
}

impl DuplicateReport {
    /// Collect duplicated assets whose path passes `filter`.
    ///
    /// Only implicit duplicates are reported unless `include_addressable` is
    /// set. Assets without a known path never pass an enabled filter.
    pub fn from_graph(graph: &BuildGraph, filter: &PathFilter, include_addressable: bool) -> Self {
        let candidates: Vec<AssetIdx> = if include_addressable {
            graph.duplicates().collect()
        } else {
            graph.implicit_duplicates().collect()
        };

        let mut report = DuplicateReport {
            statistics: graph.statistics(),
            ..Default::default()
        };
        let mut clusters: FxIndexMap<Vec<String>, Vec<String>> = FxIndexMap::default();

        for idx in candidates {
            let asset = &graph[idx];
            if !filter.accepts(asset.file_path.as_deref().unwrap_or_default()) {
                continue;
            }

            let path = asset.display_name().to_string();
            let bundles: Vec<String> = graph
                .bundles_of_asset(idx)
                .map(|b| b.name().to_string())
                .collect();

            for bundle in asset.containing_bundles() {
                let group = graph
                    .group_of_bundle(*bundle)
                    .map_or(UNGROUPED, |g| g.name.as_str());
                report
                    .issues
                    .entry(group.to_string())
                    .or_default()
                    .entry(graph[*bundle].name().to_string())
                    .or_default()
                    .push(path.clone());
            }

            let mut key = bundles.clone();
            key.sort();
            clusters.entry(key).or_default().push(path.clone());

            report.duplicates.push(DuplicateAsset {
                id: asset.id().clone(),
                path,
                bundles,
                is_addressable: asset.is_addressable(),
                is_implicit_root: graph.is_implicit_root(idx),
            });
        }

        report.clusters = clusters
            .into_iter()
            .map(|(bundles, assets)| DuplicateCluster { bundles, assets })
            .collect();
        report
    }

    /// Group name → bundle name → paths of the duplicated assets it holds.
    pub fn issues_by_group(&self) -> &FxIndexMap<String, FxIndexMap<String, Vec<String>>> {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.duplicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::Error::Serialization(format!("Failed to serialize report: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AssetRecord, GroupRecord};
    use crate::GroupId;

    fn add(graph: &mut BuildGraph, id: &str, path: &str, address: Option<&str>) -> AssetIdx {
        graph.insert_asset(
            AssetRecord::builder(AssetId::new(id).unwrap())
                .file_path(Some(path.into()))
                .address(address.map(String::from))
                .build(),
        )
    }

    fn graph() -> BuildGraph {
        let mut graph = BuildGraph::new();
        let sword = add(&mut graph, "sd", "Assets/Sword_D.tif", None);
        let normal = add(&mut graph, "sn", "Assets/Sword_N.tif", None);
        let hero = add(&mut graph, "h", "Assets/Hero.prefab", Some("hero"));
        let script = add(&mut graph, "cs", "Assets/Scripts/Sword.cs", None);

        for asset in [sword, normal, script, hero] {
            graph.pack(asset, "weapons.bundle");
            graph.pack(asset, "heroes.bundle");
        }
        graph.pack(normal, "extra.bundle");

        let g = graph.obtain_group(GroupRecord::new(GroupId::new("g").unwrap(), "Weapons", false, false));
        let weapons = graph.bundle_index("weapons.bundle").unwrap();
        graph.link_group(g, weapons);
        graph
    }

    #[test]
    fn reports_filtered_implicit_duplicates() {
        let report = DuplicateReport::from_graph(&graph(), &PathFilter::default(), false);

        let paths: Vec<_> = report.duplicates.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["Assets/Sword_D.tif", "Assets/Sword_N.tif"]);
        assert_eq!(report.statistics.duplicate_count, 4);
    }

    #[test]
    fn clusters_by_identical_bundle_set() {
        let report = DuplicateReport::from_graph(&graph(), &PathFilter::default(), false);

        assert_eq!(
            report.clusters,
            vec![
                DuplicateCluster {
                    bundles: vec!["heroes.bundle".into(), "weapons.bundle".into()],
                    assets: vec!["Assets/Sword_D.tif".into()],
                },
                DuplicateCluster {
                    bundles: vec![
                        "extra.bundle".into(),
                        "heroes.bundle".into(),
                        "weapons.bundle".into()
                    ],
                    assets: vec!["Assets/Sword_N.tif".into()],
                },
            ]
        );
    }

    #[test]
    fn issues_are_keyed_by_group_then_bundle() {
        let report = DuplicateReport::from_graph(&graph(), &PathFilter::default(), false);
        let issues = report.issues_by_group();

        assert_eq!(
            issues["Weapons"]["weapons.bundle"],
            vec!["Assets/Sword_D.tif", "Assets/Sword_N.tif"]
        );
        assert_eq!(issues[UNGROUPED]["extra.bundle"], vec!["Assets/Sword_N.tif"]);
    }

    #[test]
    fn addressable_duplicates_are_opt_in() {
        let report = DuplicateReport::from_graph(&graph(), &PathFilter::default(), true);
        assert_eq!(report.len(), 3);
        assert!(report.duplicates.iter().any(|d| d.is_addressable));
    }
}
