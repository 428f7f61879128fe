//! Serialization methods for BuildGraph.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::graph::BuildGraph;
use crate::record::{AssetIdx, AssetRecord, BundleIdx, BundleRecord, GroupIdx, GroupRecord};
use crate::{AssetId, Error, FxIndexMap, GroupId, Result};

/// Binary format version written by [`BuildGraph::to_bytes`].
const FORMAT_VERSION: u32 = 1;

/// Helper to escape labels for DOT format.
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Serialize)]
struct GroupJson<'a> {
    id: &'a GroupId,
    name: &'a str,
    is_default: bool,
    is_read_only: bool,
    bundles: Vec<&'a str>,
}

#[derive(Serialize)]
struct BundleJson<'a> {
    name: &'a str,
    group: Option<&'a GroupId>,
    assets: Vec<&'a AssetId>,
}

#[derive(Serialize)]
struct AssetJson<'a> {
    id: &'a AssetId,
    file_path: Option<&'a str>,
    address: Option<&'a str>,
    labels: &'a BTreeSet<String>,
    is_read_only: bool,
    is_sub_asset: bool,
    is_scene_asset: bool,
    is_duplicate: bool,
    is_implicit_root: bool,
    bundles: Vec<&'a str>,
    depends_on: Vec<&'a AssetId>,
    depended_on_by: Vec<&'a AssetId>,
}

#[derive(Serialize)]
struct GraphJson<'a> {
    groups: Vec<GroupJson<'a>>,
    bundles: Vec<BundleJson<'a>>,
    assets: Vec<AssetJson<'a>>,
}

impl BuildGraph {
    /// Export the graph as pretty JSON with every relationship spelled out
    /// by identity key.
    pub fn to_json(&self) -> Result<String> {
        let groups = self
            .groups()
            .map(|(_, group)| GroupJson {
                id: group.id(),
                name: &group.name,
                is_default: group.is_default,
                is_read_only: group.is_read_only,
                bundles: group.bundles().iter().map(|b| self[*b].name()).collect(),
            })
            .collect();

        let bundles = self
            .bundles()
            .map(|(_, bundle)| BundleJson {
                name: bundle.name(),
                group: bundle.group().map(|g| self[g].id()),
                assets: bundle.assets().iter().map(|a| self[*a].id()).collect(),
            })
            .collect();

        let assets = self
            .assets()
            .map(|(idx, asset)| AssetJson {
                id: asset.id(),
                file_path: asset.file_path.as_deref(),
                address: asset.address.as_deref(),
                labels: &asset.labels,
                is_read_only: asset.is_read_only,
                is_sub_asset: asset.is_sub_asset,
                is_scene_asset: asset.is_scene_asset,
                is_duplicate: asset.is_duplicate(),
                is_implicit_root: self.is_implicit_root(idx),
                bundles: asset
                    .containing_bundles()
                    .iter()
                    .map(|b| self[*b].name())
                    .collect(),
                depends_on: asset.depends_on().iter().map(|a| self[*a].id()).collect(),
                depended_on_by: asset
                    .depended_on_by()
                    .iter()
                    .map(|a| self[*a].id())
                    .collect(),
            })
            .collect();

        serde_json::to_string_pretty(&GraphJson {
            groups,
            bundles,
            assets,
        })
        .map_err(|e| Error::Serialization(format!("Failed to serialize graph: {e}")))
    }

    /// Export the graph as DOT format for visualization.
    ///
    /// Groups become clusters around their bundles; bundles point at the
    /// assets they contain and dependency edges are dashed. Duplicated
    /// assets are highlighted.
    pub fn to_dot(&self) -> String {
        let mut output = String::from("digraph BuildGraph {\n    rankdir=LR;\n");

        for (idx, group) in self.groups() {
            let _ = writeln!(output, "    subgraph \"cluster_{}\" {{", idx.index());
            let _ = writeln!(output, "        label=\"{}\";", escape_label(&group.name));
            for bundle in group.bundles() {
                let _ = writeln!(
                    output,
                    "        \"bundle:{}\" [shape=box];",
                    escape_label(self[*bundle].name())
                );
            }
            output.push_str("    }\n");
        }

        for (_, bundle) in self.bundles().filter(|(_, b)| b.group().is_none()) {
            let _ = writeln!(output, "    \"bundle:{}\" [shape=box];", escape_label(bundle.name()));
        }

        for (_, asset) in self.assets() {
            let color = if asset.is_duplicate() { ", color=red" } else { "" };
            let _ = writeln!(
                output,
                "    \"asset:{}\" [label=\"{}\"{}];",
                escape_label(asset.id().as_str()),
                escape_label(asset.display_name()),
                color
            );
        }

        for (_, bundle) in self.bundles() {
            for asset in bundle.assets() {
                let _ = writeln!(
                    output,
                    "    \"bundle:{}\" -> \"asset:{}\";",
                    escape_label(bundle.name()),
                    escape_label(self[*asset].id().as_str())
                );
            }
        }

        for (_, asset) in self.assets() {
            for dependency in asset.depends_on() {
                let _ = writeln!(
                    output,
                    "    \"asset:{}\" -> \"asset:{}\" [style=dashed];",
                    escape_label(asset.id().as_str()),
                    escape_label(self[*dependency].id().as_str())
                );
            }
        }

        output.push_str("}\n");
        output
    }

    /// Serialize the graph to binary format using bincode.
    ///
    /// # Format Version
    ///
    /// The payload starts with a u32 version number:
    /// - Version 1: groups, bundles and assets in arena order, relationships
    ///   as arena indices
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        #[derive(Serialize)]
        struct SerializedGraph<'a> {
            version: u32,
            groups: Vec<&'a GroupRecord>,
            bundles: Vec<&'a BundleRecord>,
            assets: Vec<&'a AssetRecord>,
        }

        let serialized = SerializedGraph {
            version: FORMAT_VERSION,
            groups: self.groups.values().collect(),
            bundles: self.bundles.values().collect(),
            assets: self.assets.values().collect(),
        };

        bincode::serde::encode_to_vec(&serialized, bincode::config::standard())
            .map_err(|e| Error::Serialization(format!("Failed to serialize graph to bytes: {e}")))
    }

    /// Deserialize the graph from binary format.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Deserialization fails
    /// - The format version is incompatible with the current implementation
    /// - A key appears twice or a relationship points outside its arena
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        #[derive(Deserialize)]
        struct SerializedGraph {
            version: u32,
            groups: Vec<GroupRecord>,
            bundles: Vec<BundleRecord>,
            assets: Vec<AssetRecord>,
        }

        let (serialized, _): (SerializedGraph, _) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard()).map_err(|e| {
                Error::Serialization(format!("Failed to deserialize graph from bytes: {e}"))
            })?;

        if serialized.version != FORMAT_VERSION {
            return Err(Error::Serialization(format!(
                "Incompatible graph format version: expected {}, got {}",
                FORMAT_VERSION, serialized.version
            )));
        }

        let groups = keyed(serialized.groups, |g| g.id().clone(), "group")?;
        let bundles = keyed(serialized.bundles, |b| b.name().to_string(), "bundle")?;
        let assets = keyed(serialized.assets, |a| a.id().clone(), "asset")?;

        let (group_len, bundle_len, asset_len) = (groups.len(), bundles.len(), assets.len());
        let in_range = |index: usize, len: usize, what: &str| {
            if index < len {
                Ok(())
            } else {
                Err(Error::Serialization(format!(
                    "{what} index {index} out of range (len {len})"
                )))
            }
        };

        for group in groups.values() {
            for BundleIdx(b) in group.bundles() {
                in_range(*b, bundle_len, "bundle")?;
            }
        }
        for bundle in bundles.values() {
            for AssetIdx(a) in bundle.assets() {
                in_range(*a, asset_len, "asset")?;
            }
            if let Some(GroupIdx(g)) = bundle.group() {
                in_range(g, group_len, "group")?;
            }
        }
        for asset in assets.values() {
            for AssetIdx(a) in asset.depends_on().iter().chain(asset.depended_on_by()) {
                in_range(*a, asset_len, "asset")?;
            }
            for BundleIdx(b) in asset.containing_bundles() {
                in_range(*b, bundle_len, "bundle")?;
            }
        }

        let mut graph = BuildGraph {
            groups,
            bundles,
            assets,
            ..Default::default()
        };
        for (idx, asset) in graph.assets.values().enumerate() {
            if let Some(path) = &asset.file_path {
                graph.paths.entry(path.clone()).or_insert(AssetIdx(idx));
            }
        }
        Ok(graph)
    }
}

fn keyed<K, V>(records: Vec<V>, key: impl Fn(&V) -> K, what: &str) -> Result<FxIndexMap<K, V>>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
{
    let mut map = FxIndexMap::with_capacity_and_hasher(records.len(), Default::default());
    for record in records {
        let k = key(&record);
        if map.contains_key(&k) {
            return Err(Error::Serialization(format!("duplicate {what} key '{k}'")));
        }
        map.insert(k, record);
    }
    Ok(map)
}
