//! # bundlescan-graph
//!
//! In-memory build graph for content-bundle builds, plus the analyses that
//! run over it.
//!
//! A build packs project assets into bundles, grouped by configured packing
//! groups. The build engine reports what it produced as flat tables; this
//! crate turns those tables into a linked [`BuildGraph`] of groups, bundles
//! and assets, wires the static dependency edges between assets, and finds
//! assets that were packed into more than one bundle without ever being
//! requested.
//!
//! ## Architecture
//!
//! ```text
//!   GroupCatalog ──► prepare_packing ──► PackingPlan ──► BuildEngine
//!                                                           │
//!                                                      BuildTables
//!                                                           │
//!                                                           ▼
//!   AssetDatabase ──────────────────────────────────►  BuildGraph
//!                                                           │
//!                                                           ▼
//!                                                    DuplicateReport
//! ```
//!
//! Records live in identity-keyed arenas; every relationship is an index
//! into one of them, so both directions of an edge can be kept in sync
//! without shared ownership.
//!
//! ## Quick Start
//!
//! ```rust
//! use bundlescan_graph::{
//!     AssetEntry, AssetId, BuildGraph, BuildTables, GroupCatalog, GroupConfig, GroupId,
//!     ObjectIdentifier, PackingSchema, Diagnostics,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let hero = AssetId::new("hero")?;
//! let group = GroupId::new("g1")?;
//!
//! let catalog = GroupCatalog::new(vec![
//!     GroupConfig::new(group.clone(), "Characters")
//!         .with_schema(PackingSchema::default())
//!         .with_entry(AssetEntry::new(hero.clone(), "Assets/Hero.prefab").with_address("hero")),
//! ]);
//!
//! let tables = BuildTables::from_parallel(
//!     [("cab-1".to_string(), "characters.bundle".to_string())],
//!     [("cab-1".to_string(), vec![ObjectIdentifier::new(hero.clone(), 1)])],
//!     [(hero.clone(), vec!["cab-1".to_string()])].into_iter().collect(),
//!     [(group, vec!["characters.bundle".to_string()])].into_iter().collect(),
//! )?;
//!
//! let mut diagnostics = Diagnostics::default();
//! let graph = BuildGraph::construct(&catalog, &tables, &mut diagnostics)?;
//! assert_eq!(graph.asset_count(), 1);
//! assert!(!graph.is_duplicate(graph.asset_index("hero").unwrap()));
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod diagnostics;
pub mod filter;
pub mod group;
pub mod id;
pub mod naming;
pub mod packing;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod statistics;
pub mod tables;

mod memory;

pub use database::{AssetDatabase, NoDatabase, StaticAssetDatabase};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use filter::PathFilter;
pub use group::{AssetEntry, GroupCatalog, GroupConfig, PackingMode, PackingSchema};
pub use id::{AssetId, GroupId, IdError};
pub use memory::{BuildGraph, GraphBuilder};
pub use naming::{NameResolver, NameSet, UniqueName, unique_name};
pub use packing::{BundlePacker, PackingInput, PackingPlan, SchemaPacker, prepare_packing};
pub use pipeline::{Analysis, AnalysisOutcome, BuildEngine, RecordedBuild};
pub use record::{AssetIdx, AssetRecord, AssetRecordBuilder, BundleIdx, BundleRecord, GroupIdx, GroupRecord};
pub use report::{DuplicateAsset, DuplicateCluster, DuplicateReport};
pub use statistics::GraphStatistics;
pub use tables::{BuildTables, ObjectIdentifier, ProducedFile, RawBuildTables};

pub use bundlescan_config::{
    AnalysisConfig, MissingBundlePolicy, NameExhaustionPolicy, UnresolvedDependencyPolicy,
};

/// Insertion-ordered map with the Fx hasher.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;

/// Insertion-ordered set with the Fx hasher.
pub type FxIndexSet<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;

/// Error types for graph construction and analysis.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The build tables mark an asset explicit but no group configures it.
    #[error("asset {id} was built as explicit but no group configures it")]
    ExplicitAssetNotConfigured { id: AssetId },

    /// The produced-file tables are not index-aligned.
    #[error("build tables are misaligned: {0}")]
    MisalignedTables(String),

    /// A group claims a bundle that produced no file.
    #[error("group {group} claims bundle '{bundle}' that produced no file")]
    MissingBundle { group: GroupId, bundle: String },

    /// The dependency oracle named a path outside the build.
    #[error("dependency '{path}' of asset {asset} is not part of the build")]
    UnresolvedDependency { asset: AssetId, path: String },

    /// No free bundle name was found within the attempt bound.
    #[error("no free bundle name for '{name}' after {attempts} attempts")]
    NameExhausted { name: String, attempts: u32 },

    /// The external build engine failed.
    #[error("build engine error: {0}")]
    Engine(String),

    #[error(transparent)]
    InvalidId(#[from] IdError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
