use serde::{Deserialize, Serialize};

/// Aggregate statistics about a build graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub group_count: usize,
    pub bundle_count: usize,
    pub asset_count: usize,
    pub explicit_asset_count: usize,
    pub implicit_asset_count: usize,
    pub duplicate_count: usize,
    pub implicit_duplicate_count: usize,
    pub implicit_root_count: usize,
    pub dependency_edge_count: usize,
}
