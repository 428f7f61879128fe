//! Statistics methods for BuildGraph.

use super::graph::BuildGraph;
use crate::statistics::GraphStatistics;

impl BuildGraph {
    /// Compute a statistics snapshot for reports.
    pub fn statistics(&self) -> GraphStatistics {
        let explicit_asset_count = self.explicit_assets().count();

        GraphStatistics {
            group_count: self.group_count(),
            bundle_count: self.bundle_count(),
            asset_count: self.asset_count(),
            explicit_asset_count,
            implicit_asset_count: self.asset_count() - explicit_asset_count,
            duplicate_count: self.duplicates().count(),
            implicit_duplicate_count: self.implicit_duplicates().count(),
            implicit_root_count: self.implicit_roots().count(),
            dependency_edge_count: self.dependency_edge_count(),
        }
    }
}
