//! Dependency closure: wires asset → asset reference edges.

use bundlescan_config::UnresolvedDependencyPolicy;
use tracing::{debug, trace, warn};

use super::graph::BuildGraph;
use crate::database::AssetDatabase;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::record::AssetIdx;
use crate::{Error, Result};

impl BuildGraph {
    /// Query `database` for the dependencies of every asset and add the
    /// resolved edges.
    ///
    /// Dependency paths are resolved through [`AssetDatabase::id_for_path`]
    /// first, then through the graph's own path index. Paths that match no
    /// asset in the graph are handled according to `policy`; no placeholder
    /// records are created. Edges are sets, so running this twice with the
    /// same inputs changes nothing. Returns the number of new edges.
    ///
    /// # Errors
    ///
    /// [`Error::UnresolvedDependency`] under
    /// [`UnresolvedDependencyPolicy::Fail`].
    pub fn populate_dependencies(
        &mut self,
        database: &dyn AssetDatabase,
        policy: UnresolvedDependencyPolicy,
        diagnostics: &mut Diagnostics,
    ) -> Result<usize> {
        let mut added = 0;

        for index in 0..self.assets.len() {
            let asset = AssetIdx(index);
            let record = &self.assets[index];

            let Some(path) = record.file_path.clone() else {
                trace!(asset = %record.id(), "asset has no path");
                if policy != UnresolvedDependencyPolicy::Skip {
                    diagnostics.push(Diagnostic::AssetWithoutPath {
                        asset: record.id().clone(),
                    });
                }
                continue;
            };

            for dependency_path in database.dependencies_of(&path) {
                if dependency_path == path {
                    continue;
                }

                match self.resolve_path(database, &dependency_path) {
                    Some(dependency) => {
                        if self.depends_on(asset, dependency) {
                            added += 1;
                        }
                    }
                    None => {
                        let id = self.assets[index].id().clone();
                        match policy {
                            UnresolvedDependencyPolicy::Skip => {}
                            UnresolvedDependencyPolicy::Warn => {
                                warn!(asset = %id, path = %dependency_path, "unresolved dependency");
                                diagnostics.push(Diagnostic::UnresolvedDependency {
                                    asset: id,
                                    path: dependency_path,
                                });
                            }
                            UnresolvedDependencyPolicy::Fail => {
                                return Err(Error::UnresolvedDependency {
                                    asset: id,
                                    path: dependency_path,
                                });
                            }
                        }
                    }
                }
            }
        }

        debug!(edges = added, "populated dependency edges");
        Ok(added)
    }

    fn resolve_path(&self, database: &dyn AssetDatabase, path: &str) -> Option<AssetIdx> {
        database
            .id_for_path(path)
            .and_then(|id| self.asset_index(id.as_str()))
            .or_else(|| self.asset_index_by_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::StaticAssetDatabase;
    use crate::record::AssetRecord;
    use crate::AssetId;

    fn graph() -> BuildGraph {
        let mut graph = BuildGraph::new();
        for (id, path) in [("a", "Assets/A.prefab"), ("b", "Assets/B.mat"), ("c", "Assets/C.png")] {
            graph.insert_asset(
                AssetRecord::builder(AssetId::new(id).unwrap())
                    .file_path(Some(path.into()))
                    .build(),
            );
        }
        graph
    }

    fn database() -> StaticAssetDatabase {
        StaticAssetDatabase::new()
            .with_dependencies("Assets/A.prefab", ["Assets/B.mat", "Assets/A.prefab", "Assets/Gone.png"])
            .with_dependencies("Assets/B.mat", ["Assets/C.png"])
    }

    #[test]
    fn adds_resolved_edges_and_warns_on_the_rest() {
        let mut graph = graph();
        let mut diagnostics = Diagnostics::default();
        let added = graph
            .populate_dependencies(&database(), UnresolvedDependencyPolicy::Warn, &mut diagnostics)
            .unwrap();

        assert_eq!(added, 2);
        let a = graph.asset_index("a").unwrap();
        let b = graph.asset_index("b").unwrap();
        assert!(graph[a].depends_on().contains(&b));
        assert!(!graph[a].depends_on().contains(&a));
        assert!(graph[b].depended_on_by().contains(&a));

        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::UnresolvedDependency {
                asset: AssetId::new("a").unwrap(),
                path: "Assets/Gone.png".into(),
            }]
        );
    }

    #[test]
    fn skip_policy_is_silent() {
        let mut graph = graph();
        let mut diagnostics = Diagnostics::default();
        graph
            .populate_dependencies(&database(), UnresolvedDependencyPolicy::Skip, &mut diagnostics)
            .unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(graph.asset_count(), 3);
    }

    #[test]
    fn fail_policy_aborts() {
        let mut graph = graph();
        let err = graph
            .populate_dependencies(
                &database(),
                UnresolvedDependencyPolicy::Fail,
                &mut Diagnostics::default(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedDependency { path, .. } if path == "Assets/Gone.png"));
    }

    #[test]
    fn second_run_adds_nothing() {
        let mut graph = graph();
        let database = database();
        let mut diagnostics = Diagnostics::default();
        graph
            .populate_dependencies(&database, UnresolvedDependencyPolicy::Skip, &mut diagnostics)
            .unwrap();
        let before: Vec<_> = graph.assets().map(|(_, a)| a.depends_on().clone()).collect();

        let added = graph
            .populate_dependencies(&database, UnresolvedDependencyPolicy::Skip, &mut diagnostics)
            .unwrap();
        let after: Vec<_> = graph.assets().map(|(_, a)| a.depends_on().clone()).collect();

        assert_eq!(added, 0);
        assert_eq!(before, after);
    }

    #[test]
    fn database_ids_take_precedence_over_paths() {
        let mut graph = graph();
        // the database knows "c" lives at a path the graph has no record for
        let database = StaticAssetDatabase::new()
            .with_asset(AssetId::new("c").unwrap(), "Assets/Moved/C.png")
            .with_dependencies("Assets/A.prefab", ["Assets/Moved/C.png"]);

        graph
            .populate_dependencies(&database, UnresolvedDependencyPolicy::Fail, &mut Diagnostics::default())
            .unwrap();

        let a = graph.asset_index("a").unwrap();
        let c = graph.asset_index("c").unwrap();
        assert!(graph[a].depends_on().contains(&c));
    }
}
