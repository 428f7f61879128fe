//! Graph construction from build tables and group configuration.

use bundlescan_config::MissingBundlePolicy;
use tracing::{debug, warn};

use super::graph::BuildGraph;
use crate::database::{AssetDatabase, NoDatabase};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::group::GroupCatalog;
use crate::record::{AssetRecord, GroupRecord};
use crate::tables::BuildTables;
use crate::{Error, Result};

/// Configures and runs graph construction.
///
/// ```rust
/// use bundlescan_graph::{BuildTables, Diagnostics, GraphBuilder, GroupCatalog, MissingBundlePolicy};
///
/// let catalog = GroupCatalog::default();
/// let tables = BuildTables::default();
/// let mut diagnostics = Diagnostics::default();
///
/// let graph = GraphBuilder::new(&catalog, &tables)
///     .missing_bundle_policy(MissingBundlePolicy::Fail)
///     .build(&mut diagnostics)
///     .unwrap();
/// assert!(graph.is_empty());
/// ```
pub struct GraphBuilder<'a> {
    catalog: &'a GroupCatalog,
    tables: &'a BuildTables,
    database: &'a dyn AssetDatabase,
    missing_bundle: MissingBundlePolicy,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(catalog: &'a GroupCatalog, tables: &'a BuildTables) -> Self {
        Self {
            catalog,
            tables,
            database: &NoDatabase,
            missing_bundle: MissingBundlePolicy::default(),
        }
    }

    /// Database used to find paths of assets that have no configured entry.
    pub fn database(mut self, database: &'a dyn AssetDatabase) -> Self {
        self.database = database;
        self
    }

    pub fn missing_bundle_policy(mut self, policy: MissingBundlePolicy) -> Self {
        self.missing_bundle = policy;
        self
    }

    /// Build the graph: assets and bundles from the produced files, then
    /// group ownership from the group table.
    ///
    /// Dependency edges are not populated here.
    ///
    /// # Errors
    ///
    /// - [`Error::ExplicitAssetNotConfigured`] when an explicit asset has no
    ///   configured entry. The tables and configuration come from different
    ///   builds.
    /// - [`Error::MissingBundle`] under [`MissingBundlePolicy::Fail`].
    pub fn build(self, diagnostics: &mut Diagnostics) -> Result<BuildGraph> {
        let mut graph = BuildGraph::new();
        self.add_produced_files(&mut graph)?;
        self.link_groups(&mut graph, diagnostics)?;

        debug!(
            groups = graph.group_count(),
            bundles = graph.bundle_count(),
            assets = graph.asset_count(),
            "constructed build graph"
        );
        Ok(graph)
    }

    fn add_produced_files(&self, graph: &mut BuildGraph) -> Result<()> {
        for produced in &self.tables.files {
            let bundle = graph.obtain_bundle(&produced.bundle);

            for object in &produced.objects {
                let id = &object.guid;
                let asset = graph.obtain_asset::<Error>(id, || {
                    let path = self.database.path_for_id(id);
                    if self.tables.is_explicit(id) {
                        let entry = self
                            .catalog
                            .find_entry(id)
                            .ok_or_else(|| Error::ExplicitAssetNotConfigured { id: id.clone() })?;
                        Ok(AssetRecord::from_entry(entry, path))
                    } else {
                        Ok(AssetRecord::builder(id.clone()).file_path(path).build())
                    }
                })?;
                graph.link_membership(asset, bundle);
            }
        }
        Ok(())
    }

    fn link_groups(&self, graph: &mut BuildGraph, diagnostics: &mut Diagnostics) -> Result<()> {
        for config in self.catalog.groups() {
            if config.schema.is_none() {
                debug!(group = %config.id, "skipping group without packing schema");
                continue;
            }

            let group = graph.obtain_group(GroupRecord::new(
                config.id.clone(),
                config.name.clone(),
                config.is_default,
                config.is_read_only,
            ));

            let Some(names) = self.tables.group_to_bundles.get(&config.id) else {
                continue;
            };

            for name in names {
                let bundle = match graph.bundle_index(name) {
                    Some(bundle) => bundle,
                    None => match self.missing_bundle {
                        MissingBundlePolicy::Fail => {
                            return Err(Error::MissingBundle {
                                group: config.id.clone(),
                                bundle: name.clone(),
                            });
                        }
                        MissingBundlePolicy::CreateEmpty => {
                            warn!(group = %config.id, bundle = %name, "group claims a bundle that produced no file");
                            diagnostics.push(Diagnostic::MissingBundle {
                                group: config.id.clone(),
                                bundle: name.clone(),
                            });
                            graph.obtain_bundle(name)
                        }
                    },
                };

                if let Some(owner) = graph.link_group(group, bundle) {
                    let owner = graph[owner].id().clone();
                    warn!(bundle = %name, %owner, claimant = %config.id, "bundle claimed by two groups; latest claim owns it");
                    diagnostics.push(Diagnostic::BundleClaimedTwice {
                        bundle: name.clone(),
                        owner,
                        claimant: config.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl BuildGraph {
    /// Construct a graph with default policies and no asset database.
    ///
    /// See [`GraphBuilder`] for the configurable form.
    pub fn construct(
        catalog: &GroupCatalog,
        tables: &BuildTables,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        GraphBuilder::new(catalog, tables).build(diagnostics)
    }
}
