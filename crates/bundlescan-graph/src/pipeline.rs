//! End-to-end analysis: packing preparation, build, graph construction,
//! dependency closure and the duplicate report.

use std::time::Instant;

use bundlescan_config::AnalysisConfig;
use tracing::{info, info_span};

use crate::database::AssetDatabase;
use crate::diagnostics::Diagnostics;
use crate::filter::PathFilter;
use crate::group::GroupCatalog;
use crate::memory::{BuildGraph, GraphBuilder};
use crate::packing::{BundlePacker, PackingPlan, SchemaPacker, prepare_packing};
use crate::report::DuplicateReport;
use crate::tables::BuildTables;
use crate::Result;

/// The external build engine: executes bundle requests and reports what
/// it produced.
pub trait BuildEngine {
    fn execute(&self, plan: &PackingPlan) -> Result<BuildTables>;
}

impl<F> BuildEngine for F
where
    F: Fn(&PackingPlan) -> Result<BuildTables>,
{
    fn execute(&self, plan: &PackingPlan) -> Result<BuildTables> {
        self(plan)
    }
}

/// Replays tables recorded from an earlier build.
#[derive(Debug, Clone, Default)]
pub struct RecordedBuild {
    tables: BuildTables,
}

impl RecordedBuild {
    pub fn new(tables: BuildTables) -> Self {
        Self { tables }
    }
}

impl BuildEngine for RecordedBuild {
    fn execute(&self, _plan: &PackingPlan) -> Result<BuildTables> {
        Ok(self.tables.clone())
    }
}

/// A completed analysis.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub plan: PackingPlan,
    pub graph: BuildGraph,
    pub report: DuplicateReport,
    /// Everything recorded along the way, packing diagnostics first.
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// No group produced a bundle request.
    NothingToAnalyze,
    Completed(Box<Analysis>),
}

impl AnalysisOutcome {
    pub fn analysis(&self) -> Option<&Analysis> {
        match self {
            Self::NothingToAnalyze => None,
            Self::Completed(analysis) => Some(analysis),
        }
    }
}

impl Analysis {
    /// Run the whole pipeline with the default [`SchemaPacker`].
    pub fn run(
        catalog: &GroupCatalog,
        engine: &dyn BuildEngine,
        database: &dyn AssetDatabase,
        config: &AnalysisConfig,
    ) -> Result<AnalysisOutcome> {
        Self::run_with_packer(catalog, &SchemaPacker, engine, database, config)
    }

    /// Run the whole pipeline.
    ///
    /// # Errors
    ///
    /// Structural inconsistencies, engine failures and any condition whose
    /// policy is set to fail abort the run.
    pub fn run_with_packer(
        catalog: &GroupCatalog,
        packer: &dyn BundlePacker,
        engine: &dyn BuildEngine,
        database: &dyn AssetDatabase,
        config: &AnalysisConfig,
    ) -> Result<AnalysisOutcome> {
        let started = Instant::now();

        let mut plan = {
            let _span = info_span!("prepare_packing").entered();
            prepare_packing(catalog, packer, config)?
        };
        if plan.is_empty() {
            info!("no packing inputs; nothing to analyze");
            return Ok(AnalysisOutcome::NothingToAnalyze);
        }
        let mut diagnostics = std::mem::take(&mut plan.diagnostics);

        let tables = {
            let _span = info_span!("execute_build", inputs = plan.inputs.len()).entered();
            engine.execute(&plan)?
        };

        let mut graph = {
            let _span = info_span!("construct_graph", files = tables.files.len()).entered();
            GraphBuilder::new(catalog, &tables)
                .database(database)
                .missing_bundle_policy(config.policies.missing_bundle)
                .build(&mut diagnostics)?
        };

        {
            let _span = info_span!("populate_dependencies").entered();
            graph.populate_dependencies(
                database,
                config.policies.unresolved_dependency,
                &mut diagnostics,
            )?;
        }

        let filter = PathFilter::new(config.filter.clone());
        let report = DuplicateReport::from_graph(&graph, &filter, config.report.include_addressable);

        info!(
            assets = graph.asset_count(),
            bundles = graph.bundle_count(),
            duplicates = report.len(),
            diagnostics = diagnostics.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Ok(AnalysisOutcome::Completed(Box::new(Analysis {
            plan,
            graph,
            report,
            diagnostics,
        })))
    }
}
