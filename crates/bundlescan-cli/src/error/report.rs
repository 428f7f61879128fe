//! Conversion from CLI errors to miette reports.

use crate::error::CliError;
use bundlescan_graph::Error as GraphError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Graph(e) => graph_error_to_miette(e),
        CliError::Config(e) => miette::miette!(
            "Configuration error: {}\n\nHint: Run 'bundlescan check --print' to see the effective configuration",
            e
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert an analysis error to a miette Report with a hint where one helps
pub fn graph_error_to_miette(err: GraphError) -> Report {
    match err {
        GraphError::ExplicitAssetNotConfigured { id } => miette::miette!(
            "Explicit asset {} has no group entry\n\nHint: The snapshot's build tables are stale; record the build again",
            id
        ),
        GraphError::MisalignedTables(detail) => miette::miette!(
            "Build tables are misaligned: {}\n\nHint: 'file_to_bundle' and 'file_to_objects' must list the same files in the same order",
            detail
        ),
        GraphError::MissingBundle { group, bundle } => miette::miette!(
            "Group {} claims bundle '{}' that produced no file\n\nHint: Set policies.missing_bundle = \"create_empty\" to continue",
            group,
            bundle
        ),
        GraphError::UnresolvedDependency { asset, path } => miette::miette!(
            "Dependency '{}' of asset {} is not part of the build\n\nHint: Set policies.unresolved_dependency = \"warn\" to continue",
            path,
            asset
        ),
        GraphError::NameExhausted { name, attempts } => miette::miette!(
            "No free bundle name for '{}' after {} attempts\n\nHint: Raise naming.max_attempts or set policies.name_exhaustion = \"fallback\"",
            name,
            attempts
        ),
        other => miette::miette!("{}", other),
    }
}
