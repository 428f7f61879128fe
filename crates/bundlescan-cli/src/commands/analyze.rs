//! Analyze command implementation.
//!
//! Replays a recorded build, builds the graph, closes it over asset
//! dependencies and reports duplicated assets.

use std::time::Instant;

use bundlescan_graph::{Analysis, AnalysisOutcome};
use tracing::info;

use crate::cli::AnalyzeArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::snapshot::Snapshot;
use crate::ui;

/// Execute the analyze command.
///
/// # Steps
///
/// 1. Load configuration (`--all` forces addressable duplicates into the report)
/// 2. Load the snapshot
/// 3. Run the analysis pipeline with the snapshot's tables as the build engine
/// 4. Print diagnostics, the report and a summary
/// 5. Write `--json`, `--dot` and `--graph` outputs when requested
///
/// # Errors
///
/// Returns errors for invalid configuration, unreadable snapshots, structural
/// inconsistencies in the recorded build and policies set to fail.
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    validate_outputs(&args)?;

    let mut config = utils::load_config(args.config.as_deref())?;
    if args.all {
        config.report.include_addressable = true;
    }

    let snapshot = Snapshot::load(&args.snapshot)?;
    ui::info(&format!("Analyzing {}", args.snapshot.display()));

    let started = Instant::now();
    let outcome = Analysis::run(
        &snapshot.groups,
        &snapshot.engine(),
        &snapshot.database,
        &config,
    )?;
    let elapsed = started.elapsed();

    let analysis = match outcome {
        AnalysisOutcome::NothingToAnalyze => {
            ui::warning("No group has a packing schema and entries; nothing to analyze");
            return Ok(());
        }
        AnalysisOutcome::Completed(analysis) => analysis,
    };

    ui::print_diagnostics(&analysis.diagnostics);
    ui::print_report(&analysis.report);
    ui::print_statistics(&analysis.report.statistics, elapsed);

    if let Some(path) = &args.json {
        utils::write_output(path, analysis.report.to_json()?)?;
        info!(path = %path.display(), "wrote report");
    }
    if let Some(path) = &args.dot {
        utils::write_output(path, analysis.graph.to_dot())?;
        info!(path = %path.display(), "wrote graph (dot)");
    }
    if let Some(path) = &args.graph {
        utils::write_output(path, analysis.graph.to_bytes()?)?;
        info!(path = %path.display(), "wrote graph (binary)");
    }

    if analysis.report.is_empty() {
        ui::success("No duplicated assets");
    } else {
        ui::warning(&format!(
            "{} duplicated assets in {} shared bundle sets",
            analysis.report.len(),
            analysis.report.clusters.len()
        ));
    }
    Ok(())
}

/// Output paths must differ from each other and from the snapshot.
fn validate_outputs(args: &AnalyzeArgs) -> Result<()> {
    let outputs = [
        ("--json", args.json.as_deref()),
        ("--dot", args.dot.as_deref()),
        ("--graph", args.graph.as_deref()),
    ];
    for (i, (flag, path)) in outputs.iter().enumerate() {
        let Some(path) = path else { continue };
        if *path == args.snapshot.as_path() {
            return Err(CliError::InvalidArgument(format!(
                "{flag} would overwrite the snapshot {}",
                path.display()
            )));
        }
        for (other_flag, other) in &outputs[i + 1..] {
            if *other == Some(*path) {
                return Err(CliError::InvalidArgument(format!(
                    "{flag} and {other_flag} both write {}",
                    path.display()
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> AnalyzeArgs {
        AnalyzeArgs {
            snapshot: PathBuf::from("build.json"),
            config: None,
            json: None,
            dot: None,
            graph: None,
            all: false,
        }
    }

    #[test]
    fn distinct_outputs_are_accepted() {
        let args = AnalyzeArgs {
            json: Some(PathBuf::from("report.json")),
            dot: Some(PathBuf::from("graph.dot")),
            ..args()
        };
        assert!(validate_outputs(&args).is_ok());
    }

    #[test]
    fn output_over_snapshot_is_rejected() {
        let args = AnalyzeArgs {
            json: Some(PathBuf::from("build.json")),
            ..args()
        };
        let err = validate_outputs(&args).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(msg) if msg.contains("--json")));
    }

    #[test]
    fn shared_output_path_is_rejected() {
        let args = AnalyzeArgs {
            dot: Some(PathBuf::from("out")),
            graph: Some(PathBuf::from("out")),
            ..args()
        };
        let err = validate_outputs(&args).unwrap_err();
        assert!(
            matches!(err, CliError::InvalidArgument(msg) if msg.contains("--dot and --graph"))
        );
    }
}
