//! Plan command implementation.

use bundlescan_graph::{SchemaPacker, prepare_packing};

use crate::cli::PlanArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::ui;

/// Execute the plan command.
///
/// Prepares bundle requests for the snapshot's groups and prints them,
/// together with any name-exhaustion diagnostics. Nothing is built.
pub fn execute(args: PlanArgs) -> Result<()> {
    let config = utils::load_config(args.config.as_deref())?;
    let snapshot = Snapshot::load(&args.snapshot)?;

    let plan = prepare_packing(&snapshot.groups, &SchemaPacker, &config)?;

    ui::print_diagnostics(&plan.diagnostics);
    ui::print_plan(&plan);

    if plan.is_empty() {
        ui::warning("No group produced a bundle request");
    } else {
        ui::success(&format!(
            "{} bundle requests from {} groups",
            plan.inputs.len(),
            plan.group_to_bundles().len()
        ));
    }
    Ok(())
}
