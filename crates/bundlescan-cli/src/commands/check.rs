//! Check command implementation.
//!
//! Validates configuration without analyzing anything.

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// Loads the configuration exactly as `analyze` would (file, then
/// environment), validates it and optionally prints the effective values.
///
/// # Errors
///
/// Returns errors for a missing `--config` file or invalid values.
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let config = utils::load_config(args.config.as_deref())?;

    if args.print {
        print!("{}", config.to_toml()?);
    }

    ui::success("Configuration is valid!");
    Ok(())
}
