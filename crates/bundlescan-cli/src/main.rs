//! bundlescan CLI - find assets duplicated across content bundles.
//!
//! Parses arguments, initializes logging and dispatches to the command.

use bundlescan_cli::{cli, commands, error, logger, ui};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // settings from the config file only tune output; load errors surface
    // again when the command loads the full configuration
    let settings = commands::load_settings(args.command.config_path());
    let no_color = args.no_color || settings.no_color;

    logger::init_logger(args.verbose, args.quiet, no_color, settings.log_level.as_deref());
    ui::init_colors(no_color);

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args),
        cli::Command::Plan(plan_args) => commands::plan_execute(plan_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
    };

    result.map_err(error::cli_error_to_miette)
}
