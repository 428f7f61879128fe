//! Command-line interface definition for bundlescan.
//!
//! # Command Structure
//!
//! - `bundlescan analyze` - Run the analysis over a recorded build snapshot
//! - `bundlescan plan` - Show the bundle requests a snapshot's groups produce
//! - `bundlescan check` - Validate configuration

mod commands;

use clap::Parser;

pub use commands::{AnalyzeArgs, CheckArgs, Command, PlanArgs};

/// bundlescan - find assets duplicated across content bundles
#[derive(Parser, Debug)]
#[command(
    name = "bundlescan",
    version,
    about = "Find assets duplicated across content bundles",
    long_about = "bundlescan replays a recorded content build, links groups, bundles and\n\
                  assets into a dependency graph and reports assets that end up copied\n\
                  into more than one bundle without being placed in a group."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
