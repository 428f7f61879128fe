//! Subcommand definitions.

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a recorded build and report duplicated assets
    ///
    /// The snapshot is a JSON document with three optional sections:
    /// `groups` (group configuration), `tables` (the build engine's output
    /// tables) and `database` (asset paths and their static dependencies).
    Analyze(AnalyzeArgs),

    /// Print the bundle requests the configured groups produce
    ///
    /// Bundle names are shown after collision resolution, so this is the
    /// list the build engine would receive.
    Plan(PlanArgs),

    /// Validate the configuration without analyzing anything
    Check(CheckArgs),
}

impl Command {
    /// The `--config` path given to the command, if any.
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Self::Analyze(args) => args.config.as_deref(),
            Self::Plan(args) => args.config.as_deref(),
            Self::Check(args) => args.config.as_deref(),
        }
    }
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Recorded build snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Configuration file (defaults to ./bundlescan.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the duplicate report as JSON
    #[arg(long, value_name = "OUT")]
    pub json: Option<PathBuf>,

    /// Write the build graph in Graphviz DOT format
    #[arg(long, value_name = "OUT")]
    pub dot: Option<PathBuf>,

    /// Write the build graph in the binary graph format
    #[arg(long, value_name = "OUT")]
    pub graph: Option<PathBuf>,

    /// Report every duplicated asset, including ones placed in a group
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Recorded build snapshot (JSON); only `groups` is read
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Configuration file (defaults to ./bundlescan.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file (defaults to ./bundlescan.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML
    #[arg(long)]
    pub print: bool,
}
