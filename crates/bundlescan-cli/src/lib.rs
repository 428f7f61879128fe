//! bundlescan CLI.
//!
//! Loads a recorded build snapshot, runs the bundle analysis over it and
//! reports assets duplicated across bundles.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - One module per subcommand, each with an `execute` function
//! - [`snapshot`] - The recorded build: groups, build tables and asset database
//! - [`error`] - `CliError` and its conversion to miette reports
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - Status messages and report formatting

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod snapshot;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
pub use snapshot::Snapshot;
