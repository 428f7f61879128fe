//! Command implementations for the bundlescan CLI.
//!
//! - [`analyze`] - Run the analysis over a recorded build
//! - [`plan`] - Show bundle requests after name resolution
//! - [`check`] - Configuration validation
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod analyze;
pub mod check;
pub mod plan;
pub(crate) mod utils;

pub use analyze::execute as analyze_execute;
pub use check::execute as check_execute;
pub use plan::execute as plan_execute;
pub use utils::load_settings;
