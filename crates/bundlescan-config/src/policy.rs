//! Policies for the non-fatal conditions met while building a graph.
//!
//! Each policy picks between degrading gracefully (the condition is recorded
//! as a diagnostic and the run continues) and failing fast.

use serde::{Deserialize, Serialize};

/// What to do when the dependency oracle returns a path that matches no asset
/// in the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedDependencyPolicy {
    /// Drop the edge without a trace.
    Skip,
    /// Drop the edge, log a warning and record a diagnostic.
    #[default]
    Warn,
    /// Abort the analysis.
    Fail,
}

/// What to do when the unique-name resolver runs out of attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameExhaustionPolicy {
    /// Keep the last attempted (still colliding) name and record a diagnostic.
    #[default]
    Fallback,
    /// Abort packing preparation.
    Fail,
}

/// What to do when a group claims a bundle that never appeared in the
/// produced-file tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingBundlePolicy {
    /// Create an empty bundle record, link it and record a diagnostic.
    #[default]
    CreateEmpty,
    /// Abort the analysis.
    Fail,
}
