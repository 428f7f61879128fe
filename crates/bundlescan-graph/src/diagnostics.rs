//! Non-fatal findings collected while preparing, building and linking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AssetId, GroupId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The dependency oracle named a path that matches no asset in the build.
    UnresolvedDependency { asset: AssetId, path: String },
    /// An asset has no known path, so its dependencies cannot be queried.
    AssetWithoutPath { asset: AssetId },
    /// A group claims a bundle that no produced file belongs to.
    MissingBundle { group: GroupId, bundle: String },
    /// Two groups claim the same bundle. Both list it; `claimant`, the later
    /// claim, becomes the owner.
    BundleClaimedTwice {
        bundle: String,
        owner: GroupId,
        claimant: GroupId,
    },
    /// The name resolver gave up; `name` still collides.
    NameExhausted {
        group: GroupId,
        proposed: String,
        name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedDependency { asset, path } => {
                write!(f, "dependency '{path}' of asset {asset} is not part of the build")
            }
            Self::AssetWithoutPath { asset } => {
                write!(f, "asset {asset} has no known path; dependencies skipped")
            }
            Self::MissingBundle { group, bundle } => {
                write!(f, "group {group} claims bundle '{bundle}' that produced no file")
            }
            Self::BundleClaimedTwice {
                bundle,
                owner,
                claimant,
            } => write!(
                f,
                "bundle '{bundle}' claimed by group {owner} and again by group {claimant}, which now owns it"
            ),
            Self::NameExhausted {
                group,
                proposed,
                name,
            } => write!(
                f,
                "no free name for '{proposed}' in group {group}; kept colliding name '{name}'"
            ),
        }
    }
}

/// Ordered collection of [`Diagnostic`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
