//! Collision resolution for bundle names.
//!
//! Groups pick bundle names independently, so two groups can propose the same
//! name. The resolver inserts an increasing integer right before the last `.`
//! (or at the end when there is none) until the name is free:
//! `bundle.dat` → `bundle1.dat` → `bundle2.dat` → …

use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;

use bundlescan_config::NamingConfig;
use indexmap::{IndexMap, IndexSet};

/// Anything that can answer "is this name taken?".
pub trait NameSet {
    fn contains_name(&self, name: &str) -> bool;
}

impl<S: BuildHasher> NameSet for HashSet<String, S> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<V, S: BuildHasher> NameSet for HashMap<String, V, S> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<S: BuildHasher> NameSet for IndexSet<String, S> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<V, S: BuildHasher> NameSet for IndexMap<String, V, S> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<T: AsRef<str>> NameSet for [T] {
    fn contains_name(&self, name: &str) -> bool {
        self.iter().any(|n| n.as_ref() == name)
    }
}

impl<T: NameSet + ?Sized> NameSet for &T {
    fn contains_name(&self, name: &str) -> bool {
        (**self).contains_name(name)
    }
}

/// Result of [`unique_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueName {
    pub name: String,
    /// The attempt bound was reached and `name` still collides.
    pub exhausted: bool,
}

/// Find a name not in `taken`, starting from `proposed`.
///
/// Suffixes run over `start_suffix..max_attempts`. When every attempt
/// collides the last attempted name is returned with `exhausted` set; it is
/// not unique.
///
/// ```
/// use bundlescan_graph::unique_name;
/// use std::collections::HashSet;
///
/// let taken: HashSet<String> = ["bundle.dat".to_string()].into();
/// assert_eq!(unique_name("bundle.dat", &taken, 1, 1000).name, "bundle1.dat");
/// ```
pub fn unique_name<N>(proposed: &str, taken: &N, start_suffix: u32, max_attempts: u32) -> UniqueName
where
    N: NameSet + ?Sized,
{
    let mut result = proposed.to_string();
    let split = proposed.rfind('.').unwrap_or(proposed.len());
    let (stem, extension) = proposed.split_at(split);

    let mut count = start_suffix;
    while taken.contains_name(&result) && count < max_attempts {
        result = format!("{stem}{count}{extension}");
        count += 1;
    }

    let exhausted = taken.contains_name(&result);
    UniqueName {
        name: result,
        exhausted,
    }
}

/// [`unique_name`] with configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameResolver {
    pub start_suffix: u32,
    pub max_attempts: u32,
}

impl NameResolver {
    pub fn resolve<N: NameSet + ?Sized>(&self, proposed: &str, taken: &N) -> UniqueName {
        unique_name(proposed, taken, self.start_suffix, self.max_attempts)
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        NamingConfig::default().into()
    }
}

impl From<NamingConfig> for NameResolver {
    fn from(config: NamingConfig) -> Self {
        Self {
            start_suffix: config.start_suffix,
            max_attempts: config.max_attempts,
        }
    }
}
