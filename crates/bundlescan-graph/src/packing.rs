//! Packing-input preparation: the per-group bundle requests handed to the
//! build engine.
//!
//! Groups are packed independently, so two groups can propose the same
//! bundle name. Every proposed name is resolved against the names already
//! accepted before it is recorded as owned by its group.

use std::collections::BTreeSet;

use bundlescan_config::{AnalysisConfig, NameExhaustionPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::group::{AssetEntry, GroupCatalog, GroupConfig, PackingMode, PackingSchema};
use crate::naming::NameResolver;
use crate::{AssetId, Error, FxIndexMap, GroupId, Result};

/// Extension of every bundle the schema packer names.
const BUNDLE_EXTENSION: &str = ".bundle";

/// One bundle request: a bundle name and the assets to pack into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingInput {
    pub bundle: String,
    pub assets: Vec<AssetId>,
}

/// Turns one group into bundle requests.
pub trait BundlePacker {
    fn pack(&self, group: &GroupConfig, schema: &PackingSchema) -> Vec<PackingInput>;
}

/// Packs groups the way the engine's packing modes do.
///
/// Names are `{group}_assets_all.bundle` when packed together,
/// `{group}_assets_{file stem}.bundle` when packed separately and
/// `{group}_assets_{labels}.bundle` when packed by label. Name parts are
/// lowercased and spaces become underscores.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaPacker;

impl SchemaPacker {
    fn bundle_name(group: &GroupConfig, suffix: &str) -> String {
        format!(
            "{}_assets_{}{BUNDLE_EXTENSION}",
            sanitize(&group.name),
            sanitize(suffix)
        )
    }
}

impl BundlePacker for SchemaPacker {
    fn pack(&self, group: &GroupConfig, schema: &PackingSchema) -> Vec<PackingInput> {
        if group.entries.is_empty() {
            return Vec::new();
        }

        match schema.mode {
            PackingMode::PackTogether => vec![PackingInput {
                bundle: Self::bundle_name(group, "all"),
                assets: group.entries.iter().map(|e| e.id.clone()).collect(),
            }],
            PackingMode::PackSeparately => group
                .entries
                .iter()
                .map(|entry| PackingInput {
                    bundle: Self::bundle_name(group, file_stem(entry)),
                    assets: vec![entry.id.clone()],
                })
                .collect(),
            PackingMode::PackTogetherByLabel => {
                let mut by_labels: FxIndexMap<&BTreeSet<String>, Vec<AssetId>> =
                    FxIndexMap::default();
                for entry in &group.entries {
                    by_labels.entry(&entry.labels).or_default().push(entry.id.clone());
                }
                by_labels
                    .into_iter()
                    .map(|(labels, assets)| {
                        let suffix = if labels.is_empty() {
                            "all".to_string()
                        } else {
                            labels.iter().map(String::as_str).collect::<Vec<_>>().join("_")
                        };
                        PackingInput {
                            bundle: Self::bundle_name(group, &suffix),
                            assets,
                        }
                    })
                    .collect()
            }
        }
    }
}

fn sanitize(part: &str) -> String {
    part.to_lowercase().replace(' ', "_")
}

/// File name of the entry's path without extension, or the id when the path
/// is empty.
fn file_stem(entry: &AssetEntry) -> &str {
    if entry.path.is_empty() {
        return entry.id.as_str();
    }
    let name = entry.path.rsplit(['/', '\\']).next().unwrap_or(&entry.path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(i) => &name[..i],
    }
}

/// Bundle requests for a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackingPlan {
    pub inputs: Vec<PackingInput>,
    /// Accepted bundle name → the group that produced it.
    pub bundle_to_group: FxIndexMap<String, GroupId>,
    /// Entries of every group that was packed.
    pub entries: Vec<AssetEntry>,
    pub diagnostics: Diagnostics,
}

impl PackingPlan {
    /// No group produced a bundle request; there is nothing to build.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Bundle names grouped by owning group, in acceptance order.
    pub fn group_to_bundles(&self) -> FxIndexMap<GroupId, Vec<String>> {
        let mut map: FxIndexMap<GroupId, Vec<String>> = FxIndexMap::default();
        for (bundle, group) in &self.bundle_to_group {
            map.entry(group.clone()).or_default().push(bundle.clone());
        }
        map
    }
}

/// Prepare bundle requests for every group with a packing schema.
///
/// Groups are visited in catalog order. Each proposed bundle name that is
/// already owned is replaced by the first free name from the unique-name
/// resolver, then recorded as owned by the group.
///
/// # Errors
///
/// [`Error::NameExhausted`] under [`NameExhaustionPolicy::Fail`].
pub fn prepare_packing(
    catalog: &GroupCatalog,
    packer: &dyn BundlePacker,
    config: &AnalysisConfig,
) -> Result<PackingPlan> {
    let resolver = NameResolver::from(config.naming);
    let mut plan = PackingPlan::default();

    for group in catalog.groups() {
        let Some(schema) = &group.schema else {
            debug!(group = %group.id, "skipping group without packing schema");
            continue;
        };

        let mut inputs = packer.pack(group, schema);
        for input in &mut inputs {
            if plan.bundle_to_group.contains_key(&input.bundle) {
                let resolved = resolver.resolve(&input.bundle, &plan.bundle_to_group);
                if resolved.exhausted {
                    match config.policies.name_exhaustion {
                        NameExhaustionPolicy::Fail => {
                            return Err(Error::NameExhausted {
                                name: input.bundle.clone(),
                                attempts: resolver.max_attempts,
                            });
                        }
                        NameExhaustionPolicy::Fallback => {
                            warn!(group = %group.id, proposed = %input.bundle, name = %resolved.name, "bundle name resolution exhausted");
                            plan.diagnostics.push(Diagnostic::NameExhausted {
                                group: group.id.clone(),
                                proposed: input.bundle.clone(),
                                name: resolved.name.clone(),
                            });
                        }
                    }
                } else {
                    debug!(from = %input.bundle, to = %resolved.name, "renamed colliding bundle");
                }
                input.bundle = resolved.name;
            }

            plan.bundle_to_group
                .entry(input.bundle.clone())
                .or_insert_with(|| group.id.clone());
        }

        plan.inputs.extend(inputs);
        plan.entries.extend(group.entries.iter().cloned());
    }

    debug!(
        inputs = plan.inputs.len(),
        entries = plan.entries.len(),
        "prepared packing inputs"
    );
    Ok(plan)
}
