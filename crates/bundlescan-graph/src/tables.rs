//! Raw build tables emitted by the build engine.
//!
//! The engine reports two index-aligned tables keyed by produced file:
//! file → bundle name and file → contained objects. They are zipped into a
//! single list of [`ProducedFile`] up front so the alignment is checked once
//! instead of trusted during graph construction.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{AssetId, Error, FxIndexMap, GroupId, Result};

/// One object serialized into a produced file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectIdentifier {
    pub guid: AssetId,
    #[serde(default)]
    pub local_id: i64,
}

impl ObjectIdentifier {
    pub fn new(guid: AssetId, local_id: i64) -> Self {
        Self { guid, local_id }
    }
}

/// A produced file paired with its bundle and contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducedFile {
    pub file: String,
    pub bundle: String,
    pub objects: Vec<ObjectIdentifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBuildTables", into = "RawBuildTables")]
pub struct BuildTables {
    pub files: Vec<ProducedFile>,
    /// Explicitly requested asset → files it produced.
    pub asset_to_files: FxIndexMap<AssetId, Vec<String>>,
    /// Group → names of the bundles it produced.
    pub group_to_bundles: FxIndexMap<GroupId, Vec<String>>,
}

impl BuildTables {
    /// Zip the two index-aligned engine tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MisalignedTables`] when the tables differ in length,
    /// name different files at the same position or list a file twice.
    pub fn from_parallel<B, O>(
        file_to_bundle: B,
        file_to_objects: O,
        asset_to_files: FxIndexMap<AssetId, Vec<String>>,
        group_to_bundles: FxIndexMap<GroupId, Vec<String>>,
    ) -> Result<Self>
    where
        B: IntoIterator<Item = (String, String)>,
        O: IntoIterator<Item = (String, Vec<ObjectIdentifier>)>,
    {
        let bundles: Vec<_> = file_to_bundle.into_iter().collect();
        let objects: Vec<_> = file_to_objects.into_iter().collect();

        if bundles.len() != objects.len() {
            return Err(Error::MisalignedTables(format!(
                "file→bundle has {} entries but file→objects has {}",
                bundles.len(),
                objects.len()
            )));
        }

        let mut files = Vec::with_capacity(bundles.len());
        let mut seen = FxHashSet::default();
        for (position, ((file, bundle), (object_file, objects))) in
            bundles.into_iter().zip(objects).enumerate()
        {
            if file != object_file {
                return Err(Error::MisalignedTables(format!(
                    "position {position}: file→bundle names '{file}' but file→objects names '{object_file}'"
                )));
            }
            if !seen.insert(file.clone()) {
                return Err(Error::MisalignedTables(format!(
                    "position {position}: file '{file}' is listed more than once"
                )));
            }
            files.push(ProducedFile {
                file,
                bundle,
                objects,
            });
        }

        Ok(Self {
            files,
            asset_to_files,
            group_to_bundles,
        })
    }

    /// An object is explicit when its asset has an entry in `asset_to_files`.
    pub fn is_explicit(&self, id: &AssetId) -> bool {
        self.asset_to_files.contains_key(id)
    }

    /// Bundle names in file order, repeated once per produced file.
    pub fn bundle_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.bundle.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// On-disk shape of [`BuildTables`]: the engine's four tables as-is.
///
/// Tables are keyed maps, so a file key repeated inside one JSON object is
/// collapsed by the map (last entry wins) before it reaches
/// [`BuildTables::from_parallel`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBuildTables {
    #[serde(default)]
    pub file_to_bundle: FxIndexMap<String, String>,
    #[serde(default)]
    pub file_to_objects: FxIndexMap<String, Vec<ObjectIdentifier>>,
    #[serde(default)]
    pub asset_to_files: FxIndexMap<AssetId, Vec<String>>,
    #[serde(default)]
    pub group_to_bundles: FxIndexMap<GroupId, Vec<String>>,
}

impl TryFrom<RawBuildTables> for BuildTables {
    type Error = Error;

    fn try_from(raw: RawBuildTables) -> Result<Self> {
        Self::from_parallel(
            raw.file_to_bundle,
            raw.file_to_objects,
            raw.asset_to_files,
            raw.group_to_bundles,
        )
    }
}

impl From<BuildTables> for RawBuildTables {
    fn from(tables: BuildTables) -> Self {
        let mut raw = RawBuildTables {
            asset_to_files: tables.asset_to_files,
            group_to_bundles: tables.group_to_bundles,
            ..Default::default()
        };
        for produced in tables.files {
            raw.file_to_bundle
                .insert(produced.file.clone(), produced.bundle);
            raw.file_to_objects.insert(produced.file, produced.objects);
        }
        raw
    }
}
