//! The asset database collaborator: dependency oracle and id ↔ path mapping.

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::{AssetId, FxIndexMap};

/// Answers questions about project assets that the build tables do not carry.
pub trait AssetDatabase {
    /// Paths of the assets statically referenced by the asset at `path`.
    fn dependencies_of(&self, path: &str) -> Vec<String>;

    /// Project path of an asset id, when known.
    fn path_for_id(&self, _id: &AssetId) -> Option<String> {
        None
    }

    /// Asset id stored at a project path, when known.
    fn id_for_path(&self, _path: &str) -> Option<AssetId> {
        None
    }
}

/// A database that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDatabase;

impl AssetDatabase for NoDatabase {
    fn dependencies_of(&self, _path: &str) -> Vec<String> {
        Vec::new()
    }
}

/// In-memory database backed by recorded maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DatabaseFile", into = "DatabaseFile")]
pub struct StaticAssetDatabase {
    paths: FxIndexMap<AssetId, String>,
    ids: HashMap<String, AssetId>,
    dependencies: FxIndexMap<String, Vec<String>>,
}

impl StaticAssetDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, id: AssetId, path: impl Into<String>) -> Self {
        self.insert_asset(id, path);
        self
    }

    pub fn with_dependencies<I, S>(mut self, path: impl Into<String>, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies
            .insert(path.into(), deps.into_iter().map(Into::into).collect());
        self
    }

    pub fn insert_asset(&mut self, id: AssetId, path: impl Into<String>) {
        let path = path.into();
        self.ids.insert(path.clone(), id.clone());
        self.paths.insert(id, path);
    }
}

impl AssetDatabase for StaticAssetDatabase {
    fn dependencies_of(&self, path: &str) -> Vec<String> {
        self.dependencies.get(path).cloned().unwrap_or_default()
    }

    fn path_for_id(&self, id: &AssetId) -> Option<String> {
        self.paths.get(id).cloned()
    }

    fn id_for_path(&self, path: &str) -> Option<AssetId> {
        self.ids.get(path).cloned()
    }
}

impl<T: AssetDatabase + ?Sized> AssetDatabase for &T {
    fn dependencies_of(&self, path: &str) -> Vec<String> {
        (**self).dependencies_of(path)
    }

    fn path_for_id(&self, id: &AssetId) -> Option<String> {
        (**self).path_for_id(id)
    }

    fn id_for_path(&self, path: &str) -> Option<AssetId> {
        (**self).id_for_path(path)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DatabaseFile {
    #[serde(default)]
    assets: FxIndexMap<AssetId, String>,
    #[serde(default)]
    dependencies: FxIndexMap<String, Vec<String>>,
}

impl From<DatabaseFile> for StaticAssetDatabase {
    fn from(file: DatabaseFile) -> Self {
        let mut db = StaticAssetDatabase {
            dependencies: file.dependencies,
            ..Default::default()
        };
        for (id, path) in file.assets {
            db.insert_asset(id, path);
        }
        db
    }
}

impl From<StaticAssetDatabase> for DatabaseFile {
    fn from(db: StaticAssetDatabase) -> Self {
        DatabaseFile {
            assets: db.paths,
            dependencies: db.dependencies,
        }
    }
}
