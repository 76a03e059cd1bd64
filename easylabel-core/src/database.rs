// easylabel-core/src/database.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::collection::Collection;
use crate::error::Result;

/// Database handle: a directory of collections, one file per
/// collection. Collections are created lazily on first access and
/// shared behind `Arc`, so every caller sees the same in-memory state.
pub struct Database {
    dir: PathBuf,
    collections: RwLock<HashMap<String, Arc<Collection>>>,
}

impl Database {
    /// Open or create a database directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        info!(path = %dir.display(), "database opened");
        Ok(Database {
            dir,
            collections: RwLock::new(HashMap::new()),
        })
    }

    /// Get a collection handle, opening it on first access.
    pub fn collection(&self, name: &str) -> Result<Arc<Collection>> {
        if let Some(coll) = self.collections.read().get(name) {
            return Ok(Arc::clone(coll));
        }

        let mut collections = self.collections.write();
        // Another thread may have opened it between the locks
        if let Some(coll) = collections.get(name) {
            return Ok(Arc::clone(coll));
        }
        let coll = Arc::new(Collection::open(name, &self.dir)?);
        collections.insert(name.to_string(), Arc::clone(&coll));
        Ok(coll)
    }

    /// Names of the collections opened so far.
    pub fn list_collections(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }
}
