//! Recipe persistence backends.
//!
//! A store keeps one record per id. The flat-file [`DirStore`] writes each
//! record as a pretty-printed JSON file in a directory; [`MemoryStore`] is a
//! HashMap-backed double for tests and embedding.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::recipe::RecipeRecord;

/// Storage collaborator consumed by the catalog.
pub trait RecipeStore {
    /// Ids of every stored record.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Read one record; `NotFound` if the id is not stored.
    fn read(&self, id: &str) -> Result<RecipeRecord, StoreError>;

    /// Store a new record; `AlreadyExists` if the id is taken.
    fn create(&mut self, id: &str, record: &RecipeRecord) -> Result<(), StoreError>;

    /// Overwrite an existing record; `NotFound` if the id is not stored.
    fn update(&mut self, id: &str, record: &RecipeRecord) -> Result<(), StoreError>;

    /// Remove a record; `NotFound` if the id is not stored.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Flat-file store: one `{id}.json` file per recipe in a directory.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Open a store in the given directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open a store in the default directory: `~/.cookbook/recipes`.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_dir())
    }

    /// The default store directory.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".cookbook").join("recipes"))
            .unwrap_or_else(|| PathBuf::from("data/recipes"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn write_record(&self, id: &str, record: &RecipeRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.record_path(id), json)?;
        Ok(())
    }
}

impl RecipeStore for DirStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem() {
                    ids.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        // Directory order is platform-dependent; keep listings deterministic.
        ids.sort();
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<RecipeRecord, StoreError> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn create(&mut self, id: &str, record: &RecipeRecord) -> Result<(), StoreError> {
        if self.record_path(id).exists() {
            return Err(StoreError::AlreadyExists(id.to_string()));
        }
        debug!(id, "creating recipe file");
        self.write_record(id, record)
    }

    fn update(&mut self, id: &str, record: &RecipeRecord) -> Result<(), StoreError> {
        if !self.record_path(id).exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!(id, "updating recipe file");
        self.write_record(id, record)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!(id, "removing recipe file");
        fs::remove_file(path)?;
        Ok(())
    }
}

/// In-memory store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, RecipeRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecipeStore for MemoryStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids: Vec<String> = self.records.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<RecipeRecord, StoreError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn create(&mut self, id: &str, record: &RecipeRecord) -> Result<(), StoreError> {
        if self.records.contains_key(id) {
            return Err(StoreError::AlreadyExists(id.to_string()));
        }
        self.records.insert(id.to_string(), record.clone());
        Ok(())
    }

    fn update(&mut self, id: &str, record: &RecipeRecord) -> Result<(), StoreError> {
        match self.records.get_mut(id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
