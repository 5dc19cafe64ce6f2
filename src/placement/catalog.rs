//! Structure object catalog
//!
//! This module provides the `ObjectCatalog` seam the controller loads tree
//! structures through, and `ObjectRegistry`, which keeps structures in memory
//! and loads them from TOML files.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{OverrideError, Result};
use crate::core::types::{BlockPos, Material};

/// One block of a structure, relative to the structure origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureBlock {
    pub offset: [i32; 3],
    pub material: Material,
}

impl StructureBlock {
    pub fn offset(&self) -> BlockPos {
        BlockPos::from(self.offset)
    }
}

/// Block geometry of a placeable structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureData {
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<StructureBlock>,
}

/// Source of structure data by key
pub trait ObjectCatalog {
    fn load(&self, key: &str) -> Result<&StructureData>;
}

/// In-memory structure catalog
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: AHashMap<String, StructureData>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a structure under its own name, replacing any previous one
    pub fn register(&mut self, object: StructureData) {
        self.objects.insert(object.name.clone(), object);
    }

    /// Load a structure from a TOML file
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let content = std::fs::read_to_string(path)?;
        let object: StructureData = toml::from_str(&content).map_err(|e| {
            OverrideError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        let name = object.name.clone();
        self.register(object);
        Ok(name)
    }

    /// Load all .toml files from a directory recursively
    pub fn load_directory(&mut self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        self.load_directory_recursive(path, &mut names)?;
        Ok(names)
    }

    fn load_directory_recursive(&mut self, path: &Path, names: &mut Vec<String>) -> Result<()> {
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let entry_path = entry.path();

            if entry_path.is_dir() {
                self.load_directory_recursive(&entry_path, names)?;
            } else if entry_path.extension().map_or(false, |ext| ext == "toml") {
                names.push(self.load_file(&entry_path)?);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectCatalog for ObjectRegistry {
    fn load(&self, key: &str) -> Result<&StructureData> {
        self.objects
            .get(key)
            .ok_or_else(|| OverrideError::ObjectNotFound(key.to_string()))
    }
}
