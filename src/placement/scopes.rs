//! Configuration scopes consulted during resolution
//!
//! `ScopeLookup` is the read-only view the resolver and controller need of a
//! managed world's configuration. `DimensionScopes` is the implementation
//! built from a dimension TOML file, and `ManagedWorlds` maps host worlds to
//! their loaded dimensions.

use ahash::{AHashMap, AHashSet};
use std::path::Path;

use crate::core::error::{OverrideError, Result};
use crate::core::types::{BlockPos, WorldId};
use crate::placement::schema::{DimensionConfig, ScopeConfig, TreeSettings};

/// Read-only configuration lookup for one managed world
pub trait ScopeLookup {
    /// Tree settings of the root dimension, used for the on/off switch
    fn root_tree_settings(&self) -> &TreeSettings;

    /// Tree settings of the dimension active at `pos`, used for the mode
    fn tree_settings_at(&self, pos: BlockPos) -> &TreeSettings;

    fn biome_at(&self, pos: BlockPos) -> &ScopeConfig;

    fn region_at(&self, x: i32, z: i32) -> &ScopeConfig;

    fn fluid_height(&self) -> i32;
}

/// Compiled dimension configuration
///
/// Scope names are validated at construction; lookups never fail and fall
/// back to the dimension's default biome or region.
#[derive(Debug, Clone)]
pub struct DimensionScopes {
    name: String,
    fluid_height: i32,
    tree_settings: TreeSettings,
    biomes: Vec<ScopeConfig>,
    regions: Vec<ScopeConfig>,
    default_biome: usize,
    default_region: usize,
}

impl DimensionScopes {
    pub fn new(config: DimensionConfig) -> Result<Self> {
        let default_biome = index_of(&config.biomes, &config.default_biome, "default_biome")?;
        let default_region = index_of(&config.regions, &config.default_region, "default_region")?;

        for scopes in [&config.biomes, &config.regions] {
            let mut seen = AHashSet::new();
            for scope in scopes {
                if !seen.insert(scope.name.as_str()) {
                    return Err(OverrideError::InvalidConfig(format!(
                        "duplicate scope '{}' in dimension '{}'",
                        scope.name, config.name
                    )));
                }
            }
        }

        Ok(Self {
            name: config.name,
            fluid_height: config.fluid_height,
            tree_settings: config.tree_settings,
            biomes: config.biomes,
            regions: config.regions,
            default_biome,
            default_region,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DimensionConfig = toml::from_str(content)?;
        Self::new(config)
    }

    /// Load a dimension from a TOML file on disk
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn biome(&self, name: &str) -> Option<&ScopeConfig> {
        self.biomes.iter().find(|b| b.name == name)
    }

    pub fn region(&self, name: &str) -> Option<&ScopeConfig> {
        self.regions.iter().find(|r| r.name == name)
    }
}

fn index_of(scopes: &[ScopeConfig], name: &str, context: &str) -> Result<usize> {
    scopes
        .iter()
        .position(|s| s.name == name)
        .ok_or_else(|| OverrideError::UnknownScope {
            name: name.to_string(),
            context: context.to_string(),
        })
}

fn covering(scopes: &[ScopeConfig], x: i32, z: i32, default: usize) -> &ScopeConfig {
    scopes
        .iter()
        .find(|s| s.covers(x, z))
        .unwrap_or(&scopes[default])
}

impl ScopeLookup for DimensionScopes {
    fn root_tree_settings(&self) -> &TreeSettings {
        &self.tree_settings
    }

    fn tree_settings_at(&self, _pos: BlockPos) -> &TreeSettings {
        // Single-layer dimensions share one settings block
        &self.tree_settings
    }

    fn biome_at(&self, pos: BlockPos) -> &ScopeConfig {
        covering(&self.biomes, pos.x, pos.z, self.default_biome)
    }

    fn region_at(&self, x: i32, z: i32) -> &ScopeConfig {
        covering(&self.regions, x, z, self.default_region)
    }

    fn fluid_height(&self) -> i32 {
        self.fluid_height
    }
}

/// Which host worlds are managed, and how to reach their configuration
pub trait WorldDirectory {
    type Scopes: ScopeLookup;

    fn is_managed(&self, world: &WorldId) -> bool;

    /// Configuration of a managed world, if currently reachable
    fn access(&self, world: &WorldId) -> Option<&Self::Scopes>;
}

/// In-process world directory
///
/// A world can be managed without attached scopes, for example while its
/// dimension is being reloaded. Triggers in such a world are reported as
/// faults and handed back to default growth.
#[derive(Debug, Default)]
pub struct ManagedWorlds {
    managed: AHashSet<WorldId>,
    scopes: AHashMap<WorldId, DimensionScopes>,
}

impl ManagedWorlds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manage a world and attach its dimension
    pub fn attach(&mut self, world: WorldId, scopes: DimensionScopes) {
        self.managed.insert(world.clone());
        self.scopes.insert(world, scopes);
    }

    /// Drop a world's dimension while keeping it managed
    pub fn detach(&mut self, world: &WorldId) -> Option<DimensionScopes> {
        self.scopes.remove(world)
    }

    /// Stop managing a world entirely
    pub fn release(&mut self, world: &WorldId) {
        self.managed.remove(world);
        self.scopes.remove(world);
    }
}

impl WorldDirectory for ManagedWorlds {
    type Scopes = DimensionScopes;

    fn is_managed(&self, world: &WorldId) -> bool {
        self.managed.contains(world)
    }

    fn access(&self, world: &WorldId) -> Option<&DimensionScopes> {
        self.scopes.get(world)
    }
}
