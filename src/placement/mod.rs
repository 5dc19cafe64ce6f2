//! Tree placement configuration, resolution and execution
//!
//! Dimension files describe which structures may replace a sapling in each
//! biome and region. The resolver picks one definition for a sapling and the
//! executor stamps the chosen structure through a block sampler.

pub mod catalog;
pub mod executor;
pub mod resolver;
pub mod schema;
pub mod scopes;

pub use catalog::{ObjectCatalog, ObjectRegistry, StructureBlock, StructureData};
pub use executor::{PlacementContext, PlacementExecutor, Rotation, StampExecutor};
pub use resolver::{candidates, resolve};
pub use schema::{
    Area, DimensionConfig, Filter, PlacementDefinition, PlacementRules, ScopeConfig, TreeMode,
    TreeSettings, TreeSize, TreeVariant,
};
pub use scopes::{DimensionScopes, ManagedWorlds, ScopeLookup, WorldDirectory};
