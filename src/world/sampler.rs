//! Block access seams between the override logic and the host world
//!
//! `HostWorld` is what the host engine exposes. `BlockSampler` is the narrower
//! capability a placement executor writes through. `WorldPlacer` adapts the
//! first to the second for one trigger, staging every write instead of
//! applying it.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{BlockPos, Material, WorldId};

/// Height map used for surface queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightMap {
    /// Highest non-air block, fluids included
    WorldSurface,
    /// Highest solid block, ignoring fluids
    OceanFloor,
}

/// Live world storage owned by the host engine
pub trait HostWorld {
    fn id(&self) -> &WorldId;

    fn block(&self, pos: BlockPos) -> Material;

    fn set_block(&mut self, pos: BlockPos, material: Material);

    fn highest_block_y(&self, x: i32, z: i32, heightmap: HeightMap) -> i32;
}

/// Read/write block capability handed to a placement executor
pub trait BlockSampler {
    fn material_at(&self, pos: BlockPos) -> Material;

    fn set_material(&mut self, pos: BlockPos, material: Material);

    fn highest_block_y(&self, x: i32, z: i32, ignore_fluid: bool) -> i32;

    fn is_solid(&self, pos: BlockPos) -> bool {
        self.material_at(pos).is_solid()
    }

    fn fluid_height(&self) -> i32;

    fn is_underwater(&self, _x: i32, _z: i32) -> bool {
        false
    }

    /// Whether leaves written through this sampler must never decay
    fn preserves_leaves(&self) -> bool {
        false
    }
}

/// A block write waiting to be applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockChange {
    pub pos: BlockPos,
    pub material: Material,
}

/// Per-trigger placement target over a host world
///
/// Reads go to the world, except for cells this placer has already written.
/// Writes are recorded in order, one entry per cell, and only reach the
/// world when the change list is applied later.
pub struct WorldPlacer<'w, W: HostWorld + ?Sized> {
    world: &'w W,
    fluid_height: i32,
    changes: Vec<BlockChange>,
    index: AHashMap<BlockPos, usize>,
}

impl<'w, W: HostWorld + ?Sized> WorldPlacer<'w, W> {
    pub fn new(world: &'w W, fluid_height: i32) -> Self {
        Self {
            world,
            fluid_height,
            changes: Vec::new(),
            index: AHashMap::new(),
        }
    }

    pub fn changes(&self) -> &[BlockChange] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<BlockChange> {
        self.changes
    }
}

impl<'w, W: HostWorld + ?Sized> BlockSampler for WorldPlacer<'w, W> {
    fn material_at(&self, pos: BlockPos) -> Material {
        match self.index.get(&pos) {
            Some(&i) => self.changes[i].material.clone(),
            None => self.world.block(pos),
        }
    }

    fn set_material(&mut self, pos: BlockPos, material: Material) {
        match self.index.get(&pos) {
            Some(&i) => self.changes[i].material = material,
            None => {
                self.index.insert(pos, self.changes.len());
                self.changes.push(BlockChange { pos, material });
            }
        }
    }

    fn highest_block_y(&self, x: i32, z: i32, ignore_fluid: bool) -> i32 {
        let heightmap = if ignore_fluid {
            HeightMap::OceanFloor
        } else {
            HeightMap::WorldSurface
        };
        self.world.highest_block_y(x, z, heightmap)
    }

    fn fluid_height(&self) -> i32 {
        self.fluid_height
    }

    fn preserves_leaves(&self) -> bool {
        true
    }
}

/// Write a list of staged changes into the world
pub fn apply_changes<W: HostWorld + ?Sized>(world: &mut W, changes: &[BlockChange]) {
    for change in changes {
        world.set_block(change.pos, change.material.clone());
    }
}
