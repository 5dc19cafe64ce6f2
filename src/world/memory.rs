//! In-memory host world
//!
//! Sparse block storage used by the CLI and tests. Cells that were never set
//! read as air.

use ahash::AHashMap;

use crate::core::types::{BlockPos, Material, WorldId};
use crate::world::sampler::{HeightMap, HostWorld};

/// Height reported for columns with no blocks
pub const MIN_Y: i32 = -64;

#[derive(Debug, Clone)]
pub struct VoxelWorld {
    id: WorldId,
    blocks: AHashMap<BlockPos, Material>,
}

impl VoxelWorld {
    pub fn new(id: WorldId) -> Self {
        Self {
            id,
            blocks: AHashMap::new(),
        }
    }

    /// Fill a horizontal layer `[min_x, max_x] x [min_z, max_z]` at height `y`
    pub fn fill_layer(&mut self, min_x: i32, min_z: i32, max_x: i32, max_z: i32, y: i32, material: &Material) {
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                self.set_block(BlockPos::new(x, y, z), material.clone());
            }
        }
    }

    /// Number of non-air blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Count blocks whose material satisfies `f`
    pub fn count_where(&self, f: impl Fn(&Material) -> bool) -> usize {
        self.blocks.values().filter(|m| f(m)).count()
    }
}

impl HostWorld for VoxelWorld {
    fn id(&self) -> &WorldId {
        &self.id
    }

    fn block(&self, pos: BlockPos) -> Material {
        self.blocks.get(&pos).cloned().unwrap_or_else(Material::air)
    }

    fn set_block(&mut self, pos: BlockPos, material: Material) {
        if material.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, material);
        }
    }

    fn highest_block_y(&self, x: i32, z: i32, heightmap: HeightMap) -> i32 {
        self.blocks
            .iter()
            .filter(|(pos, _)| pos.x == x && pos.z == z)
            .filter(|(_, material)| match heightmap {
                HeightMap::WorldSurface => true,
                HeightMap::OceanFloor => material.is_solid(),
            })
            .map(|(pos, _)| pos.y)
            .max()
            .unwrap_or(MIN_Y)
    }
}
