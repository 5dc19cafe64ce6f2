//! Writing a chosen structure into the world

use rand::Rng;

use crate::core::types::{BlockPos, Material};
use crate::placement::catalog::StructureData;
use crate::placement::schema::PlacementRules;
use crate::world::sampler::BlockSampler;

/// Quarter-turn rotation around the Y axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Clockwise90,
        Rotation::Clockwise180,
        Rotation::Clockwise270,
    ];

    pub fn apply(&self, offset: BlockPos) -> BlockPos {
        let BlockPos { x, y, z } = offset;
        match self {
            Rotation::None => BlockPos::new(x, y, z),
            Rotation::Clockwise90 => BlockPos::new(-z, y, x),
            Rotation::Clockwise180 => BlockPos::new(-x, y, -z),
            Rotation::Clockwise270 => BlockPos::new(z, y, -x),
        }
    }
}

/// Per-placement decisions derived from a definition's rules
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementContext {
    pub rules: PlacementRules,
    pub rotation: Rotation,
}

impl PlacementContext {
    pub fn new(rules: PlacementRules) -> Self {
        Self {
            rules,
            rotation: Rotation::None,
        }
    }

    /// Roll the random parts of a placement
    pub fn roll<R: Rng + ?Sized>(rules: &PlacementRules, rng: &mut R) -> Self {
        let rotation = if rules.rotate {
            Rotation::ALL[rng.gen_range(0..Rotation::ALL.len())]
        } else {
            Rotation::None
        };
        Self {
            rules: rules.clone(),
            rotation,
        }
    }
}

/// Sink that writes structure blocks through a sampler
pub trait PlacementExecutor {
    /// Place `structure` around `center`; returns the number of blocks written
    fn place(
        &self,
        center: BlockPos,
        structure: &StructureData,
        context: &PlacementContext,
        sampler: &mut dyn BlockSampler,
    ) -> usize;
}

/// Copies structure blocks verbatim relative to an anchor cell
///
/// Air in a structure is skipped rather than carved. Solid cells are kept
/// unless the rules allow replacing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct StampExecutor;

impl StampExecutor {
    fn anchor(center: BlockPos, context: &PlacementContext, sampler: &dyn BlockSampler) -> BlockPos {
        let [dx, dy, dz] = context.rules.translate;
        let mut anchor = center.offset(dx, dy, dz);
        if context.rules.snap_to_surface {
            anchor.y = sampler.highest_block_y(anchor.x, anchor.z, true) + 1 + dy;
        }
        anchor
    }
}

impl PlacementExecutor for StampExecutor {
    fn place(
        &self,
        center: BlockPos,
        structure: &StructureData,
        context: &PlacementContext,
        sampler: &mut dyn BlockSampler,
    ) -> usize {
        let anchor = Self::anchor(center, context, sampler);
        let mut written = 0;

        for block in &structure.blocks {
            if block.material.is_air() {
                continue;
            }

            let target = anchor + context.rotation.apply(block.offset());
            if !context.rules.replace_solid && sampler.is_solid(target) {
                continue;
            }

            let material: Material = if block.material.is_leaves() && sampler.preserves_leaves() {
                block.material.persistent()
            } else {
                block.material.clone()
            };
            sampler.set_material(target, material);
            written += 1;
        }

        written
    }
}
