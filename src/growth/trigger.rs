//! Growth triggers and their outcomes

use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, BlockPos, TreeSpecies, WorldId};
use crate::spatial::cuboid::Cuboid;

/// A sapling about to grow, as reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthTrigger {
    pub world: WorldId,
    pub location: BlockPos,
    pub species: TreeSpecies,
    pub from_bonemeal: bool,
    #[serde(default)]
    pub actor: Option<ActorId>,
}

impl GrowthTrigger {
    pub fn new(world: WorldId, location: BlockPos, species: TreeSpecies) -> Self {
        Self {
            world,
            location,
            species,
            from_bonemeal: false,
            actor: None,
        }
    }

    pub fn with_bonemeal(mut self, actor: Option<ActorId>) -> Self {
        self.from_bonemeal = true;
        self.actor = actor;
        self
    }
}

/// Why a trigger was handed back to default growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferReason {
    /// World is not managed by this system
    Unmanaged,
    /// World is managed but its configuration is unreachable
    AccessUnavailable,
    /// Tree overrides are switched off for the dimension
    Disabled,
    /// No placement definition fits the sapling
    NoPlacement,
    /// A configuration fault was reported before anything was changed
    Fault,
}

/// What the override did with a sapling
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GrowthOutcome {
    /// Default growth proceeds untouched
    Deferred { reason: DeferReason },
    /// Default growth is vetoed and a structure was staged
    Overridden {
        footprint: Cuboid,
        definition: String,
        object: String,
        staged_blocks: usize,
    },
}

impl GrowthOutcome {
    pub fn deferred(reason: DeferReason) -> Self {
        GrowthOutcome::Deferred { reason }
    }

    /// Whether the host must cancel its default growth
    pub fn vetoes_default(&self) -> bool {
        matches!(self, GrowthOutcome::Overridden { .. })
    }

    pub fn defer_reason(&self) -> Option<DeferReason> {
        match self {
            GrowthOutcome::Deferred { reason } => Some(*reason),
            GrowthOutcome::Overridden { .. } => None,
        }
    }
}
