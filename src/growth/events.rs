//! The "structure grown" notification and its observers

use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, BlockPos, TreeSpecies, WorldId};
use crate::world::sampler::BlockChange;

/// Emitted after an override staged a structure
///
/// Observers may edit `blocks` or cancel the event. A cancelled event is
/// never applied to the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureGrownEvent {
    pub world: WorldId,
    pub location: BlockPos,
    pub species: TreeSpecies,
    pub from_bonemeal: bool,
    pub actor: Option<ActorId>,
    pub blocks: Vec<BlockChange>,
    cancelled: bool,
}

impl StructureGrownEvent {
    pub fn new(
        world: WorldId,
        location: BlockPos,
        species: TreeSpecies,
        from_bonemeal: bool,
        actor: Option<ActorId>,
        blocks: Vec<BlockChange>,
    ) -> Self {
        Self {
            world,
            location,
            species,
            from_bonemeal,
            actor,
            blocks,
            cancelled: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Something that wants to see, veto or adjust grown structures
pub trait GrowthObserver {
    fn on_structure_grown(&mut self, event: &mut StructureGrownEvent);
}

impl<F> GrowthObserver for F
where
    F: FnMut(&mut StructureGrownEvent),
{
    fn on_structure_grown(&mut self, event: &mut StructureGrownEvent) {
        self(event)
    }
}

/// Ordered list of observers
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn GrowthObserver>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer; observers run in subscription order
    pub fn subscribe(&mut self, observer: impl GrowthObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Run every observer, including after a cancellation so later ones can un-cancel
    pub fn dispatch(&mut self, event: &mut StructureGrownEvent) {
        for observer in &mut self.observers {
            observer.on_structure_grown(event);
        }
    }
}
