//! Deferred notifications on the host's game-logic thread
//!
//! The controller never notifies observers inside the trigger that caused a
//! placement. Notifications are queued here and processed when the host
//! advances its tick, so they run on the same thread but strictly later.

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::core::types::{Tick, WorldId};
use crate::growth::events::{EventBus, StructureGrownEvent};
use crate::world::sampler::{apply_changes, HostWorld};

/// Pending notifications and tick counter of one host world
#[derive(Debug, Default)]
struct WorldLane {
    tick: Tick,
    pending: VecDeque<(Tick, StructureGrownEvent)>,
}

/// Single-threaded queue of pending "structure grown" notifications
///
/// Each world keeps its own lane, advanced only when that world ticks, so a
/// notification is never lost while other worlds are ticked.
#[derive(Debug)]
pub struct SyncScheduler {
    delay: Tick,
    lanes: AHashMap<WorldId, WorldLane>,
}

impl Default for SyncScheduler {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SyncScheduler {
    /// Create a scheduler that delivers `delay` ticks after scheduling (at least 1)
    pub fn new(delay: Tick) -> Self {
        Self {
            delay: delay.max(1),
            lanes: AHashMap::new(),
        }
    }

    pub fn delay(&self) -> Tick {
        self.delay
    }

    /// Ticks run so far for `world`
    pub fn current_tick(&self, world: &WorldId) -> Tick {
        self.lanes.get(world).map_or(0, |lane| lane.tick)
    }

    /// Notifications waiting across all worlds
    pub fn pending(&self) -> usize {
        self.lanes.values().map(|lane| lane.pending.len()).sum()
    }

    pub fn pending_for(&self, world: &WorldId) -> usize {
        self.lanes.get(world).map_or(0, |lane| lane.pending.len())
    }

    pub fn schedule(&mut self, event: StructureGrownEvent) {
        let lane = self.lanes.entry(event.world.clone()).or_default();
        let due = lane.tick + self.delay;
        lane.pending.push_back((due, event));
    }

    /// Advance `world` by one tick and deliver its notifications that became due
    ///
    /// Each due event is dispatched to `bus`; events that survive uncancelled
    /// have their blocks written into `world`. Other worlds' notifications stay
    /// queued. Returns the delivered events.
    pub fn run_tick<W: HostWorld + ?Sized>(
        &mut self,
        world: &mut W,
        bus: &mut EventBus,
    ) -> Vec<StructureGrownEvent> {
        let lane = self.lanes.entry(world.id().clone()).or_default();
        lane.tick += 1;
        let mut delivered = Vec::new();

        // Due times are non-decreasing because the delay is fixed
        while lane.pending.front().map_or(false, |(due, _)| *due <= lane.tick) {
            let Some((_, mut event)) = lane.pending.pop_front() else {
                break;
            };

            bus.dispatch(&mut event);

            if event.is_cancelled() {
                tracing::debug!(
                    "Structure grown event at {} was cancelled; {} blocks discarded",
                    event.location,
                    event.blocks.len()
                );
            } else {
                apply_changes(world, &event.blocks);
                tracing::debug!(
                    "Finalized {} blocks for structure grown at {}",
                    event.blocks.len(),
                    event.location
                );
            }

            delivered.push(event);
        }

        delivered
    }
}
