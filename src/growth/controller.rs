//! Growth override controller
//!
//! Ties the pieces together for one sapling:
//! region search -> footprint -> resolution -> placement -> deferred notification
//!
//! Everything that can fail is checked before the world is touched, so a
//! trigger either stages a whole structure or leaves the world as it was.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::OverrideConfig;
use crate::core::error::OverrideError;
use crate::core::types::Material;
use crate::growth::events::StructureGrownEvent;
use crate::growth::report::FaultReporter;
use crate::growth::scheduler::SyncScheduler;
use crate::growth::trigger::{DeferReason, GrowthOutcome, GrowthTrigger};
use crate::placement::catalog::ObjectCatalog;
use crate::placement::executor::{PlacementContext, PlacementExecutor};
use crate::placement::resolver::resolve;
use crate::placement::scopes::{ScopeLookup, WorldDirectory};
use crate::spatial::cuboid::shrink_to_footprint;
use crate::spatial::region::find_connected;
use crate::world::sampler::{HostWorld, WorldPlacer};

/// Decides whether a growing sapling is replaced by a configured structure
pub struct GrowthController<'a, D, C, E> {
    worlds: &'a D,
    catalog: &'a C,
    executor: &'a E,
    reporter: &'a dyn FaultReporter,
    config: OverrideConfig,
}

impl<'a, D, C, E> GrowthController<'a, D, C, E>
where
    D: WorldDirectory,
    C: ObjectCatalog,
    E: PlacementExecutor,
{
    pub fn new(
        worlds: &'a D,
        catalog: &'a C,
        executor: &'a E,
        reporter: &'a dyn FaultReporter,
        config: OverrideConfig,
    ) -> Self {
        Self {
            worlds,
            catalog,
            executor,
            reporter,
            config,
        }
    }

    /// Scheduler delivering this controller's notifications after the configured delay
    pub fn scheduler(&self) -> SyncScheduler {
        SyncScheduler::new(self.config.notify_delay_ticks)
    }

    /// Handle one growth trigger
    ///
    /// When the outcome vetoes default growth, the footprint has been cleared
    /// and a notification carrying the staged blocks is queued on `scheduler`.
    pub fn on_growth<W, R>(
        &self,
        world: &mut W,
        trigger: &GrowthTrigger,
        rng: &mut R,
        scheduler: &mut SyncScheduler,
    ) -> GrowthOutcome
    where
        W: HostWorld + ?Sized,
        R: Rng + ?Sized,
    {
        tracing::debug!("Received growth trigger in world {}", trigger.world);

        if !self.worlds.is_managed(&trigger.world) {
            tracing::debug!("Passed to default growth: world {} is not managed", trigger.world);
            return GrowthOutcome::deferred(DeferReason::Unmanaged);
        }

        let Some(scopes) = self.worlds.access(&trigger.world) else {
            tracing::debug!(
                "Passed to default growth: could not access configuration for {}",
                trigger.world
            );
            self.reporter
                .report(&OverrideError::WorldAccessUnavailable(trigger.world.clone()));
            return GrowthOutcome::deferred(DeferReason::AccessUnavailable);
        };

        if !scopes.root_tree_settings().enabled {
            tracing::debug!("Passed to default growth: tree overrides are disabled");
            return GrowthOutcome::deferred(DeferReason::Disabled);
        }

        tracing::debug!(
            "Sapling grew at {} for {} (bonemeal: {})",
            trigger.location,
            trigger.species,
            trigger.from_bonemeal
        );

        let sapling = world.block(trigger.location);
        let cluster = find_connected(trigger.location, self.config.region_cap, |pos| {
            world.block(pos) == sapling
        });
        let footprint = shrink_to_footprint(&cluster, trigger.location);
        let size = footprint.tree_size();
        tracing::debug!(
            "Sapling cluster of {} blocks gives a {} footprint",
            cluster.len(),
            size
        );

        let Some(definition) = resolve(scopes, trigger.location, trigger.species, size, rng) else {
            tracing::debug!("Passed to default growth: no placement matches {} at {}", trigger.species, size);
            return GrowthOutcome::deferred(DeferReason::NoPlacement);
        };

        let variants = definition.matching_variants(trigger.species, size);
        let Some(variant) = variants.choose(rng) else {
            return GrowthOutcome::deferred(DeferReason::NoPlacement);
        };

        let structure = match self.catalog.load(&variant.object) {
            Ok(structure) => structure,
            Err(fault) => {
                tracing::debug!(
                    "Passed to default growth: placement '{}' references a missing object",
                    definition.name
                );
                self.reporter.report(&fault);
                return GrowthOutcome::deferred(DeferReason::Fault);
            }
        };

        for cell in footprint.cells() {
            world.set_block(cell, Material::air());
        }

        let context = PlacementContext::roll(&definition.rules, rng);
        let mut placer = WorldPlacer::new(&*world, scopes.fluid_height());
        self.executor
            .place(footprint.center(), structure, &context, &mut placer);
        let blocks = placer.into_changes();
        let staged_blocks = blocks.len();

        tracing::info!(
            "Replaced {} sapling growth at {} with '{}' from '{}' ({} blocks staged)",
            trigger.species,
            trigger.location,
            structure.name,
            definition.name,
            staged_blocks
        );

        scheduler.schedule(StructureGrownEvent::new(
            trigger.world.clone(),
            trigger.location,
            trigger.species,
            trigger.from_bonemeal,
            trigger.actor,
            blocks,
        ));

        GrowthOutcome::Overridden {
            footprint,
            definition: definition.name.clone(),
            object: variant.object.clone(),
            staged_blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BlockPos, TreeSpecies, WorldId};
    use crate::growth::events::EventBus;
    use crate::growth::report::RecordingReporter;
    use crate::placement::catalog::{ObjectRegistry, StructureBlock, StructureData};
    use crate::placement::executor::StampExecutor;
    use crate::placement::schema::{
        DimensionConfig, Filter, PlacementDefinition, PlacementRules, ScopeConfig, TreeMode,
        TreeSettings, TreeSize, TreeVariant,
    };
    use crate::placement::scopes::{DimensionScopes, ManagedWorlds};
    use crate::world::memory::VoxelWorld;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world_id() -> WorldId {
        WorldId::new("world")
    }

    fn oak_definition(sizes: Vec<TreeSize>, object: &str) -> PlacementDefinition {
        PlacementDefinition {
            name: format!("{}_placement", object),
            rules: PlacementRules::default(),
            variants: vec![TreeVariant {
                species: Filter::Only(vec![TreeSpecies::Tree]),
                sizes: Filter::Only(sizes),
                object: object.into(),
            }],
        }
    }

    fn dimension(enabled: bool, trees: Vec<PlacementDefinition>) -> DimensionScopes {
        let mut plains = ScopeConfig::new("plains");
        plains.trees = trees;
        DimensionScopes::new(DimensionConfig {
            name: "overworld".into(),
            fluid_height: 62,
            tree_settings: TreeSettings {
                enabled,
                mode: TreeMode::Exclusive,
            },
            default_biome: "plains".into(),
            default_region: "lowlands".into(),
            biomes: vec![plains],
            regions: vec![ScopeConfig::new("lowlands")],
        })
        .unwrap()
    }

    fn catalog() -> ObjectRegistry {
        let mut registry = ObjectRegistry::new();
        registry.register(StructureData {
            name: "stick".into(),
            blocks: vec![
                StructureBlock { offset: [0, 0, 0], material: Material::new("oak_log") },
                StructureBlock { offset: [0, 1, 0], material: Material::new("oak_log") },
            ],
        });
        registry
    }

    fn sapling_world(size: i32) -> VoxelWorld {
        let mut world = VoxelWorld::new(world_id());
        world.fill_layer(-8, -8, 8, 8, 63, &Material::new("grass_block"));
        world.fill_layer(0, 0, size - 1, size - 1, 64, &Material::new("oak_sapling"));
        world
    }

    #[test]
    fn test_single_sapling_is_replaced() {
        let mut worlds = ManagedWorlds::new();
        worlds.attach(world_id(), dimension(true, vec![oak_definition(vec![TreeSize::new(1, 1)], "stick")]));
        let registry = catalog();
        let reporter = RecordingReporter::new();
        let controller = GrowthController::new(&worlds, &registry, &StampExecutor, &reporter, OverrideConfig::default());

        let mut world = sapling_world(1);
        let mut scheduler = SyncScheduler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let trigger = GrowthTrigger::new(world_id(), BlockPos::new(0, 64, 0), TreeSpecies::Tree);

        let outcome = controller.on_growth(&mut world, &trigger, &mut rng, &mut scheduler);
        assert!(outcome.vetoes_default());
        assert_eq!(scheduler.pending(), 1);
        // Sapling removed, logs not yet written
        assert!(world.block(BlockPos::new(0, 64, 0)).is_air());

        scheduler.run_tick(&mut world, &mut EventBus::new());
        assert_eq!(world.block(BlockPos::new(0, 65, 0)), Material::new("oak_log"));
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_two_by_two_uses_footprint_size() {
        let mut worlds = ManagedWorlds::new();
        worlds.attach(
            world_id(),
            dimension(true, vec![oak_definition(vec![TreeSize::new(2, 2)], "stick")]),
        );
        let registry = catalog();
        let reporter = RecordingReporter::new();
        let controller = GrowthController::new(&worlds, &registry, &StampExecutor, &reporter, OverrideConfig::default());

        let mut world = sapling_world(2);
        let mut scheduler = SyncScheduler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let trigger = GrowthTrigger::new(world_id(), BlockPos::new(1, 64, 1), TreeSpecies::Tree);

        match controller.on_growth(&mut world, &trigger, &mut rng, &mut scheduler) {
            GrowthOutcome::Overridden { footprint, .. } => {
                assert_eq!(footprint.tree_size(), TreeSize::new(2, 2));
            }
            other => panic!("expected override, got {:?}", other),
        }
        assert_eq!(world.count_where(|m| m.is_sapling()), 0);
    }

    #[test]
    fn test_missing_object_leaves_world_untouched() {
        let mut worlds = ManagedWorlds::new();
        worlds.attach(
            world_id(),
            dimension(true, vec![oak_definition(vec![TreeSize::new(1, 1)], "ghost")]),
        );
        let registry = catalog();
        let reporter = RecordingReporter::new();
        let controller = GrowthController::new(&worlds, &registry, &StampExecutor, &reporter, OverrideConfig::default());

        let mut world = sapling_world(1);
        let mut scheduler = SyncScheduler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let trigger = GrowthTrigger::new(world_id(), BlockPos::new(0, 64, 0), TreeSpecies::Tree);

        let outcome = controller.on_growth(&mut world, &trigger, &mut rng, &mut scheduler);
        assert_eq!(outcome.defer_reason(), Some(DeferReason::Fault));
        assert!(world.block(BlockPos::new(0, 64, 0)).is_sapling());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(reporter.faults().len(), 1);
    }

    #[test]
    fn test_scheduler_uses_configured_delay() {
        let mut worlds = ManagedWorlds::new();
        worlds.attach(world_id(), dimension(true, vec![oak_definition(vec![TreeSize::new(1, 1)], "stick")]));
        let registry = catalog();
        let reporter = RecordingReporter::new();
        let config = OverrideConfig {
            notify_delay_ticks: 3,
            ..OverrideConfig::default()
        };
        let controller = GrowthController::new(&worlds, &registry, &StampExecutor, &reporter, config);

        let mut world = sapling_world(1);
        let mut scheduler = controller.scheduler();
        assert_eq!(scheduler.delay(), 3);

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let trigger = GrowthTrigger::new(world_id(), BlockPos::new(0, 64, 0), TreeSpecies::Tree);
        controller.on_growth(&mut world, &trigger, &mut rng, &mut scheduler);

        let mut bus = EventBus::new();
        assert!(scheduler.run_tick(&mut world, &mut bus).is_empty());
        assert!(scheduler.run_tick(&mut world, &mut bus).is_empty());
        assert_eq!(scheduler.run_tick(&mut world, &mut bus).len(), 1);
    }

    #[test]
    fn test_disabled_dimension_defers() {
        let mut worlds = ManagedWorlds::new();
        worlds.attach(
            world_id(),
            dimension(false, vec![oak_definition(vec![TreeSize::new(1, 1)], "stick")]),
        );
        let registry = catalog();
        let reporter = RecordingReporter::new();
        let controller = GrowthController::new(&worlds, &registry, &StampExecutor, &reporter, OverrideConfig::default());

        let mut world = sapling_world(1);
        let mut scheduler = SyncScheduler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let trigger = GrowthTrigger::new(world_id(), BlockPos::new(0, 64, 0), TreeSpecies::Tree);

        let outcome = controller.on_growth(&mut world, &trigger, &mut rng, &mut scheduler);
        assert_eq!(outcome.defer_reason(), Some(DeferReason::Disabled));
        assert!(reporter.is_empty());
    }
}
