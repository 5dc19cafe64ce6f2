//! Grovekeeper - Entry Point
//!
//! Loads a dimension and an object directory, grows a sapling patch in an
//! in-memory world, advances one tick and prints what happened.

use std::path::PathBuf;

use clap::Parser;
use grovekeeper::core::error::Result;
use grovekeeper::core::{BlockPos, Material, OverrideConfig, TreeSpecies, WorldId};
use grovekeeper::growth::{EventBus, GrowthController, GrowthOutcome, GrowthTrigger, TracingReporter};
use grovekeeper::placement::{DimensionScopes, ManagedWorlds, ObjectRegistry, StampExecutor};
use grovekeeper::world::{HostWorld, VoxelWorld};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Grow a sapling patch against a dimension configuration
#[derive(Parser, Debug)]
#[command(name = "grovekeeper")]
#[command(about = "Simulate sapling growth overrides for a dimension")]
struct Args {
    /// Dimension TOML file
    #[arg(long, default_value = "data/dimensions/overworld.toml")]
    dimension: PathBuf,

    /// Directory of structure object TOML files
    #[arg(long, default_value = "data/objects")]
    objects: PathBuf,

    /// Optional override config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sapling species (e.g. TREE, BIRCH, DARK_OAK)
    #[arg(long, default_value = "TREE")]
    species: TreeSpecies,

    /// Side length of the square sapling patch
    #[arg(long, default_value_t = 1)]
    patch: i32,

    /// X coordinate of the patch corner
    #[arg(long, default_value_t = 8)]
    x: i32,

    /// Z coordinate of the patch corner
    #[arg(long, default_value_t = 8)]
    z: i32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Mark the growth as bonemeal-triggered
    #[arg(long)]
    bonemeal: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct GrowReport {
    seed: u64,
    species: TreeSpecies,
    outcome: GrowthOutcome,
    delivered_events: usize,
    finalized_blocks: usize,
    remaining_saplings: usize,
}

const GROUND_Y: i32 = 63;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("grovekeeper=info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => OverrideConfig::load_file(path)?,
        None => OverrideConfig::default(),
    };
    if let Err(msg) = config.validate() {
        return Err(grovekeeper::core::OverrideError::InvalidConfig(msg));
    }

    let scopes = DimensionScopes::load_file(&args.dimension)?;
    tracing::info!("Loaded dimension '{}'", scopes.name());

    let mut registry = ObjectRegistry::new();
    let names = registry.load_directory(&args.objects)?;
    tracing::info!("Loaded {} structure objects", names.len());

    let world_id = WorldId::new("world");
    let mut worlds = ManagedWorlds::new();
    worlds.attach(world_id.clone(), scopes);

    let mut world = build_world(world_id.clone(), &args);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let reporter = TracingReporter;
    let controller = GrowthController::new(&worlds, &registry, &StampExecutor, &reporter, config);
    let mut scheduler = controller.scheduler();
    let mut bus = EventBus::new();

    let mut trigger = GrowthTrigger::new(world_id, BlockPos::new(args.x, GROUND_Y + 1, args.z), args.species);
    if args.bonemeal {
        trigger = trigger.with_bonemeal(None);
    }

    let outcome = controller.on_growth(&mut world, &trigger, &mut rng, &mut scheduler);

    let mut delivered = Vec::new();
    while scheduler.pending() > 0 {
        delivered.extend(scheduler.run_tick(&mut world, &mut bus));
    }

    let report = GrowReport {
        seed,
        species: args.species,
        outcome,
        delivered_events: delivered.len(),
        finalized_blocks: delivered
            .iter()
            .filter(|e| !e.is_cancelled())
            .map(|e| e.blocks.len())
            .sum(),
        remaining_saplings: world.count_where(|m| m.is_sapling()),
    };

    if args.format == "text" {
        print_text(&report, &world);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Flat grass field with a square sapling patch on top
fn build_world(id: WorldId, args: &Args) -> VoxelWorld {
    let mut world = VoxelWorld::new(id);
    let patch = args.patch.max(1);
    world.fill_layer(
        args.x - 8,
        args.z - 8,
        args.x + patch + 8,
        args.z + patch + 8,
        GROUND_Y,
        &Material::new("grass_block"),
    );

    let sapling = Material::new(sapling_for(args.species));
    world.fill_layer(
        args.x,
        args.z,
        args.x + patch - 1,
        args.z + patch - 1,
        GROUND_Y + 1,
        &sapling,
    );
    world
}

fn sapling_for(species: TreeSpecies) -> &'static str {
    match species {
        TreeSpecies::Birch | TreeSpecies::TallBirch => "birch_sapling",
        TreeSpecies::Redwood | TreeSpecies::TallRedwood | TreeSpecies::MegaRedwood => "spruce_sapling",
        TreeSpecies::Jungle | TreeSpecies::SmallJungle | TreeSpecies::JungleBush | TreeSpecies::CocoaTree => {
            "jungle_sapling"
        }
        TreeSpecies::Acacia => "acacia_sapling",
        TreeSpecies::DarkOak => "dark_oak_sapling",
        TreeSpecies::Azalea => "azalea_sapling",
        TreeSpecies::Mangrove => "mangrove_propagule",
        _ => "oak_sapling",
    }
}

fn print_text(report: &GrowReport, world: &VoxelWorld) {
    println!("\n=== GROVEKEEPER ===");
    println!("Seed: {}", report.seed);
    println!("Species: {}", report.species);
    match &report.outcome {
        GrowthOutcome::Deferred { reason } => {
            println!("Default growth kept ({:?})", reason);
        }
        GrowthOutcome::Overridden {
            footprint,
            definition,
            object,
            staged_blocks,
        } => {
            println!(
                "Overridden by '{}' using object '{}' on a {} footprint at {}",
                definition,
                object,
                footprint.tree_size(),
                footprint.center()
            );
            println!("Staged blocks: {}", staged_blocks);
            let top = world.highest_block_y(
                footprint.center().x,
                footprint.center().z,
                grovekeeper::world::HeightMap::WorldSurface,
            );
            println!("Tree top at y = {}", top);
        }
    }
    println!("Events delivered: {}", report.delivered_events);
    println!("Blocks finalized: {}", report.finalized_blocks);
    println!("Saplings left: {}", report.remaining_saplings);
}
