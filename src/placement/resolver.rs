//! Placement resolution across biome and region scopes
//!
//! Biome candidates always come first. The region is consulted when the
//! dimension's mode is `All`, or when the biome has nothing that fits.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::{BlockPos, TreeSpecies};
use crate::placement::schema::{PlacementDefinition, ScopeConfig, TreeMode, TreeSize};
use crate::placement::scopes::ScopeLookup;

/// Definitions in `scope` with at least one variant fitting the sapling
pub fn matching_definitions(
    scope: &ScopeConfig,
    species: TreeSpecies,
    size: TreeSize,
) -> impl Iterator<Item = &PlacementDefinition> {
    scope
        .trees
        .iter()
        .filter(move |def| def.has_match(species, size))
}

/// Ordered candidate list for a sapling at `location`
pub fn candidates<'s, S>(
    scopes: &'s S,
    location: BlockPos,
    species: TreeSpecies,
    size: TreeSize,
) -> Vec<&'s PlacementDefinition>
where
    S: ScopeLookup + ?Sized,
{
    let use_all = scopes.tree_settings_at(location).mode == TreeMode::All;

    let biome = scopes.biome_at(location);
    let mut found: Vec<&PlacementDefinition> =
        matching_definitions(biome, species, size).collect();

    if use_all || found.is_empty() {
        let region = scopes.region_at(location.x, location.z);
        found.extend(matching_definitions(region, species, size));
    }

    found
}

/// Pick one placement definition for a sapling, or `None` to keep default growth
pub fn resolve<'s, S, R>(
    scopes: &'s S,
    location: BlockPos,
    species: TreeSpecies,
    size: TreeSize,
    rng: &mut R,
) -> Option<&'s PlacementDefinition>
where
    S: ScopeLookup + ?Sized,
    R: Rng + ?Sized,
{
    let found = candidates(scopes, location, species, size);
    found.choose(rng).copied()
}
