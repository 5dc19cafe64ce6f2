//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer block coordinate in a host world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Translate by the given per-axis offsets
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Component-wise minimum
    pub fn min(&self, other: &Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Component-wise maximum
    pub fn max(&self, other: &Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// The four neighbours on the same height plane (+X, -X, +Z, -Z)
    pub fn horizontal_neighbors(&self) -> [BlockPos; 4] {
        [
            self.offset(1, 0, 0),
            self.offset(-1, 0, 0),
            self.offset(0, 0, 1),
            self.offset(0, 0, -1),
        ]
    }
}

impl std::ops::Add for BlockPos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl From<[i32; 3]> for BlockPos {
    fn from(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Block material identifier, optionally carrying a state suffix
///
/// Materials are compared by their full text, so `oak_leaves` and
/// `oak_leaves[persistent=true]` are different blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Material(String);

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn air() -> Self {
        Self::new("air")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Material name without any `[state]` suffix
    pub fn base_name(&self) -> &str {
        self.0.split('[').next().unwrap_or(&self.0)
    }

    pub fn is_air(&self) -> bool {
        matches!(self.base_name(), "air" | "cave_air" | "void_air")
    }

    pub fn is_fluid(&self) -> bool {
        matches!(self.base_name(), "water" | "lava")
    }

    pub fn is_leaves(&self) -> bool {
        self.base_name().ends_with("_leaves")
    }

    pub fn is_sapling(&self) -> bool {
        self.base_name().ends_with("_sapling") || self.base_name().ends_with("_propagule")
    }

    /// Whether entities collide with this block
    pub fn is_solid(&self) -> bool {
        !(self.is_air() || self.is_fluid() || self.is_sapling())
    }

    /// Leaves variant that never decays
    pub fn persistent(&self) -> Self {
        if self.0.contains("persistent=") {
            return self.clone();
        }
        match self.0.strip_suffix(']') {
            Some(head) => Self(format!("{},persistent=true]", head)),
            None => Self(format!("{}[persistent=true]", self.0)),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Material {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a host world
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(pub String);

impl WorldId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the actor (usually a player) that caused a growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u64);

/// Host game tick counter
pub type Tick = u64;

/// Tree species a sapling grows into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreeSpecies {
    Tree,
    BigTree,
    Redwood,
    TallRedwood,
    MegaRedwood,
    Birch,
    TallBirch,
    Jungle,
    SmallJungle,
    JungleBush,
    CocoaTree,
    Swamp,
    Acacia,
    DarkOak,
    RedMushroom,
    BrownMushroom,
    CrimsonFungus,
    WarpedFungus,
    Azalea,
    Mangrove,
    Chorus,
}

impl TreeSpecies {
    pub const ALL: [TreeSpecies; 21] = [
        TreeSpecies::Tree,
        TreeSpecies::BigTree,
        TreeSpecies::Redwood,
        TreeSpecies::TallRedwood,
        TreeSpecies::MegaRedwood,
        TreeSpecies::Birch,
        TreeSpecies::TallBirch,
        TreeSpecies::Jungle,
        TreeSpecies::SmallJungle,
        TreeSpecies::JungleBush,
        TreeSpecies::CocoaTree,
        TreeSpecies::Swamp,
        TreeSpecies::Acacia,
        TreeSpecies::DarkOak,
        TreeSpecies::RedMushroom,
        TreeSpecies::BrownMushroom,
        TreeSpecies::CrimsonFungus,
        TreeSpecies::WarpedFungus,
        TreeSpecies::Azalea,
        TreeSpecies::Mangrove,
        TreeSpecies::Chorus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TreeSpecies::Tree => "TREE",
            TreeSpecies::BigTree => "BIG_TREE",
            TreeSpecies::Redwood => "REDWOOD",
            TreeSpecies::TallRedwood => "TALL_REDWOOD",
            TreeSpecies::MegaRedwood => "MEGA_REDWOOD",
            TreeSpecies::Birch => "BIRCH",
            TreeSpecies::TallBirch => "TALL_BIRCH",
            TreeSpecies::Jungle => "JUNGLE",
            TreeSpecies::SmallJungle => "SMALL_JUNGLE",
            TreeSpecies::JungleBush => "JUNGLE_BUSH",
            TreeSpecies::CocoaTree => "COCOA_TREE",
            TreeSpecies::Swamp => "SWAMP",
            TreeSpecies::Acacia => "ACACIA",
            TreeSpecies::DarkOak => "DARK_OAK",
            TreeSpecies::RedMushroom => "RED_MUSHROOM",
            TreeSpecies::BrownMushroom => "BROWN_MUSHROOM",
            TreeSpecies::CrimsonFungus => "CRIMSON_FUNGUS",
            TreeSpecies::WarpedFungus => "WARPED_FUNGUS",
            TreeSpecies::Azalea => "AZALEA",
            TreeSpecies::Mangrove => "MANGROVE",
            TreeSpecies::Chorus => "CHORUS",
        }
    }
}

impl fmt::Display for TreeSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeSpecies {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TreeSpecies::ALL
            .iter()
            .copied()
            .find(|species| species.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown tree species: {}", s))
    }
}
