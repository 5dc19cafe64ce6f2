//! Tree placement schema types for TOML deserialization.
//!
//! A dimension file lists biome and region scopes. Each scope carries
//! placement definitions, and each definition is a bag of tree variants
//! filtered by species and sapling footprint size.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

use crate::core::types::TreeSpecies;

/// Width by depth of a sapling footprint, in blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeSize {
    pub width: u32,
    pub depth: u32,
}

impl TreeSize {
    pub const fn new(width: u32, depth: u32) -> Self {
        Self { width, depth }
    }

    /// Same dimensions in either horizontal orientation
    pub fn matches(&self, other: &TreeSize) -> bool {
        (self.width == other.width && self.depth == other.depth)
            || (self.width == other.depth && self.depth == other.width)
    }
}

impl fmt::Display for TreeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.depth)
    }
}

/// Either every value, or an explicit list
///
/// In TOML this is the string `"any"` or an array of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<T> {
    Any,
    Only(Vec<T>),
}

impl<T> Filter<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Filter::Any)
    }

    /// Whether any listed value satisfies `accepts` (always true for `Any`)
    pub fn accepts_by(&self, accepts: impl Fn(&T) -> bool) -> bool {
        match self {
            Filter::Any => true,
            Filter::Only(items) => items.iter().any(accepts),
        }
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn accepts(&self, value: &T) -> bool {
        self.accepts_by(|item| item == value)
    }
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::Only(Vec::new())
    }
}

// Custom serde implementation for Filter
// Handles both the string "any" and a list of values
impl<'de, T> Deserialize<'de> for Filter<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, SeqAccess, Unexpected, Visitor};

        struct FilterVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for FilterVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = Filter<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("string \"any\" or a list of values")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.eq_ignore_ascii_case("any") {
                    Ok(Filter::Any)
                } else {
                    Err(de::Error::invalid_value(Unexpected::Str(value), &self))
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Filter::Only(items))
            }
        }

        deserializer.deserialize_any(FilterVisitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for Filter<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Filter::Any => serializer.serialize_str("any"),
            Filter::Only(items) => items.serialize(serializer),
        }
    }
}

/// One concrete tree choice inside a placement definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeVariant {
    /// Sapling species this variant replaces
    pub species: Filter<TreeSpecies>,
    /// Footprint sizes this variant fits; an empty list never matches
    pub sizes: Filter<TreeSize>,
    /// Structure object key in the object catalog
    pub object: String,
}

impl TreeVariant {
    pub fn matches(&self, species: TreeSpecies, size: TreeSize) -> bool {
        self.sizes.accepts_by(|s| s.matches(&size)) && self.species.accepts(&species)
    }
}

/// How a chosen structure is put into the world
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRules {
    /// Rotate the structure by a random quarter turn
    pub rotate: bool,
    /// Offset applied to the footprint center before placing
    pub translate: [i32; 3],
    /// Place on the highest solid block of the center column instead of at sapling level
    pub snap_to_surface: bool,
    /// Allow structure blocks to overwrite solid blocks
    pub replace_solid: bool,
}

/// Weighted bag of tree variants sharing placement rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementDefinition {
    pub name: String,
    #[serde(default)]
    pub rules: PlacementRules,
    pub variants: Vec<TreeVariant>,
}

impl PlacementDefinition {
    pub fn has_match(&self, species: TreeSpecies, size: TreeSize) -> bool {
        self.variants.iter().any(|v| v.matches(species, size))
    }

    pub fn matching_variants(&self, species: TreeSpecies, size: TreeSize) -> Vec<&TreeVariant> {
        self.variants
            .iter()
            .filter(|v| v.matches(species, size))
            .collect()
    }
}

/// Horizontal rectangle in world coordinates, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl Area {
    pub fn contains(&self, x: i32, z: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z)
    }
}

/// A biome or region and the tree placements it contributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeConfig {
    pub name: String,
    /// Where this scope applies; empty means only as the dimension default
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub trees: Vec<PlacementDefinition>,
}

impl ScopeConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            areas: Vec::new(),
            trees: Vec::new(),
        }
    }

    pub fn covers(&self, x: i32, z: i32) -> bool {
        self.areas.iter().any(|a| a.contains(x, z))
    }
}

/// Whether resolution stops at the first scope with candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeMode {
    /// Use region candidates only when the biome has none
    #[default]
    Exclusive,
    /// Always combine biome and region candidates
    All,
}

/// Per-dimension switch for sapling overrides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    pub enabled: bool,
    pub mode: TreeMode,
}

/// Complete dimension file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionConfig {
    pub name: String,
    /// Sea level used by placements that care about fluids
    #[serde(default = "default_fluid_height")]
    pub fluid_height: i32,
    #[serde(default)]
    pub tree_settings: TreeSettings,
    pub default_biome: String,
    pub default_region: String,
    #[serde(default)]
    pub biomes: Vec<ScopeConfig>,
    #[serde(default)]
    pub regions: Vec<ScopeConfig>,
}

fn default_fluid_height() -> i32 {
    62
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(species: Filter<TreeSpecies>, sizes: Filter<TreeSize>) -> TreeVariant {
        TreeVariant {
            species,
            sizes,
            object: "oak_small".into(),
        }
    }

    #[test]
    fn test_tree_size_matches_either_orientation() {
        assert!(TreeSize::new(2, 3).matches(&TreeSize::new(3, 2)));
        assert!(TreeSize::new(1, 1).matches(&TreeSize::new(1, 1)));
        assert!(!TreeSize::new(2, 2).matches(&TreeSize::new(1, 1)));
    }

    #[test]
    fn test_variant_any_short_circuits() {
        let v = variant(Filter::Any, Filter::Any);
        assert!(v.matches(TreeSpecies::Birch, TreeSize::new(5, 5)));
    }

    #[test]
    fn test_variant_requires_both_axes() {
        let v = variant(
            Filter::Only(vec![TreeSpecies::Tree]),
            Filter::Only(vec![TreeSize::new(1, 1)]),
        );
        assert!(v.matches(TreeSpecies::Tree, TreeSize::new(1, 1)));
        assert!(!v.matches(TreeSpecies::Birch, TreeSize::new(1, 1)));
        assert!(!v.matches(TreeSpecies::Tree, TreeSize::new(2, 2)));
    }

    #[test]
    fn test_empty_sizes_never_match() {
        let v = variant(Filter::Any, Filter::Only(vec![]));
        assert!(!v.matches(TreeSpecies::Tree, TreeSize::new(1, 1)));
    }

    #[test]
    fn test_definition_filters_variants() {
        let def = PlacementDefinition {
            name: "mixed".into(),
            rules: PlacementRules::default(),
            variants: vec![
                variant(Filter::Only(vec![TreeSpecies::Tree]), Filter::Any),
                variant(Filter::Only(vec![TreeSpecies::Birch]), Filter::Any),
            ],
        };
        assert!(def.has_match(TreeSpecies::Birch, TreeSize::new(1, 1)));
        assert_eq!(def.matching_variants(TreeSpecies::Tree, TreeSize::new(1, 1)).len(), 1);
        assert!(!def.has_match(TreeSpecies::Jungle, TreeSize::new(1, 1)));
    }

    #[test]
    fn test_parse_definition_toml() {
        let toml_src = r#"
            name = "oaks"

            [rules]
            rotate = true
            translate = [0, 1, 0]

            [[variants]]
            species = "any"
            sizes = [[1, 1], [2, 2]]
            object = "oak_small"

            [[variants]]
            species = ["DARK_OAK"]
            sizes = "any"
            object = "dark_oak_wide"
        "#;

        let def: PlacementDefinition = toml::from_str(toml_src).unwrap();
        assert_eq!(def.name, "oaks");
        assert!(def.rules.rotate);
        assert_eq!(def.rules.translate, [0, 1, 0]);
        assert!(!def.rules.replace_solid);
        assert_eq!(def.variants.len(), 2);
        assert!(def.variants[0].species.is_any());
        assert_eq!(
            def.variants[0].sizes,
            Filter::Only(vec![TreeSize::new(1, 1), TreeSize::new(2, 2)])
        );
        assert_eq!(def.variants[1].species, Filter::Only(vec![TreeSpecies::DarkOak]));
        assert!(def.variants[1].sizes.is_any());
    }

    #[test]
    fn test_filter_rejects_other_strings() {
        let result: Result<TreeVariant, _> = toml::from_str(
            r#"
            species = "every"
            sizes = "any"
            object = "x"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tree_settings_defaults() {
        let settings: TreeSettings = toml::from_str("enabled = true").unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.mode, TreeMode::Exclusive);

        let settings: TreeSettings = toml::from_str("mode = \"all\"").unwrap();
        assert!(!settings.enabled);
        assert_eq!(settings.mode, TreeMode::All);
    }
}
