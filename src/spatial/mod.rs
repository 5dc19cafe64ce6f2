//! Sapling cluster detection and footprint geometry

pub mod cuboid;
pub mod region;

pub use cuboid::{shrink_to_footprint, Cuboid};
pub use region::{find_connected, PositionSet};
