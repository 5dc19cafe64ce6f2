//! Grovekeeper - Custom sapling growth for managed worlds

pub mod core;
pub mod growth;
pub mod placement;
pub mod spatial;
pub mod world;
