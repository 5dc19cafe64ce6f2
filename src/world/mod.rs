//! Host world access and staged block placement

pub mod memory;
pub mod sampler;

pub use memory::VoxelWorld;
pub use sampler::{apply_changes, BlockChange, BlockSampler, HeightMap, HostWorld, WorldPlacer};
