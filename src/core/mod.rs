pub mod config;
pub mod error;
pub mod types;

pub use config::OverrideConfig;
pub use error::{OverrideError, Result};
pub use types::{ActorId, BlockPos, Material, Tick, TreeSpecies, WorldId};
