use thiserror::Error;

use crate::core::types::WorldId;

#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("World {0} is managed but its configuration could not be accessed")]
    WorldAccessUnavailable(WorldId),

    #[error("Structure object not found: {0}")]
    ObjectNotFound(String),

    #[error("Unknown scope '{name}' referenced by {context}")]
    UnknownScope { name: String, context: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OverrideError>;
