//! Override configuration with documented constants
//!
//! Everything that tunes how a growth trigger is handled, as opposed to
//! *what* gets placed (that lives in the dimension configuration).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;

/// Configuration for the growth override controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideConfig {
    /// Maximum number of sapling blocks collected by the region search
    ///
    /// Guards against huge flat fields of matching blocks. A cluster larger
    /// than this is only partially explored, so the footprint is computed
    /// from at most this many cells.
    pub region_cap: usize,

    /// Ticks between a placement and the "structure grown" notification
    ///
    /// Must be at least 1: observers expect the notification on a later tick,
    /// never inside the trigger that caused it.
    pub notify_delay_ticks: u64,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            region_cap: 50,
            notify_delay_ticks: 1,
        }
    }
}

impl OverrideConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults per field
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.region_cap == 0 {
            return Err("region_cap must be at least 1".into());
        }

        if self.notify_delay_ticks == 0 {
            return Err(format!(
                "notify_delay_ticks ({}) must be >= 1 so notifications run on a later tick",
                self.notify_delay_ticks
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = OverrideConfig::default();
        assert_eq!(config.region_cap, 50);
        assert_eq!(config.notify_delay_ticks, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_delay_rejected() {
        let config = OverrideConfig {
            notify_delay_ticks: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: OverrideConfig = toml::from_str("region_cap = 16").unwrap();
        assert_eq!(config.region_cap, 16);
        assert_eq!(config.notify_delay_ticks, 1);
    }
}
