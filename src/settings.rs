//! Arena and play settings
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_RATE;
use crate::error::{ArenaError, Result};
use crate::session::tick_budget;
use crate::sim::ArenaConfig;

/// Loop pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaySettings {
    /// Max ticks (and frames) per second
    pub rate: u32,
}

impl Default for PlaySettings {
    fn default() -> Self {
        Self { rate: DEFAULT_RATE }
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaConfig,
    pub play: PlaySettings,
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ArenaError::InvalidConfiguration(format!("bad settings: {e}")))
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            ArenaError::InvalidConfiguration(format!("cannot read {}: {e}", path.display()))
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain structs of integers always serialize
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check arena geometry and pacing before any simulation starts
    pub fn validate(&self) -> Result<()> {
        self.arena.validate()?;
        tick_budget(self.play.rate)?;
        Ok(())
    }
}
