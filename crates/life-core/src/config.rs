//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Board dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 25,
        }
    }
}

/// Random seeding parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Probability that a cell starts alive (0.0 to 1.0)
    pub density: f64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            density: 1.0 / 3.0,
        }
    }
}

impl SeedConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.density) {
            return Err(Error::InvalidConfig(format!(
                "density must be within [0, 1], got {}",
                self.density
            )));
        }
        Ok(())
    }
}

/// Auto-advance timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between generations while playing (milliseconds)
    pub tick_interval_ms: u64,
    /// Start playing as soon as the server is up
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            autoplay: false,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// Emit logs as JSON lines
    pub log_json: bool,
    pub grid: GridConfig,
    pub seed: SeedConfig,
    pub playback: PlaybackConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            log_json: false,
            grid: GridConfig::default(),
            seed: SeedConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from a JSON file; missing fields fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = serde_json::from_str(&contents)?;
        info!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid.width <= 0 || self.grid.height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.playback.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        self.seed.validate()
    }
}
