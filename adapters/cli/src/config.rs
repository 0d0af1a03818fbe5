//! Game settings layered from defaults, an optional TOML file and flags.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use maze_chase_rendering::{DEFAULT_CELL_SIZE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use serde::Deserialize;

/// Settings for one session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Milliseconds between simulation ticks.
    pub(crate) tick_ms: u64,
    /// Seed for pursuer decisions. Random when absent.
    pub(crate) seed: Option<u64>,
    /// Lives granted at the start.
    pub(crate) lives: u32,
    /// Side of a maze cell in pixels.
    pub(crate) cell_size: f32,
    pub(crate) window_width: u32,
    pub(crate) window_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            seed: None,
            lives: 5,
            cell_size: DEFAULT_CELL_SIZE,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Values given on the command line; each one wins over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) tick_ms: Option<u64>,
    pub(crate) seed: Option<u64>,
    pub(crate) lives: Option<u32>,
}

impl GameConfig {
    /// Reads the TOML file at `path`, or returns the defaults without one.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub(crate) fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid TOML game configuration")
    }

    #[must_use]
    pub(crate) fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(tick_ms) = overrides.tick_ms {
            self.tick_ms = tick_ms;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(lives) = overrides.lives {
            self.lives = lives;
        }
        self
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
