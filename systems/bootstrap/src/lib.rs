#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Maze Chase experience.

use maze_chase_core::{GameState, WorldSnapshot};
use maze_chase_world::{query, ConfigError, World, WorldConfig};
use tracing::info;

/// Produces the starting world and the data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap {
    config: WorldConfig,
}

impl Bootstrap {
    /// Starts from the standard maze with `lives` lives.
    #[must_use]
    pub fn with_lives(lives: u32) -> Self {
        Self {
            config: WorldConfig::default().with_lives(lives),
        }
    }

    /// Starts from an arbitrary world configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self { config }
    }

    /// Configuration the world will be built from.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Builds the world: maze, player at the respawn cell and the pursuer roster.
    pub fn build(&self) -> Result<World, ConfigError> {
        let world = World::new(&self.config)?;
        info!(
            banner = query::welcome_banner(&world),
            lives = query::lives(&world),
            "session ready"
        );
        Ok(world)
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Captures the snapshot presented before the first tick.
    #[must_use]
    pub fn initial_snapshot(&self, world: &World) -> WorldSnapshot {
        query::snapshot(world)
    }

    /// One-line summary of a session, used by headless runs.
    #[must_use]
    pub fn summary(&self, world: &World) -> String {
        let state = match query::state(world) {
            GameState::Playing => "playing",
            GameState::Paused => "paused",
            GameState::GameOver => "game over",
            GameState::Victory => "victory",
        };
        format!(
            "score {} / {}, lives {}, {} after {} ticks",
            query::score(world),
            query::victory_threshold(world),
            query::lives(world),
            state,
            query::tick_index(world)
        )
    }
}
