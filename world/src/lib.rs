#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.

mod entity;
mod error;
pub mod grid;
pub mod layout;
mod rules;
mod state;

use maze_chase_core::{Command, EntityId, Event, GridPos, WELCOME_BANNER};
use tracing::{info, trace, warn};

use self::{
    entity::{Movable, Player, Pursuer},
    state::{StateMachine, Trigger},
};

pub use self::{error::ConfigError, grid::GridMap, layout::WorldConfig};

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: GridMap,
    player: Player,
    pursuers: Vec<Pursuer>,
    respawn: GridPos,
    score: u32,
    lives: u32,
    victory_threshold: u32,
    machine: StateMachine,
    tick_index: u64,
}

impl World {
    /// Creates a new world from the provided configuration.
    ///
    /// Refuses to start when the configuration is inconsistent, for example
    /// an unsealed border or a victory threshold that differs from the pellet
    /// count.
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        let (grid, victory_threshold) = config.validate()?;
        let pursuers = config
            .pursuer_colors
            .iter()
            .zip(1u32..)
            .map(|(color, id)| {
                Pursuer::spawn(
                    EntityId::new(id),
                    config.pursuer_spawn,
                    config.pursuer_heading,
                    *color,
                )
            })
            .collect();

        info!(
            rows = grid.rows(),
            columns = grid.columns(),
            pellets = victory_threshold,
            lives = config.lives,
            pursuers = config.pursuer_colors.len(),
            "world created"
        );

        Ok(Self {
            banner: WELCOME_BANNER,
            grid,
            player: Player::spawn(config.respawn),
            pursuers,
            respawn: config.respawn,
            score: 0,
            lives: config.lives,
            victory_threshold,
            machine: StateMachine::default(),
            tick_index: 0,
        })
    }

    fn pursuer_mut(&mut self, pursuer: EntityId) -> Option<&mut Pursuer> {
        self.pursuers.iter_mut().find(|candidate| candidate.id() == pursuer)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => rules::tick(world, out_events),
        Command::TogglePause => {
            if let Some((from, to)) = world.machine.fire(Trigger::TogglePause) {
                info!(?from, ?to, "pause toggled");
                out_events.push(Event::GameStateChanged { from, to });
            }
        }
        Command::SetPlayerVelocity { velocity } => world.player.set_velocity(velocity),
        Command::StopPlayerAxis { axis } => {
            let velocity = world.player.velocity().cleared(axis);
            world.player.set_velocity(velocity);
        }
        Command::SteerPursuer { pursuer, direction } => {
            let Some(target) = world.pursuer_mut(pursuer) else {
                warn!(pursuer = pursuer.get(), "steer command for unknown pursuer");
                return;
            };

            if target.steer(direction) {
                out_events.push(Event::PursuerSteered { pursuer, direction });
            } else {
                trace!(pursuer = pursuer.get(), ?direction, "stale steer ignored");
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_chase_core::{
        Cell, Direction, Directions, EntityId, EntitySnapshot, GameState, GridPos, Velocity,
        WorldSnapshot,
    };

    use super::{layout::PLAYER_COLOR, GridMap, Movable, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the maze grid.
    #[must_use]
    pub fn grid(world: &World) -> &GridMap {
        &world.grid
    }

    /// Cell stored at the position, or `None` when out of bounds.
    #[must_use]
    pub fn cell(world: &World, position: GridPos) -> Option<Cell> {
        world.grid.cell(position)
    }

    /// Open directions around the position.
    #[must_use]
    pub fn available_directions(world: &World, position: GridPos) -> Directions {
        world.grid.available_directions(position)
    }

    /// Pellets eaten so far.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Lives remaining.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Current game state.
    #[must_use]
    pub fn state(world: &World) -> GameState {
        world.machine.state()
    }

    /// Score at which the session ends in victory.
    #[must_use]
    pub fn victory_threshold(world: &World) -> u32 {
        world.victory_threshold
    }

    /// Number of simulated ticks.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Cell occupied by the player.
    #[must_use]
    pub fn player_position(world: &World) -> GridPos {
        world.player.position()
    }

    /// Velocity the player will attempt on the next tick.
    #[must_use]
    pub fn player_velocity(world: &World) -> Velocity {
        world.player.velocity()
    }

    /// Pursuer identifiers and cells in registration order.
    #[must_use]
    pub fn pursuer_positions(world: &World) -> Vec<(EntityId, GridPos)> {
        world
            .pursuers
            .iter()
            .map(|pursuer| (pursuer.id(), pursuer.position()))
            .collect()
    }

    /// Direction a pursuer travels in, if the pursuer exists.
    #[must_use]
    pub fn pursuer_direction(world: &World, pursuer: EntityId) -> Option<Direction> {
        world
            .pursuers
            .iter()
            .find(|candidate| candidate.id() == pursuer)
            .map(|candidate| candidate.direction())
    }

    /// Captures the immutable view handed to renderers every tick.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        let player = &world.player;
        let mut entities = Vec::with_capacity(world.pursuers.len() + 1);
        entities.push(EntitySnapshot {
            id: player.id(),
            kind: player.kind(),
            row: player.position().row() as f32,
            column: player.position().column() as f32,
            color: PLAYER_COLOR,
            heading: player.velocity().direction(),
        });
        entities.extend(world.pursuers.iter().map(|pursuer| EntitySnapshot {
            id: pursuer.id(),
            kind: pursuer.kind(),
            row: pursuer.position().row() as f32,
            column: pursuer.position().column() as f32,
            color: pursuer.color(),
            heading: Some(pursuer.direction()),
        }));

        WorldSnapshot {
            rows: world.grid.rows(),
            columns: world.grid.columns(),
            cells: world.grid.cells().to_vec(),
            entities,
            score: world.score,
            lives: world.lives,
            state: world.machine.state(),
            tick: world.tick_index,
        }
    }
}
