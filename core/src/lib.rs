#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate raw input into
//! [`Command`] values, the world executes those commands via its `apply`
//! entry point, and then broadcasts [`Event`] values for systems to react to
//! deterministically. Systems consume event streams and respond exclusively
//! with new command batches. Renderers only ever see a [`WorldSnapshot`].

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Phases of a single game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// The simulation advances on every tick.
    #[default]
    Playing,
    /// The world is frozen until the player toggles pause again.
    Paused,
    /// Every life has been lost. Terminal.
    GameOver,
    /// Every pellet has been eaten. Terminal.
    Victory,
}

impl GameState {
    /// Reports whether no transition can leave this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Cardinal movement directions available to entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Above,
    /// Movement toward increasing row indices.
    Below,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in canonical query order.
    pub const ALL: [Direction; 4] = [Self::Above, Self::Below, Self::Left, Self::Right];

    /// Row and column offsets of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Above => (-1, 0),
            Self::Below => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Axis along which this direction moves.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Above | Self::Below => Axis::Row,
            Self::Left | Self::Right => Axis::Column,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Above => 0b0001,
            Self::Below => 0b0010,
            Self::Left => 0b0100,
            Self::Right => 0b1000,
        }
    }
}

/// Grid axis used when clearing one component of the player's velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Vertical axis.
    Row,
    /// Horizontal axis.
    Column,
}

/// Compact set of directions, iterated in [`Direction::ALL`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Directions(u8);

impl Directions {
    /// The empty set.
    pub const NONE: Directions = Directions(0);

    /// Returns a copy of the set with `direction` added.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    /// Reports whether the set contains `direction`.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Number of directions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Reports whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Reports whether the set marks a junction (three or more open sides).
    #[must_use]
    pub const fn is_junction(self) -> bool {
        self.len() >= 3
    }

    /// Returns the `index`-th direction in canonical order, if present.
    #[must_use]
    pub fn nth(self, index: usize) -> Option<Direction> {
        self.iter().nth(index)
    }

    /// Iterates over the contained directions in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

impl FromIterator<Direction> for Directions {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Directions::NONE, |set, direction| set.with(direction))
    }
}

/// Location of a grid cell expressed as signed row and column indices.
///
/// Signed so that an intention pointing past the border is representable and
/// can be rejected before any grid access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    row: i32,
    column: i32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Position offset by the provided row and column deltas.
    #[must_use]
    pub const fn offset(self, rows: i32, columns: i32) -> Self {
        Self::new(self.row + rows, self.column + columns)
    }

    /// Adjacent position one step away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (rows, columns) = direction.delta();
        self.offset(rows, columns)
    }
}

/// Contents of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Open floor without a pellet.
    Empty,
    /// Open floor holding a pellet.
    Pellet,
    /// Impassable wall.
    Wall,
}

impl Cell {
    /// Decodes the numeric layout code (`0` empty, `1` pellet, `2` wall).
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Pellet),
            2 => Some(Self::Wall),
            _ => None,
        }
    }

    /// Reports whether entities may stand on the cell.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Unique identifier assigned to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Identifier reserved for the player entity.
    pub const PLAYER: EntityId = EntityId(0);

    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Runtime tag distinguishing the two entity variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player-controlled entity.
    Player,
    /// An autonomously moving pursuer.
    Pursuer,
}

/// Visual appearance applied to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EntityColor {
    /// Creates a new entity color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Player velocity with each component in `-1..=1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Velocity {
    row: i8,
    column: i8,
}

impl Velocity {
    /// Standing still.
    pub const ZERO: Velocity = Velocity { row: 0, column: 0 };

    /// Unit velocity pointing in `direction`.
    #[must_use]
    pub const fn from_direction(direction: Direction) -> Self {
        let (row, column) = direction.delta();
        Self {
            row: row as i8,
            column: column as i8,
        }
    }

    /// Row component.
    #[must_use]
    pub const fn row(&self) -> i8 {
        self.row
    }

    /// Column component.
    #[must_use]
    pub const fn column(&self) -> i8 {
        self.column
    }

    /// Returns the velocity with the component along `axis` zeroed.
    #[must_use]
    pub const fn cleared(self, axis: Axis) -> Self {
        match axis {
            Axis::Row => Self { row: 0, ..self },
            Axis::Column => Self { column: 0, ..self },
        }
    }

    /// Direction the velocity points toward, if it is a single unit step.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        match (self.row, self.column) {
            (-1, 0) => Some(Direction::Above),
            (1, 0) => Some(Direction::Below),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Raw input signals delivered by the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// A movement key was pressed.
    Move(Direction),
    /// A movement key was released.
    StopMove(Direction),
    /// The pause key was pressed.
    TogglePause,
    /// The player asked to leave the game.
    Quit,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one fixed tick.
    Tick,
    /// Flips the game between playing and paused.
    TogglePause,
    /// Replaces the player's velocity.
    SetPlayerVelocity {
        /// Velocity applied from the next tick onward.
        velocity: Velocity,
    },
    /// Zeroes one component of the player's velocity.
    StopPlayerAxis {
        /// Axis to clear.
        axis: Axis,
    },
    /// Answers a pursuer's pending decision request.
    SteerPursuer {
        /// Pursuer being steered.
        pursuer: EntityId,
        /// Direction the pursuer should travel from the next tick onward.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that a tick was simulated.
    TimeAdvanced {
        /// Number of simulated ticks so far, including this one.
        tick: u64,
    },
    /// Confirms that an entity moved between two cells.
    EntityMoved {
        /// Entity that moved.
        entity: EntityId,
        /// Cell occupied before the move.
        from: GridPos,
        /// Cell occupied after the move.
        to: GridPos,
    },
    /// Reports that an entity's intention was rejected.
    MovementDenied {
        /// Entity whose move was cancelled.
        entity: EntityId,
        /// Cell the entity remains on.
        at: GridPos,
        /// Cell the entity attempted to enter.
        intention: GridPos,
    },
    /// Confirms that the player ate a pellet.
    PelletConsumed {
        /// Cell that held the pellet.
        cell: GridPos,
        /// Score after eating the pellet.
        score: u32,
    },
    /// Reports that a pursuer caught the player.
    LifeLost {
        /// Pursuer that caught the player.
        pursuer: EntityId,
        /// Lives remaining after the catch.
        lives: u32,
    },
    /// Confirms that the player was teleported back to the respawn cell.
    PlayerRespawned {
        /// Respawn cell.
        at: GridPos,
    },
    /// Announces that the game entered a new state.
    GameStateChanged {
        /// State before the transition.
        from: GameState,
        /// State after the transition.
        to: GameState,
    },
    /// Requests a direction choice for a pursuer.
    PursuerDecisionRequested {
        /// Pursuer awaiting a decision.
        pursuer: EntityId,
        /// Directions the pursuer may choose from.
        options: Directions,
    },
    /// Confirms that a pursuer adopted a new direction.
    PursuerSteered {
        /// Pursuer that was steered.
        pursuer: EntityId,
        /// Direction now in effect.
        direction: Direction,
    },
    /// Reports an entity found outside the sealed arena. Indicates a bug.
    InvariantViolated {
        /// Offending entity.
        entity: EntityId,
        /// Position the entity was found at.
        position: GridPos,
    },
}

/// Immutable representation of a single entity used for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// Unique identifier assigned to the entity.
    pub id: EntityId,
    /// Variant of the entity.
    pub kind: EntityKind,
    /// Row coordinate in cell units.
    pub row: f32,
    /// Column coordinate in cell units.
    pub column: f32,
    /// Appearance assigned to the entity.
    pub color: EntityColor,
    /// Direction of travel, if the entity is moving or steering.
    pub heading: Option<Direction>,
}

/// Immutable view of the whole world, produced once per tick for renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    /// Number of maze rows.
    pub rows: u32,
    /// Number of maze columns.
    pub columns: u32,
    /// Maze cells in row-major order.
    pub cells: Vec<Cell>,
    /// Entities in iteration order: the player first, then pursuers.
    pub entities: Vec<EntitySnapshot>,
    /// Pellets eaten so far.
    pub score: u32,
    /// Lives remaining.
    pub lives: u32,
    /// Current game state.
    pub state: GameState,
    /// Number of simulated ticks.
    pub tick: u64,
}

impl WorldSnapshot {
    /// Iterates over `(row, column, cell)` triples in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, Cell)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as u32;
            (index / columns, index % columns, *cell)
        })
    }
}
