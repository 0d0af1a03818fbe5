//! Static maze layout and the configuration consumed when building a world.

use maze_chase_core::{Direction, EntityColor, GridPos};

use crate::{grid::GridMap, ConfigError};

/// Number of rows in the standard maze.
pub const STANDARD_ROWS: usize = 29;
/// Number of columns in the standard maze.
pub const STANDARD_COLUMNS: usize = 28;

/// The standard maze: `0` empty floor, `1` pellet, `2` wall.
pub const STANDARD_MAZE: [[u8; STANDARD_COLUMNS]; STANDARD_ROWS] = [
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    [2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 1, 1, 1, 1, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 2],
    [2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2],
    [2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2],
    [2, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 0, 0, 0, 0, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 1, 2, 0, 0, 0, 0, 0, 0, 2, 1, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 1, 1, 1, 1, 1, 2, 2, 1, 2, 0, 0, 0, 0, 0, 0, 2, 1, 2, 2, 1, 1, 1, 1, 1, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 1, 2, 0, 0, 0, 0, 0, 0, 2, 1, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 2],
    [2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2],
    [2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2],
    [2, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 1, 1, 1, 1, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1, 2],
    [2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2],
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
];

/// Cell the player starts on and returns to after losing a life.
pub const RESPAWN_CELL: GridPos = GridPos::new(1, 1);
/// Cell every pursuer starts on, inside the central pen.
pub const PURSUER_SPAWN_CELL: GridPos = GridPos::new(15, 13);
/// Lives granted at the start of a session.
pub const DEFAULT_LIVES: u32 = 5;

/// Pursuer colours in registration order: red, cyan, orange, pink.
pub const PURSUER_COLORS: [EntityColor; 4] = [
    EntityColor::from_rgb(255, 0, 0),
    EntityColor::from_rgb(0, 255, 255),
    EntityColor::from_rgb(255, 140, 0),
    EntityColor::from_rgb(255, 15, 192),
];

/// Colour of the player entity.
pub const PLAYER_COLOR: EntityColor = EntityColor::from_rgb(255, 255, 0);

/// Parameters required to build a world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Maze rows encoded as cell codes.
    pub layout: Vec<Vec<u8>>,
    /// Lives granted at the start of the session.
    pub lives: u32,
    /// Cell the player starts on and is teleported back to after a catch.
    pub respawn: GridPos,
    /// Cell every pursuer starts on.
    pub pursuer_spawn: GridPos,
    /// Direction every pursuer faces when the session starts.
    pub pursuer_heading: Direction,
    /// One pursuer is registered per colour, in order.
    pub pursuer_colors: Vec<EntityColor>,
    /// Score that ends the session in victory. Defaults to the pellet count
    /// and must equal it when provided.
    pub victory_threshold: Option<u32>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            layout: STANDARD_MAZE.iter().map(|row| row.to_vec()).collect(),
            lives: DEFAULT_LIVES,
            respawn: RESPAWN_CELL,
            pursuer_spawn: PURSUER_SPAWN_CELL,
            pursuer_heading: Direction::Below,
            pursuer_colors: PURSUER_COLORS.to_vec(),
            victory_threshold: None,
        }
    }
}

impl WorldConfig {
    /// Replaces the maze layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Vec<Vec<u8>>) -> Self {
        self.layout = layout;
        self
    }

    /// Replaces the number of starting lives.
    #[must_use]
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    /// Replaces the respawn cell.
    #[must_use]
    pub fn with_respawn(mut self, respawn: GridPos) -> Self {
        self.respawn = respawn;
        self
    }

    /// Replaces the pursuer spawn cell and starting heading.
    #[must_use]
    pub fn with_pursuer_spawn(mut self, spawn: GridPos, heading: Direction) -> Self {
        self.pursuer_spawn = spawn;
        self.pursuer_heading = heading;
        self
    }

    /// Replaces the pursuer roster.
    #[must_use]
    pub fn with_pursuer_colors(mut self, colors: Vec<EntityColor>) -> Self {
        self.pursuer_colors = colors;
        self
    }

    /// Sets an explicit victory threshold.
    #[must_use]
    pub fn with_victory_threshold(mut self, threshold: u32) -> Self {
        self.victory_threshold = Some(threshold);
        self
    }

    /// Builds the grid and checks every cross-field constraint.
    ///
    /// Returns the decoded grid and the victory threshold in effect.
    pub(crate) fn validate(&self) -> Result<(GridMap, u32), ConfigError> {
        let grid = GridMap::from_codes(&self.layout)?;

        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }

        if !grid.is_passable(self.respawn) {
            return Err(ConfigError::BlockedCell {
                role: "respawn",
                row: self.respawn.row(),
                column: self.respawn.column(),
            });
        }

        if !self.pursuer_colors.is_empty() && !grid.is_passable(self.pursuer_spawn) {
            return Err(ConfigError::BlockedCell {
                role: "pursuer spawn",
                row: self.pursuer_spawn.row(),
                column: self.pursuer_spawn.column(),
            });
        }

        let pellets = grid.pellet_count();
        if pellets == 0 {
            return Err(ConfigError::NoPellets);
        }

        let threshold = self.victory_threshold.unwrap_or(pellets);
        if threshold != pellets {
            return Err(ConfigError::VictoryThresholdMismatch { threshold, pellets });
        }

        Ok((grid, threshold))
    }
}

/// Converts an ASCII maze drawing into cell codes.
///
/// `#` is a wall, `.` a pellet and a space empty floor. Blank lines are
/// skipped, so layouts can be written as indented raw strings.
pub fn codes_from_ascii(drawing: &str) -> Result<Vec<Vec<u8>>, ConfigError> {
    drawing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(|(column, glyph)| match glyph {
                    '#' => Ok(2),
                    '.' => Ok(1),
                    '_' | ' ' => Ok(0),
                    other => Err(ConfigError::UnknownGlyph {
                        row,
                        column,
                        glyph: other,
                    }),
                })
                .collect::<Result<Vec<u8>, ConfigError>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates_with_full_pellet_threshold() {
        let (grid, threshold) = WorldConfig::default()
            .validate()
            .expect("standard config is valid");

        assert_eq!(threshold, 306);
        assert_eq!(grid.pellet_count(), threshold);
    }

    #[test]
    fn mismatched_victory_threshold_is_rejected() {
        let error = WorldConfig::default()
            .with_victory_threshold(305)
            .validate()
            .expect_err("early victory must be rejected");

        assert_eq!(
            error,
            ConfigError::VictoryThresholdMismatch {
                threshold: 305,
                pellets: 306
            }
        );
    }

    #[test]
    fn zero_lives_is_rejected() {
        let error = WorldConfig::default()
            .with_lives(0)
            .validate()
            .expect_err("zero lives must be rejected");

        assert_eq!(error, ConfigError::NoLives);
    }

    #[test]
    fn respawn_inside_wall_is_rejected() {
        let error = WorldConfig::default()
            .with_respawn(GridPos::new(0, 0))
            .validate()
            .expect_err("walled respawn must be rejected");

        assert_eq!(
            error,
            ConfigError::BlockedCell {
                role: "respawn",
                row: 0,
                column: 0
            }
        );
    }

    #[test]
    fn pursuer_spawn_is_ignored_without_pursuers() {
        let config = WorldConfig::default()
            .with_pursuer_colors(Vec::new())
            .with_pursuer_spawn(GridPos::new(-3, 40), Direction::Left);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn ascii_layouts_decode_and_reject_unknown_glyphs() {
        let codes = codes_from_ascii(
            "
            ####
            #. #
            ####
            ",
        )
        .expect("valid drawing");
        assert_eq!(codes, vec![vec![2, 2, 2, 2], vec![2, 1, 0, 2], vec![2, 2, 2, 2]]);

        let error = codes_from_ascii("#x#").expect_err("unknown glyph must be rejected");
        assert_eq!(
            error,
            ConfigError::UnknownGlyph {
                row: 0,
                column: 1,
                glyph: 'x'
            }
        );
    }

    #[test]
    fn layout_without_pellets_is_rejected() {
        let layout = codes_from_ascii(
            "
            ####
            #  #
            ####
            ",
        )
        .expect("valid drawing");
        let error = WorldConfig::default()
            .with_layout(layout)
            .with_pursuer_colors(Vec::new())
            .validate()
            .expect_err("pellet-free maze must be rejected");

        assert_eq!(error, ConfigError::NoPellets);
    }
}
