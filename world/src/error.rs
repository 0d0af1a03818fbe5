//! Errors reported while building a world.

use thiserror::Error;

/// Reasons a world configuration is refused at construction time.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The layout has no rows or no columns.
    #[error("maze layout is empty")]
    EmptyLayout,
    /// A layout row differs in length from the first row.
    #[error("maze row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A layout cell uses a code outside `0..=2`.
    #[error("unknown cell code {code} at row {row}, column {column}")]
    UnknownCell {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        column: usize,
        /// Unrecognised code.
        code: u8,
    },
    /// An ASCII drawing uses a glyph other than `#`, `.`, `_` or space.
    #[error("unknown maze glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        /// Row of the glyph.
        row: usize,
        /// Column of the glyph.
        column: usize,
        /// Unrecognised glyph.
        glyph: char,
    },
    /// The outer border has an opening, so entities could leave the arena.
    #[error("maze border is open at row {row}, column {column}")]
    UnsealedBorder {
        /// Row of the opening.
        row: usize,
        /// Column of the opening.
        column: usize,
    },
    /// A spawn or respawn cell is a wall or lies outside the maze.
    #[error("{role} cell at row {row}, column {column} is not passable")]
    BlockedCell {
        /// Which configured cell is blocked.
        role: &'static str,
        /// Row of the cell.
        row: i32,
        /// Column of the cell.
        column: i32,
    },
    /// The session would start without lives.
    #[error("at least one life is required")]
    NoLives,
    /// The maze holds no pellets, so victory could never be earned.
    #[error("maze contains no pellets")]
    NoPellets,
    /// The victory threshold does not match the number of pellets.
    #[error("victory threshold {threshold} does not match the {pellets} pellets in the maze")]
    VictoryThresholdMismatch {
        /// Configured threshold.
        threshold: u32,
        /// Pellets present in the layout.
        pellets: u32,
    },
}
