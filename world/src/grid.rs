//! Dense maze grid that answers passability queries and tracks pellets.

use maze_chase_core::{Cell, Direction, Directions, GridPos};

use crate::ConfigError;

/// Fixed-size cell grid encoding walls, corridors and pellets.
///
/// The grid is immutable apart from pellet consumption and is never resized.
/// Its border is guaranteed to be walled, so no legal move leaves the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Decodes a grid from numeric layout rows (`0` empty, `1` pellet, `2` wall).
    ///
    /// Rejects empty or ragged layouts, unknown cell codes and any opening in
    /// the outer border.
    pub fn from_codes<R>(layout: &[R]) -> Result<Self, ConfigError>
    where
        R: AsRef<[u8]>,
    {
        let first = layout.first().ok_or(ConfigError::EmptyLayout)?;
        let columns = first.as_ref().len();
        if columns == 0 {
            return Err(ConfigError::EmptyLayout);
        }

        let mut cells = Vec::with_capacity(columns * layout.len());
        for (row, codes) in layout.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != columns {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: columns,
                    found: codes.len(),
                });
            }

            for (column, code) in codes.iter().copied().enumerate() {
                let cell = Cell::from_code(code).ok_or(ConfigError::UnknownCell {
                    row,
                    column,
                    code,
                })?;
                cells.push(cell);
            }
        }

        let grid = Self {
            rows: u32::try_from(layout.len()).map_err(|_| ConfigError::EmptyLayout)?,
            columns: u32::try_from(columns).map_err(|_| ConfigError::EmptyLayout)?,
            cells,
        };
        grid.check_sealed()?;
        Ok(grid)
    }

    fn check_sealed(&self) -> Result<(), ConfigError> {
        let last_row = self.rows as i32 - 1;
        let last_column = self.columns as i32 - 1;
        for row in 0..=last_row {
            for column in 0..=last_column {
                let on_border =
                    row == 0 || column == 0 || row == last_row || column == last_column;
                if on_border && self.cell(GridPos::new(row, column)) != Some(Cell::Wall) {
                    return Err(ConfigError::UnsealedBorder {
                        row: row as usize,
                        column: column as usize,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the position lies inside the grid bounds.
    #[must_use]
    pub fn contains(&self, position: GridPos) -> bool {
        self.index(position).is_some()
    }

    /// Cell stored at the position, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, position: GridPos) -> Option<Cell> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether an entity may stand on the position.
    ///
    /// Out-of-bounds positions are never passable and never touch the cell
    /// storage.
    #[must_use]
    pub fn is_passable(&self, position: GridPos) -> bool {
        self.cell(position).is_some_and(Cell::is_open)
    }

    /// Directions whose neighbouring cell is passable.
    #[must_use]
    pub fn available_directions(&self, position: GridPos) -> Directions {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.is_passable(position.step(*direction)))
            .collect()
    }

    /// Turns a pellet into empty floor, reporting whether a pellet was eaten.
    pub fn consume_pellet(&mut self, position: GridPos) -> bool {
        let Some(index) = self.index(position) else {
            return false;
        };

        match self.cells.get_mut(index) {
            Some(cell @ Cell::Pellet) => {
                *cell = Cell::Empty;
                true
            }
            _ => false,
        }
    }

    /// Number of pellets still on the board.
    #[must_use]
    pub fn pellet_count(&self) -> u32 {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Pellet))
            .count() as u32
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, position: GridPos) -> Option<usize> {
        let row = u32::try_from(position.row()).ok()?;
        let column = u32::try_from(position.column()).ok()?;
        if row < self.rows && column < self.columns {
            let width = usize::try_from(self.columns).ok()?;
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;

    fn small_grid() -> GridMap {
        GridMap::from_codes(&[
            [2u8, 2, 2, 2, 2],
            [2, 1, 1, 1, 2],
            [2, 1, 2, 0, 2],
            [2, 1, 1, 1, 2],
            [2, 2, 2, 2, 2],
        ])
        .expect("valid grid")
    }

    #[test]
    fn standard_layout_has_expected_shape() {
        let grid = GridMap::from_codes(&layout::STANDARD_MAZE).expect("standard maze is valid");

        assert_eq!(grid.rows(), 29);
        assert_eq!(grid.columns(), 28);
        assert_eq!(grid.pellet_count(), 306);
    }

    #[test]
    fn out_of_bounds_is_never_passable() {
        let grid = small_grid();

        assert!(!grid.is_passable(GridPos::new(-1, 1)));
        assert!(!grid.is_passable(GridPos::new(1, -1)));
        assert!(!grid.is_passable(GridPos::new(5, 1)));
        assert!(!grid.is_passable(GridPos::new(1, 5)));
        assert_eq!(grid.cell(GridPos::new(-1, -1)), None);
    }

    #[test]
    fn walls_block_and_floor_passes() {
        let grid = small_grid();

        assert!(!grid.is_passable(GridPos::new(2, 2)));
        assert!(grid.is_passable(GridPos::new(2, 3)));
        assert!(grid.is_passable(GridPos::new(1, 1)));
    }

    #[test]
    fn available_directions_follow_open_neighbours() {
        let grid = small_grid();

        let corner = grid.available_directions(GridPos::new(1, 1));
        assert_eq!(
            corner.iter().collect::<Vec<_>>(),
            vec![Direction::Below, Direction::Right]
        );

        let edge = grid.available_directions(GridPos::new(1, 2));
        assert_eq!(
            edge.iter().collect::<Vec<_>>(),
            vec![Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn standard_maze_has_junction_at_pursuer_spawn() {
        let grid = GridMap::from_codes(&layout::STANDARD_MAZE).expect("standard maze is valid");

        let options = grid.available_directions(GridPos::new(15, 13));
        assert!(options.is_junction());
        assert!(!options.contains(Direction::Below));
    }

    #[test]
    fn pellet_consumption_is_idempotent() {
        let mut grid = small_grid();
        let cell = GridPos::new(1, 1);

        let first = grid.consume_pellet(cell);
        let second = grid.consume_pellet(cell);

        assert_eq!((first, second), (true, false));
        assert_eq!(grid.cell(cell), Some(Cell::Empty));
    }

    #[test]
    fn consuming_non_pellet_cells_is_rejected() {
        let mut grid = small_grid();
        let before = grid.pellet_count();

        assert!(!grid.consume_pellet(GridPos::new(2, 2)));
        assert!(!grid.consume_pellet(GridPos::new(2, 3)));
        assert!(!grid.consume_pellet(GridPos::new(9, 9)));
        assert_eq!(grid.pellet_count(), before);
    }

    #[test]
    fn unsealed_border_is_rejected() {
        let error = GridMap::from_codes(&[[2u8, 2, 2], [2, 1, 1], [2, 2, 2]])
            .expect_err("open border must be rejected");

        assert_eq!(error, ConfigError::UnsealedBorder { row: 1, column: 2 });
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let layout: Vec<Vec<u8>> = vec![vec![2, 2, 2], vec![2, 2], vec![2, 2, 2]];
        let error = GridMap::from_codes(&layout).expect_err("ragged layout must be rejected");

        assert_eq!(
            error,
            ConfigError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let error = GridMap::from_codes(&[[2u8, 2, 2], [2, 7, 2], [2, 2, 2]])
            .expect_err("unknown code must be rejected");

        assert_eq!(
            error,
            ConfigError::UnknownCell {
                row: 1,
                column: 1,
                code: 7
            }
        );
    }

    #[test]
    fn empty_layout_is_rejected() {
        let layout: Vec<Vec<u8>> = Vec::new();
        assert_eq!(GridMap::from_codes(&layout), Err(ConfigError::EmptyLayout));
    }
}
