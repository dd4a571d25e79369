pub mod cell;
pub mod direction;

pub use cell::Cell;
pub use direction::{Direction, STEPS, Step};

use crate::error::{MazeError, Result};

/// Cell coordinate as (row, column).
pub type Coord = (u16, u16);

/// Largest size accepted from a generation request.
pub const MAX_MAZE_SIZE: u16 = 999;

/// A square grid of cells. Every cell starts fully walled; the carver clears walls
/// between neighbors to open passages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Box<[Cell]>,
    size: u16,
}

impl Maze {
    /// Creates a `size` x `size` grid of fully walled, unvisited cells in row-major order.
    /// Fails with [`MazeError::InvalidSize`] when `size` is zero.
    pub fn new(size: u16) -> Result<Self> {
        if size == 0 {
            return Err(MazeError::invalid_size(0));
        }
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| Cell::new(row, col)))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Maze { cells, size })
    }

    /// Side length of the maze in cells.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a maze holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The top-left cell, where carving starts.
    pub fn start(&self) -> Coord {
        (0, 0)
    }

    /// The bottom-right cell.
    pub fn goal(&self) -> Coord {
        (self.size - 1, self.size - 1)
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        coord.0 as usize * self.size as usize + coord.1 as usize
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.size && coord.1 < self.size
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.is_in_bounds(coord)
            .then(|| &self.cells[self.ravel_index(coord)])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The adjacent cell in `direction`, or `None` if the step leaves the grid.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        if !self.is_in_bounds(coord) {
            return None;
        }
        let step = direction.step();
        let row = coord.0.checked_add_signed(step.d_row)?;
        let col = coord.1.checked_add_signed(step.d_col)?;
        self.is_in_bounds((row, col)).then_some((row, col))
    }

    /// Neighbors reachable from `coord` through a cleared wall.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let cell = self.cell(coord)?;
            if cell.has_wall(direction) {
                return None;
            }
            self.neighbor(coord, direction)
        })
    }

    /// Number of open passages, counting each shared wall once.
    pub fn open_passages(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Direction::Down, Direction::Right]
                    .into_iter()
                    .filter(|&d| {
                        !cell.has_wall(d) && self.neighbor(cell.coord(), d).is_some()
                    })
                    .count()
            })
            .sum()
    }

    pub(crate) fn mark_visited(&mut self, coord: Coord) {
        let idx = self.ravel_index(coord);
        self.cells[idx].mark_visited();
    }

    /// Clears the wall on `from`'s side facing `direction` and the matching wall on the
    /// neighbor's side. Returns the neighbor's coordinate.
    ///
    /// # Panics
    /// * If `from` is out of bounds
    /// * If the neighbor in `direction` lies outside the maze
    pub(crate) fn carve(&mut self, from: Coord, direction: Direction) -> Coord {
        if !self.is_in_bounds(from) {
            panic!("The given coordinate is out of bounds");
        }
        let Some(to) = self.neighbor(from, direction) else {
            panic!("Cannot carve {} from {:?}: no cell on that side", direction, from);
        };
        let (from_idx, to_idx) = (self.ravel_index(from), self.ravel_index(to));
        self.cells[from_idx].clear_wall(direction);
        self.cells[to_idx].clear_wall(direction.opposite());
        to
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        assert!(
            self.is_in_bounds(index),
            "Coordinate {:?} is out of bounds for a maze of size {}",
            index,
            self.size
        );
        &self.cells[self.ravel_index(index)]
    }
}

/// Validates a requested size against `0 < size <= MAX_MAZE_SIZE`.
pub fn validate_size(size: i64) -> Result<u16> {
    if (1..=MAX_MAZE_SIZE as i64).contains(&size) {
        Ok(size as u16)
    } else {
        Err(MazeError::invalid_size(size))
    }
}

/// Parses and validates a size typed by the user.
pub fn parse_size(input: &str) -> Result<u16> {
    let input = input.trim();
    let size = input
        .parse::<i64>()
        .map_err(|_| MazeError::NotANumber(input.to_string()))?;
    validate_size(size)
}
