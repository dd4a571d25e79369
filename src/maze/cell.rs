use crate::maze::{Coord, Direction};

/// One unit of the maze grid: its position, a wall on each side and a visited flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    row: u16,
    col: u16,
    /// Wall flags indexed by `Direction as usize`, `true` means the wall is present
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    /// A fully walled, unvisited cell.
    pub(crate) fn new(row: u16, col: u16) -> Self {
        Cell {
            row,
            col,
            walls: [true; 4],
            visited: false,
        }
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn col(&self) -> u16 {
        self.col
    }

    pub fn coord(&self) -> Coord {
        (self.row, self.col)
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction as usize]
    }

    pub fn top(&self) -> bool {
        self.has_wall(Direction::Up)
    }

    pub fn bottom(&self) -> bool {
        self.has_wall(Direction::Down)
    }

    pub fn left(&self) -> bool {
        self.has_wall(Direction::Left)
    }

    pub fn right(&self) -> bool {
        self.has_wall(Direction::Right)
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Number of walls still standing around this cell.
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }

    /// Walls only ever come down. Returns `true` if the wall was present.
    pub(crate) fn clear_wall(&mut self, direction: Direction) -> bool {
        std::mem::replace(&mut self.walls[direction as usize], false)
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }
}
