//! Drawing a finished maze onto an injected [`Canvas`].
//!
//! The maze core never touches a drawing surface. Anything that can stroke axis-aligned
//! lines and fill rectangles can display a maze: the in-memory [`Raster`] used headlessly
//! and by the terminal presenter, or a recorder in tests.

mod raster;

pub use raster::{Pixel, Raster};

use crate::maze::{Coord, Direction, Maze};

/// Pixel position as (x, y).
pub type Point = (u32, u32);

/// Pixels per cell side when nothing else is configured.
pub const DEFAULT_CELL_PX: u32 = 2;
/// Smallest cell size that leaves room for a marker inside the walls.
pub const MIN_CELL_PX: u32 = 2;
/// Largest cell size; keeps `MAX_MAZE_SIZE * cell_px` well inside `u32`.
pub const MAX_CELL_PX: u32 = 64;

/// Highlight kinds for the start and end cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Start,
    End,
}

/// A drawing surface.
pub trait Canvas {
    /// Resize the surface to `width` x `height` pixels, discarding its contents.
    fn resize(&mut self, width: u32, height: u32);
    /// Erase everything drawn so far.
    fn clear(&mut self);
    /// Stroke a line segment, both endpoints included.
    fn draw_line(&mut self, from: Point, to: Point);
    /// Fill a `width` x `height` rectangle whose top-left corner is `origin`.
    fn fill_rect(&mut self, origin: Point, width: u32, height: u32, marker: Marker);
}

/// The segment covering the wall on `direction`'s side of a cell whose top-left corner is
/// at `(x, y)`.
fn wall_segment(direction: Direction, (x, y): Point, px: u32) -> (Point, Point) {
    match direction {
        Direction::Up => ((x, y), (x + px, y)),
        Direction::Down => ((x, y + px), (x + px, y + px)),
        Direction::Left => ((x, y), (x, y + px)),
        Direction::Right => ((x + px, y), (x + px, y + px)),
    }
}

fn cell_origin(coord: Coord, px: u32) -> Point {
    (coord.1 as u32 * px, coord.0 as u32 * px)
}

/// Resizes `canvas` to fit the maze, strokes every standing wall and marks the start and
/// end cells. `cell_px` is clamped to `MIN_CELL_PX..=MAX_CELL_PX`.
pub fn render_maze<C: Canvas + ?Sized>(maze: &Maze, canvas: &mut C, cell_px: u32) {
    let px = cell_px.clamp(MIN_CELL_PX, MAX_CELL_PX);
    let side = maze.size() as u32 * px;
    canvas.resize(side, side);

    for cell in maze.cells() {
        let origin = cell_origin(cell.coord(), px);
        for direction in Direction::ALL {
            if cell.has_wall(direction) {
                let (from, to) = wall_segment(direction, origin, px);
                canvas.draw_line(from, to);
            }
        }
    }

    // Inset by one pixel so the wall strokes stay visible
    for (coord, marker) in [(maze.start(), Marker::Start), (maze.goal(), Marker::End)] {
        let (x, y) = cell_origin(coord, px);
        canvas.fill_rect((x + 1, y + 1), px - 1, px - 1, marker);
    }
    tracing::debug!("Rendered {}x{} maze onto a {}px canvas", maze.size(), maze.size(), side);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate_maze;

    #[derive(Debug, PartialEq)]
    enum Op {
        Resize(u32, u32),
        Clear,
        Line(Point, Point),
        Fill(Point, u32, u32, Marker),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        fn resize(&mut self, width: u32, height: u32) {
            self.ops.push(Op::Resize(width, height));
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn draw_line(&mut self, from: Point, to: Point) {
            self.ops.push(Op::Line(from, to));
        }
        fn fill_rect(&mut self, origin: Point, width: u32, height: u32, marker: Marker) {
            self.ops.push(Op::Fill(origin, width, height, marker));
        }
    }

    #[test]
    fn test_single_cell_draws_four_walls_and_markers() {
        let maze = Maze::new(1).unwrap();
        let mut canvas = Recorder::default();
        render_maze(&maze, &mut canvas, 20);
        assert_eq!(
            canvas.ops,
            vec![
                Op::Resize(20, 20),
                Op::Line((0, 0), (20, 0)),
                Op::Line((0, 20), (20, 20)),
                Op::Line((0, 0), (0, 20)),
                Op::Line((20, 0), (20, 20)),
                Op::Fill((1, 1), 19, 19, Marker::Start),
                Op::Fill((1, 1), 19, 19, Marker::End),
            ]
        );
    }

    #[test]
    fn test_one_line_per_standing_wall() {
        let mut maze = Maze::new(6).unwrap();
        generate_maze(&mut maze, Some(3));
        let mut canvas = Recorder::default();
        render_maze(&maze, &mut canvas, 10);

        let standing = maze.cells().map(|c| c.wall_count()).sum::<usize>();
        let lines = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Line(..)))
            .count();
        assert_eq!(lines, standing);
        assert_eq!(canvas.ops[0], Op::Resize(60, 60));
        assert_eq!(
            canvas.ops.last(),
            Some(&Op::Fill((51, 51), 9, 9, Marker::End))
        );
    }

    #[test]
    fn test_cell_px_is_clamped() {
        let maze = Maze::new(3).unwrap();
        let mut canvas = Recorder::default();
        render_maze(&maze, &mut canvas, 0);
        assert_eq!(canvas.ops[0], Op::Resize(6, 6));
    }

    #[test]
    fn test_huge_cell_px_is_capped() {
        let maze = Maze::new(5).unwrap();
        let mut canvas = Recorder::default();
        render_maze(&maze, &mut canvas, 1_000_000_000);
        assert_eq!(canvas.ops[0], Op::Resize(5 * MAX_CELL_PX, 5 * MAX_CELL_PX));
        assert_eq!(
            canvas.ops.last(),
            Some(&Op::Fill((4 * 64 + 1, 4 * 64 + 1), 63, 63, Marker::End))
        );
    }
}
