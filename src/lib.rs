pub mod app;
pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod render;

pub use error::MazeError;
pub use generators::generate_maze;
pub use maze::{Cell, Direction, Maze};
