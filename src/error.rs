use thiserror::Error;

use crate::maze::MAX_MAZE_SIZE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze size {size}: expected a value between 1 and {max}")]
    InvalidSize { size: i64, max: u16 },
    #[error("Maze size must be a whole number, got {0:?}")]
    NotANumber(String),
}

impl MazeError {
    pub(crate) fn invalid_size(size: i64) -> Self {
        MazeError::InvalidSize {
            size,
            max: MAX_MAZE_SIZE,
        }
    }
}

pub type Result<T> = core::result::Result<T, MazeError>;
