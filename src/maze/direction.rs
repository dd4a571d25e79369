use rand::{Rng, seq::SliceRandom};

/// One of the four cardinal directions. Also names the wall on that side of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Movement and wall bookkeeping for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Direction of travel, and the wall cleared on the cell we leave
    pub direction: Direction,
    pub d_row: i16,
    pub d_col: i16,
    /// Wall cleared on the cell we enter
    pub opposite: Direction,
}

/// Lookup table indexed by `Direction as usize`.
pub const STEPS: [Step; 4] = [
    Step {
        direction: Direction::Up,
        d_row: -1,
        d_col: 0,
        opposite: Direction::Down,
    },
    Step {
        direction: Direction::Down,
        d_row: 1,
        d_col: 0,
        opposite: Direction::Up,
    },
    Step {
        direction: Direction::Left,
        d_row: 0,
        d_col: -1,
        opposite: Direction::Right,
    },
    Step {
        direction: Direction::Right,
        d_row: 0,
        d_col: 1,
        opposite: Direction::Left,
    },
];

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn step(self) -> &'static Step {
        &STEPS[self as usize]
    }

    pub fn opposite(self) -> Direction {
        self.step().opposite
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// The step table in a uniformly random order (Fisher-Yates).
pub fn shuffled_steps<R: Rng + ?Sized>(rng: &mut R) -> [Step; 4] {
    let mut steps = STEPS;
    steps.shuffle(rng);
    steps
}
