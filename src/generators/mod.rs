use rand::{SeedableRng, rngs::StdRng};

mod dfs;

pub use dfs::{CarveReport, carve_with};

use crate::maze::Maze;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Carves a perfect maze into `maze` starting from the top-left cell and returns the same
/// maze. The maze is expected to be freshly built by [`Maze::new`].
pub fn generate_maze(maze: &mut Maze, seed: Option<u64>) -> &mut Maze {
    let mut rng = get_rng(seed);
    let report = carve_with(maze, &mut rng);
    tracing::debug!(
        "Carved {} passages in a {}x{} maze (peak stack depth {})",
        report.passages,
        maze.size(),
        maze.size(),
        report.peak_stack_depth
    );
    maze
}
