use std::{path::Path, time::Instant};

use mazecarve::{
    generators::{carve_with, get_rng},
    logging::init_logging,
    maze::{MAX_MAZE_SIZE, Maze, validate_size},
    render::{DEFAULT_CELL_PX, Raster, render_maze},
};

fn main() -> std::io::Result<()> {
    let _guard = init_logging(Path::new("logs"))?;

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let size = args
        .next()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(MAX_MAZE_SIZE as i64);
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);

    let size = match validate_size(size) {
        Ok(size) => size,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(());
        }
    };

    let mut rng = get_rng(None);
    let mut raster = Raster::default();
    let started = Instant::now();
    for i in 0..num_iters {
        let iteration = Instant::now();
        let mut maze = Maze::new(size).map_err(std::io::Error::other)?;
        let report = carve_with(&mut maze, &mut rng);
        let carved = iteration.elapsed();
        render_maze(&maze, &mut raster, DEFAULT_CELL_PX);
        tracing::info!(
            "Iteration {}: carved {} passages in {:?} (peak stack {}), rendered in {:?}",
            i,
            report.passages,
            carved,
            report.peak_stack_depth,
            iteration.elapsed() - carved
        );
    }
    println!(
        "{} maze(s) of {}x{} in {:?}",
        num_iters,
        size,
        size,
        started.elapsed()
    );
    Ok(())
}
