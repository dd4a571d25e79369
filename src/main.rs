use std::{io::Write, path::PathBuf, process::ExitCode};

use clap::Parser;

use mazecarve::{
    app::App,
    logging::init_logging,
    render::{DEFAULT_CELL_PX, MAX_CELL_PX, MIN_CELL_PX, Raster},
};

/// Carve perfect mazes with a randomized depth-first search and draw them in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Print a single maze of this size to stdout and exit instead of starting the interactive UI
    #[arg(long, allow_negative_numbers = true)]
    size: Option<i64>,

    /// Seed the random source for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,

    /// Raster pixels per maze cell
    #[arg(
        long,
        default_value_t = DEFAULT_CELL_PX,
        value_parser = clap::value_parser!(u32).range(MIN_CELL_PX as i64..=MAX_CELL_PX as i64)
    )]
    cell_px: u32,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> std::io::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli.log_dir)?;
    tracing::info!("Starting with {:?}", cli);

    let app = App::new(cli.seed, cli.cell_px);

    if let Some(size) = cli.size {
        let mut raster = Raster::default();
        return match app.draw_maze(size, 0, &mut raster) {
            Ok(()) => {
                let mut stdout = std::io::stdout().lock();
                write!(stdout, "{}", raster)?;
                stdout.flush()?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                tracing::warn!("Rejected maze request: {}", e);
                eprintln!("{}", e);
                Ok(ExitCode::from(2))
            }
        };
    }

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;
    result.map(|_| ExitCode::SUCCESS)
}
