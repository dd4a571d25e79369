mod renderer;

pub use renderer::Renderer;

use std::io::{Stdout, Write};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    error::Result,
    generators::generate_maze,
    maze::{MAX_MAZE_SIZE, Maze, parse_size, validate_size},
    render::{Canvas, DEFAULT_CELL_PX, MAX_CELL_PX, MIN_CELL_PX, Marker, Pixel, render_maze},
};

/// What to do once a maze is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterMaze {
    /// Clear the maze and ask for a new size
    Reset,
    /// Carve a new maze of the same size
    Regenerate,
    Exit,
}

impl AfterMaze {
    const ALL: [AfterMaze; 3] = [AfterMaze::Reset, AfterMaze::Regenerate, AfterMaze::Exit];

    fn shortcut(self) -> char {
        match self {
            AfterMaze::Reset => 'r',
            AfterMaze::Regenerate => 'g',
            AfterMaze::Exit => 'q',
        }
    }

    fn hint(self) -> &'static str {
        match self {
            AfterMaze::Reset => "clear the maze and pick a new size",
            AfterMaze::Regenerate => "carve another maze of the same size",
            AfterMaze::Exit => "leave",
        }
    }

    fn from_shortcut(c: char) -> Option<AfterMaze> {
        let c = c.to_ascii_lowercase();
        AfterMaze::ALL.into_iter().find(|a| a.shortcut() == c)
    }
}

impl std::fmt::Display for AfterMaze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AfterMaze::Reset => write!(f, "[r] Reset"),
            AfterMaze::Regenerate => write!(f, "[g] Regenerate"),
            AfterMaze::Exit => write!(f, "[q] Exit"),
        }
    }
}

pub struct App {
    /// Base seed for the random source; `None` draws from the OS on every request
    seed: Option<u64>,
    /// Raster pixels per maze cell
    cell_px: u32,
}

impl Default for App {
    fn default() -> Self {
        Self {
            seed: None,
            cell_px: DEFAULT_CELL_PX,
        }
    }
}

impl App {
    pub fn new(seed: Option<u64>, cell_px: u32) -> Self {
        Self {
            seed,
            cell_px: cell_px.clamp(MIN_CELL_PX, MAX_CELL_PX),
        }
    }

    pub fn cell_px(&self) -> u32 {
        self.cell_px
    }

    /// Seed for the `request`-th maze, so seeded runs are reproducible but regenerating
    /// still produces a different maze.
    fn request_seed(&self, request: u64) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(request))
    }

    /// Build and carve one maze, then draw it onto `canvas`. Nothing is built or drawn
    /// if `size` is invalid.
    pub fn draw_maze<C: Canvas + ?Sized>(
        &self,
        size: i64,
        request: u64,
        canvas: &mut C,
    ) -> Result<()> {
        let size = validate_size(size)?;
        let mut maze = Maze::new(size)?;
        tracing::info!("Generating {}x{} maze (request {})", size, size, request);
        generate_maze(&mut maze, self.request_seed(request));
        render_maze(&maze, canvas, self.cell_px);
        Ok(())
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        crossterm::queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop: ask for a size, show the maze, then reset, regenerate or exit.
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        let mut renderer = Renderer::default();
        let mut request: u64 = 0;

        'prompt: loop {
            let size = match self.ask_maze_size(stdout)? {
                Some(size) => size,
                None => break,
            };

            loop {
                if let Err(e) = self.draw_maze(size as i64, request, renderer.canvas_mut()) {
                    // The prompt already validated, but never draw from a bad request
                    tracing::warn!("Rejected maze request: {}", e);
                    stdout.execute(style::PrintStyledContent(
                        format!("{}\r\n", e).with(Color::Red),
                    ))?;
                    continue 'prompt;
                }
                request += 1;

                if renderer.present(stdout)? {
                    queue!(
                        stdout,
                        style::PrintStyledContent("Start".with(Color::Red)),
                        style::Print(format!(" {}  ", Pixel::Marker(Marker::Start).glyph())),
                        style::PrintStyledContent("End".with(Color::Green)),
                        style::Print(format!(
                            " {}  ({}x{} cells)\r\n",
                            Pixel::Marker(Marker::End).glyph(),
                            size,
                            size
                        )),
                    )?;
                    stdout.flush()?;
                }

                match App::ask_after_maze(stdout)? {
                    Some(AfterMaze::Reset) => {
                        tracing::info!("Reset requested");
                        renderer.clear(stdout)?;
                        continue 'prompt;
                    }
                    Some(AfterMaze::Regenerate) => continue,
                    Some(AfterMaze::Exit) | None => break 'prompt,
                }
            }
        }
        tracing::info!("Exiting after {} maze(s)", request);
        Ok(())
    }

    /// Largest maze size whose raster fits in `term_size` terminal cells along one axis.
    /// A raster of `n` cells spans `n * cell_px + 1` pixels, each `glyph_width` cells wide.
    fn get_max_maze_size(term_size: u16, glyph_width: u16, cell_px: u32) -> u16 {
        let pixels = (term_size / glyph_width.max(1)) as u32;
        let max = pixels.saturating_sub(1) / cell_px.max(1);
        max.min(MAX_MAZE_SIZE as u32) as u16
    }

    /// Largest maze that fits the current terminal, leaving room for the menu.
    fn max_size_for_terminal(&self) -> u16 {
        match terminal::size() {
            Ok((term_width, term_height)) => {
                App::get_max_maze_size(term_width, Pixel::GLYPH_WIDTH, self.cell_px).min(
                    App::get_max_maze_size(
                        term_height.saturating_sub(Renderer::NUM_MENU_ROWS),
                        1,
                        self.cell_px,
                    ),
                )
            }
            // Fallback to the request bound if terminal size cannot be determined
            Err(_) => MAX_MAZE_SIZE,
        }
    }

    /// Size typed by the user, checked against the request bounds and the terminal.
    /// An empty input picks the largest size that fits.
    fn validate_input(input: &str, max_size: u16) -> std::result::Result<u16, String> {
        if max_size == 0 {
            return Err("The terminal is too small to display any maze.".to_string());
        }
        if input.is_empty() {
            return Ok(max_size);
        }
        let size = parse_size(input).map_err(|e| e.to_string())?;
        if size > max_size {
            return Err(format!(
                "A {}x{} maze does not fit this terminal; the largest that fits is {}.",
                size, size, max_size
            ));
        }
        Ok(size)
    }

    /// Arrow keys nudge the typed size by `delta`, staying within `1..=max_size`.
    /// Anything that is not a number yet starts from the largest size.
    fn nudge_size(input: &str, delta: i32, max_size: u16) -> String {
        if max_size == 0 {
            return input.to_string();
        }
        let current = input.parse::<i32>().unwrap_or(max_size as i32 - delta);
        (current + delta).clamp(1, max_size as i32).to_string()
    }

    /// Ask user for the maze size, validating as they type.
    /// Returns None if user cancels input with Esc
    fn ask_maze_size(&self, stdout: &mut Stdout) -> std::io::Result<Option<u16>> {
        stdout.execute(style::PrintStyledContent(
            format!(
                "Enter the maze size (between 1 and {}), or press Esc to exit. \
Up/Down adjust the size; leave empty for the largest maze that fits the terminal.\r\n",
                MAX_MAZE_SIZE
            )
            .with(Color::Blue),
        ))?;

        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        let mut input = String::new();

        let size = loop {
            let max_size = self.max_size_for_terminal();
            let checked = App::validate_input(input.trim(), max_size);

            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown),
                style::PrintStyledContent("Size: ".with(Color::Cyan).attribute(Attribute::Bold)),
                style::PrintStyledContent(
                    input
                        .as_str()
                        .with(if checked.is_ok() { Color::Green } else { Color::Red })
                ),
                style::Print(" \r\n"),
            )?;
            match &checked {
                Ok(size) if input.is_empty() => {
                    stdout.queue(style::PrintStyledContent(
                        format!("Enter picks {}x{}", size, size).with(Color::DarkGrey),
                    ))?;
                }
                Ok(_) => {}
                Err(msg) => {
                    stdout.queue(style::PrintStyledContent(
                        msg.as_str().with(Color::DarkGrey).attribute(Attribute::Dim),
                    ))?;
                }
            }
            stdout.flush()?;

            let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? else {
                // Resizes change the largest size that fits; redraw with the new bound
                continue;
            };
            if kind != event::KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Enter => {
                    if let Ok(size) = checked {
                        break Some(size);
                    }
                }
                KeyCode::Up => input = App::nudge_size(input.trim(), 1, max_size),
                KeyCode::Down => input = App::nudge_size(input.trim(), -1, max_size),
                KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Esc => break None,
                _ => {}
            }
        };

        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        if let Some(size) = size {
            stdout.queue(style::PrintStyledContent(
                format!("Size set to {}\r\n", size)
                    .with(Color::Green)
                    .attribute(Attribute::Bold),
            ))?;
        }
        stdout.flush()?;
        Ok(size)
    }

    /// Menu shown under a finished maze. Arrow keys and Enter, or the shortcut letter.
    /// Returns None if user presses Esc
    fn ask_after_maze(stdout: &mut Stdout) -> std::io::Result<Option<AfterMaze>> {
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        let mut selected = 0;

        let choice = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown),
                style::PrintStyledContent("What next?".with(Color::Yellow)),
            )?;
            for (i, option) in AfterMaze::ALL.iter().enumerate() {
                let line = format!("\r\n{:<16}", option.to_string());
                if i == selected {
                    stdout.queue(style::PrintStyledContent(line.attribute(Attribute::Reverse)))?;
                } else {
                    stdout.queue(style::Print(line))?;
                }
                stdout.queue(style::PrintStyledContent(option.hint().with(Color::DarkGrey)))?;
            }
            stdout.queue(style::Print("\r\n"))?;
            stdout.flush()?;

            let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != event::KeyEventKind::Press {
                continue;
            }
            let last = AfterMaze::ALL.len() - 1;
            match code {
                KeyCode::Up => selected = if selected == 0 { last } else { selected - 1 },
                KeyCode::Down => selected = if selected == last { 0 } else { selected + 1 },
                KeyCode::Enter => break Some(AfterMaze::ALL[selected]),
                KeyCode::Char(c) => {
                    if let Some(choice) = AfterMaze::from_shortcut(c) {
                        break Some(choice);
                    }
                }
                KeyCode::Esc => break None,
                _ => {}
            }
        };

        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::MazeError, render::Raster};

    #[test]
    fn test_max_maze_size_from_terminal() {
        // 80 columns -> 40 pixels -> (40 - 1) / 2 = 19 cells
        assert_eq!(App::get_max_maze_size(80, 2, 2), 19);
        assert_eq!(App::get_max_maze_size(24, 1, 2), 11);
        assert_eq!(App::get_max_maze_size(1, 2, 2), 0);
        assert_eq!(App::get_max_maze_size(u16::MAX, 1, 2), MAX_MAZE_SIZE);
    }

    #[test]
    fn test_validate_input() {
        assert_eq!(App::validate_input("", 12), Ok(12));
        assert_eq!(App::validate_input("7", 12), Ok(7));
        assert!(App::validate_input("13", 12).is_err());
        assert!(App::validate_input("0", 12).is_err());
        assert!(App::validate_input("-2", 12).is_err());
        assert!(App::validate_input("5", 0).is_err());
    }

    #[test]
    fn test_nudge_size_stays_in_range() {
        assert_eq!(App::nudge_size("", 1, 12), "12");
        assert_eq!(App::nudge_size("", -1, 12), "12");
        assert_eq!(App::nudge_size("5", 1, 12), "6");
        assert_eq!(App::nudge_size("12", 1, 12), "12");
        assert_eq!(App::nudge_size("1", -1, 12), "1");
        assert_eq!(App::nudge_size("-7", 1, 12), "1");
        assert_eq!(App::nudge_size("40", -1, 12), "12");
        assert_eq!(App::nudge_size("3", 1, 0), "3");
    }

    #[test]
    fn test_after_maze_shortcuts() {
        assert_eq!(AfterMaze::from_shortcut('r'), Some(AfterMaze::Reset));
        assert_eq!(AfterMaze::from_shortcut('G'), Some(AfterMaze::Regenerate));
        assert_eq!(AfterMaze::from_shortcut('q'), Some(AfterMaze::Exit));
        assert_eq!(AfterMaze::from_shortcut('x'), None);
    }

    #[test]
    fn test_draw_maze_rejects_invalid_requests() {
        let app = App::default();
        let mut raster = Raster::default();
        assert!(matches!(
            app.draw_maze(0, 0, &mut raster),
            Err(MazeError::InvalidSize { size: 0, .. })
        ));
        assert!(matches!(
            app.draw_maze(-4, 0, &mut raster),
            Err(MazeError::InvalidSize { size: -4, .. })
        ));
        assert!(app.draw_maze(1000, 0, &mut raster).is_err());
        // Nothing was drawn
        assert_eq!(raster, Raster::default());
    }

    #[test]
    fn test_draw_maze_is_reproducible_per_request() {
        let app = App::new(Some(5), 2);
        let draw = |request| {
            let mut raster = Raster::default();
            app.draw_maze(9, request, &mut raster).unwrap();
            raster
        };
        let first = draw(0);
        assert_eq!(first, draw(0));
        assert_ne!(first, draw(1));
        assert_eq!((first.width(), first.height()), (18, 18));
        assert_eq!(first.get((1, 1)), Some(Pixel::Marker(Marker::Start)));
        assert_eq!(first.get((17, 17)), Some(Pixel::Marker(Marker::End)));
    }

    #[test]
    fn test_cell_px_is_bounded() {
        assert_eq!(App::new(None, 0).cell_px(), MIN_CELL_PX);
        assert_eq!(App::new(None, 5).cell_px(), 5);
        assert_eq!(App::new(None, 1_000_000_000).cell_px(), MAX_CELL_PX);
    }
}
