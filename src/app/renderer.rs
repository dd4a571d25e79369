use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};

use crate::render::{Canvas, Marker, Pixel, Raster};

/// Presents a rasterized maze on the terminal.
#[derive(Default)]
pub struct Renderer {
    /// The canvas mazes are drawn onto before being presented
    canvas: Raster,
}

impl Renderer {
    /// Rows kept free below the maze for the legend and the menu
    pub const NUM_MENU_ROWS: u16 = 6;

    pub fn canvas(&self) -> &Raster {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Raster {
        &mut self.canvas
    }

    fn styled(pixel: Pixel) -> StyledContent<&'static str> {
        let glyph = pixel.glyph();
        let styled_symbol = match pixel {
            Pixel::Blank => glyph.with(Color::Reset),
            Pixel::Wall => glyph.with(Color::White),
            Pixel::Marker(Marker::Start) => glyph.with(Color::Red),
            Pixel::Marker(Marker::End) => glyph.with(Color::Green),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Pixel::GLYPH_WIDTH as usize,
                "Each pixel must occupy exactly two character widths."
            );
        }

        styled_symbol
    }

    /// Check if terminal size is sufficient for the given raster.
    /// If not, print a notice instead of the maze and return Ok(false).
    fn check_size(stdout: &mut Stdout, raster: &Raster) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let needed_width = raster.columns() * Pixel::GLYPH_WIDTH as usize;
        let needed_height = raster.rows().count();
        if (term_width as usize) < needed_width || (term_height as usize) < needed_height {
            tracing::warn!(
                "Terminal {}x{} is too small for a {}x{} maze raster",
                term_width,
                term_height,
                needed_width,
                needed_height
            );
            let msg = format!(
                "Terminal size is too small ({}x{}) to display this maze ({}x{}). Please resize the terminal or pick a smaller size.\r\n",
                term_width, term_height, needed_width, needed_height
            );
            stdout.queue(style::PrintStyledContent(
                msg.with(Color::Yellow).attribute(Attribute::Bold),
            ))?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Clear the screen and draw the canvas from the top-left corner.
    /// Returns Ok(false) if the terminal was too small to draw it.
    pub fn present(&self, stdout: &mut Stdout) -> std::io::Result<bool> {
        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        if !Renderer::check_size(stdout, &self.canvas)? {
            stdout.flush()?;
            return Ok(false);
        }

        for row in self.canvas.rows() {
            for &pixel in row {
                stdout.queue(style::PrintStyledContent(Renderer::styled(pixel)))?;
            }
            stdout.queue(style::Print("\r\n"))?;
        }
        stdout.flush()?;
        tracing::debug!(
            "Presented {}x{} px canvas",
            self.canvas.width(),
            self.canvas.height()
        );
        Ok(true)
    }

    /// Blank the canvas, keeping its size.
    fn reset_canvas(&mut self) {
        self.canvas.clear();
    }

    /// Erase the rendered output: the canvas and the screen.
    pub fn clear(&mut self, stdout: &mut Stdout) -> std::io::Result<()> {
        self.reset_canvas();
        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{maze::Maze, render::render_maze};
    use unicode_width::UnicodeWidthStr;

    const ALL_PIXELS: [Pixel; 4] = [
        Pixel::Blank,
        Pixel::Wall,
        Pixel::Marker(Marker::Start),
        Pixel::Marker(Marker::End),
    ];

    #[test]
    fn test_every_pixel_glyph_is_two_columns() {
        for pixel in ALL_PIXELS {
            assert_eq!(
                UnicodeWidthStr::width(pixel.glyph()),
                Pixel::GLYPH_WIDTH as usize,
                "{:?}",
                pixel
            );
            assert_eq!(Renderer::styled(pixel).content(), &pixel.glyph());
        }
    }

    #[test]
    fn test_start_is_red_and_end_is_green() {
        assert_eq!(
            Renderer::styled(Pixel::Marker(Marker::Start))
                .style()
                .foreground_color,
            Some(Color::Red)
        );
        assert_eq!(
            Renderer::styled(Pixel::Marker(Marker::End))
                .style()
                .foreground_color,
            Some(Color::Green)
        );
    }

    #[test]
    fn test_reset_blanks_the_canvas() {
        let mut renderer = Renderer::default();
        render_maze(&Maze::new(4).unwrap(), renderer.canvas_mut(), 2);
        assert!(renderer.canvas().count(Pixel::Wall) > 0);

        renderer.reset_canvas();
        let canvas = renderer.canvas();
        assert_eq!((canvas.width(), canvas.height()), (8, 8));
        assert_eq!(canvas.count(Pixel::Blank), 9 * 9);
    }
}
