use std::fmt;

use super::{Canvas, Marker, Point};

/// What a single raster pixel shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
    #[default]
    Blank,
    Wall,
    Marker(Marker),
}

impl Pixel {
    /// The width of each pixel when printed, in character widths.
    pub const GLYPH_WIDTH: u16 = 2;

    pub fn glyph(self) -> &'static str {
        match self {
            Pixel::Blank => "  ",
            Pixel::Wall => "██",
            Pixel::Marker(Marker::Start) => "🟥",
            Pixel::Marker(Marker::End) => "🟩",
        }
    }
}

/// An in-memory canvas.
///
/// A `width` x `height` raster keeps one extra column and row so strokes along the far
/// edges (x == width, y == height) stay addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Raster {
            width,
            height,
            pixels: vec![Pixel::Blank; (width as usize + 1) * (height as usize + 1)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of addressable columns, including the far edge.
    pub fn columns(&self) -> usize {
        self.width as usize + 1
    }

    fn index(&self, (x, y): Point) -> Option<usize> {
        (x <= self.width && y <= self.height)
            .then(|| y as usize * self.columns() + x as usize)
    }

    pub fn get(&self, point: Point) -> Option<Pixel> {
        self.index(point).map(|i| self.pixels[i])
    }

    fn set(&mut self, point: Point, pixel: Pixel) {
        if let Some(i) = self.index(point) {
            self.pixels[i] = pixel;
        }
    }

    /// Pixel rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks(self.columns())
    }

    pub fn count(&self, pixel: Pixel) -> usize {
        self.pixels.iter().filter(|&&p| p == pixel).count()
    }
}

impl Default for Raster {
    fn default() -> Self {
        Raster::new(0, 0)
    }
}

impl Canvas for Raster {
    fn resize(&mut self, width: u32, height: u32) {
        *self = Raster::new(width, height);
    }

    fn clear(&mut self) {
        self.pixels.fill(Pixel::Blank);
    }

    /// Bresenham stepping; points past the edges are dropped.
    fn draw_line(&mut self, from: Point, to: Point) {
        let (mut x, mut y) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set((x as u32, y as u32), Pixel::Wall);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Never paints over walls.
    fn fill_rect(&mut self, origin: Point, width: u32, height: u32, marker: Marker) {
        for y in origin.1..origin.1.saturating_add(height) {
            for x in origin.0..origin.0.saturating_add(width) {
                if matches!(self.get((x, y)), Some(p) if p != Pixel::Wall) {
                    self.set((x, y), Pixel::Marker(marker));
                }
            }
        }
    }
}

impl fmt::Display for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for pixel in row {
                write!(f, "{}", pixel.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
