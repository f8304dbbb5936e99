/// Terminal preview of an in-memory pixel surface
use crossterm::{
    cursor, execute,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use fbcube_core::{Canvas, Color, PixelSurface, SurfaceGeometry};
use log::warn;
use std::io::{self, Write};

use crate::error::AcquireError;

/// Glyph for a cell that contains a lit pixel
const LIT: char = '█';

/// Renders into a 32-bpp buffer and shows each finished frame as coloured
/// terminal cells, one cell per block of pixels.
pub struct TerminalPreview<W: Write> {
    surface: PixelSurface<Vec<u8>>,
    cols: usize,
    rows: usize,
    writer: W,
    entered: bool,
    draw_failed: bool,
}

impl<W: Write> TerminalPreview<W> {
    pub fn new(
        width: u32,
        height: u32,
        cols: usize,
        rows: usize,
        writer: W,
    ) -> Result<Self, AcquireError> {
        let geometry = SurfaceGeometry::packed(width, height, 32);
        let surface = PixelSurface::new(vec![0u8; geometry.required_len()], geometry)?;

        Ok(Self {
            surface,
            cols: cols.max(1),
            rows: rows.max(1),
            writer,
            entered: false,
            draw_failed: false,
        })
    }

    /// Switch to the alternate screen; left again on drop
    pub fn enter(&mut self) -> io::Result<()> {
        execute!(self.writer, terminal::EnterAlternateScreen, cursor::Hide)?;
        self.entered = true;
        Ok(())
    }

    /// Colour of each cell, row-major. A cell takes the first lit pixel of
    /// its block, scanning rows top to bottom.
    pub fn cells(&self) -> Vec<Option<Color>> {
        let width = self.surface.geometry().width as usize;
        let height = self.surface.geometry().height as usize;
        let block_w = width.div_ceil(self.cols);
        let block_h = height.div_ceil(self.rows);

        let mut cells = Vec::with_capacity(self.cols * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ys = (row * block_h).min(height)..((row + 1) * block_h).min(height);
                let xs = (col * block_w).min(width)..((col + 1) * block_w).min(width);
                let cell = ys
                    .flat_map(|y| xs.clone().map(move |x| (x, y)))
                    .filter_map(|(x, y)| self.surface.pixel(x as i32, y as i32))
                    .find(|&value| value != 0)
                    .map(|value| Color(value & 0xFF_FFFF));
                cells.push(cell);
            }
        }
        cells
    }

    /// Write the current frame to the terminal
    pub fn draw(&mut self) -> io::Result<()> {
        let cells = self.cells();

        for (row, line) in cells.chunks(self.cols).enumerate() {
            self.writer.queue(cursor::MoveTo(0, row as u16))?;
            for cell in line {
                match cell {
                    Some(color) => {
                        self.writer.queue(SetForegroundColor(TermColor::Rgb {
                            r: color.r(),
                            g: color.g(),
                            b: color.b(),
                        }))?;
                        self.writer.queue(Print(LIT))?;
                    }
                    None => {
                        self.writer.queue(Print(' '))?;
                    }
                }
            }
        }
        self.writer.queue(ResetColor)?;
        self.writer.flush()
    }
}

impl<W: Write> Canvas for TerminalPreview<W> {
    fn width(&self) -> u32 {
        self.surface.width()
    }

    fn height(&self) -> u32 {
        self.surface.height()
    }

    fn clear(&mut self) {
        self.surface.clear();
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.surface.set_pixel(x, y, color);
    }

    fn present(&mut self) {
        if let Err(e) = self.draw() {
            if !self.draw_failed {
                warn!("Terminal preview output failed: {}", e);
                self.draw_failed = true;
            }
        }
    }
}

impl<W: Write> Drop for TerminalPreview<W> {
    fn drop(&mut self) {
        if self.entered {
            let _ = execute!(self.writer, cursor::Show, terminal::LeaveAlternateScreen);
        }
    }
}
