//! Colored-cell render surface for the terminal.

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use sv3d_core::{RenderSurface, Rgb, ScreenPoint};

/// Every cell renders as a full block; color carries the shading.
const CELL: char = '█';

/// A fixed-resolution color buffer that accepts filled triangles and flushes
/// rows of styled cells.
///
/// Triangles overwrite whatever is already in the buffer, so callers must
/// submit them far to near.
pub struct TermSurface {
    width: usize,
    height: usize,
    cells: Vec<Rgb>,
}

impl TermSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Rgb::BLACK; width * height],
        }
    }

    /// Drop the old buffer and start over at the new terminal size.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Rgb::BLACK; width * height];
    }

    /// Fill the whole buffer with the background color.
    pub fn clear(&mut self, color: Rgb) {
        self.cells.fill(color);
    }

    /// Flush the buffer to `writer`, batching color changes per run of
    /// same-colored cells.
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Rgb> = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if current != Some(cell) {
                    writer.queue(SetForegroundColor(Color::Rgb {
                        r: cell.r,
                        g: cell.g,
                        b: cell.b,
                    }))?;
                    current = Some(cell);
                }
                writer.queue(Print(CELL))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl RenderSurface for TermSurface {
    fn fill_triangle(&mut self, points: [ScreenPoint; 3], color: Rgb) {
        let [v0, v1, v2] = points;

        // Bounding box, clipped to the buffer
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.cells[y as usize * self.width + x as usize] = color;
                    }
                }
            }
        }
    }
}

/// Barycentric coordinates of `p` in the triangle, or `None` when the
/// triangle is degenerate.
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
