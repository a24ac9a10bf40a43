//! In-memory RGB framebuffer

use super::Renderer;
use crate::automaton::{CellChange, Grid, Palette, Rgb, State};
use crate::error::{CaError, CaResult};

/// RGB8 pixel buffer painted as `cell_size` x `cell_size` squares per cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    cell_size: usize,
    pixels: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize, cell_size: usize) -> CaResult<Self> {
        if width == 0 || height == 0 {
            return Err(CaError::Surface(format!(
                "surface must be at least 1x1 pixels, got {}x{}",
                width, height
            )));
        }
        if cell_size == 0 {
            return Err(CaError::Surface("cell size must be positive".to_string()));
        }

        Ok(Self {
            width,
            height,
            cell_size,
            pixels: vec![0; width * height * 3],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Row-major RGB8 bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 3;
        Some(Rgb(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
    }

    /// Fill the square for grid cell `(row, col)`, clipped to the surface
    fn fill_cell(&mut self, row: usize, col: usize, color: Rgb) {
        let x0 = col * self.cell_size;
        let y0 = row * self.cell_size;
        if x0 >= self.width || y0 >= self.height {
            return;
        }
        let x1 = (x0 + self.cell_size).min(self.width);
        let y1 = (y0 + self.cell_size).min(self.height);

        for y in y0..y1 {
            let start = (y * self.width + x0) * 3;
            let end = (y * self.width + x1) * 3;
            for px in self.pixels[start..end].chunks_exact_mut(3) {
                px.copy_from_slice(&[color.0, color.1, color.2]);
            }
        }
    }
}

fn lookup(palette: &Palette, state: State) -> CaResult<Rgb> {
    palette.color(state).ok_or(CaError::MissingColor(state))
}

impl Renderer for PixelSurface {
    fn paint_grid(&mut self, grid: &Grid, palette: &Palette) -> CaResult<()> {
        let rows = grid.height().min(self.height.div_ceil(self.cell_size));
        let cols = grid.width().min(self.width.div_ceil(self.cell_size));

        for row in 0..rows {
            for col in 0..cols {
                let color = lookup(palette, grid.get(row, col))?;
                self.fill_cell(row, col, color);
            }
        }
        Ok(())
    }

    fn paint_cells(&mut self, changes: &[CellChange], palette: &Palette) -> CaResult<()> {
        for change in changes {
            let color = lookup(palette, change.value)?;
            self.fill_cell(change.row, change.col, color);
        }
        Ok(())
    }
}
