//! Painting grid state onto output surfaces

pub mod surface;
pub mod terminal;

pub use surface::PixelSurface;
pub use terminal::TerminalRenderer;

use crate::automaton::{CellChange, Grid, Palette};
use crate::error::CaResult;

/// Consumer of full grids and per-step deltas
///
/// Renderers only read what they are given.
pub trait Renderer {
    /// Paint every cell, used for the first frame
    fn paint_grid(&mut self, grid: &Grid, palette: &Palette) -> CaResult<()>;

    /// Repaint only the cells a step reported as changed
    fn paint_cells(&mut self, changes: &[CellChange], palette: &Palette) -> CaResult<()>;
}
