//! ANSI terminal renderer

use super::Renderer;
use crate::automaton::{CellChange, Grid, Palette, State};
use crate::error::{CaError, CaResult};
use crate::utils::ColorOutput;
use std::io::Write;

/// Paints each cell as a two-column 24-bit color block
///
/// Full frames clear the screen; deltas move the cursor to each changed cell.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn block(palette: &Palette, state: State) -> CaResult<String> {
        palette
            .color(state)
            .map(ColorOutput::rgb_block)
            .ok_or(CaError::MissingColor(state))
    }

    fn flush(&mut self, frame: &str) -> CaResult<()> {
        self.out
            .write_all(frame.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| CaError::Surface(e.to_string()))
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn paint_grid(&mut self, grid: &Grid, palette: &Palette) -> CaResult<()> {
        let mut frame = String::from("\x1b[2J\x1b[H");
        for row in grid.to_rows() {
            for state in row {
                frame.push_str(&Self::block(palette, state)?);
            }
            frame.push('\n');
        }
        self.flush(&frame)
    }

    fn paint_cells(&mut self, changes: &[CellChange], palette: &Palette) -> CaResult<()> {
        let mut frame = String::new();
        for change in changes {
            frame.push_str(&format!("\x1b[{};{}H", change.row + 1, change.col * 2 + 1));
            frame.push_str(&Self::block(palette, change.value)?);
        }
        // Return the cursor home
        frame.push_str("\x1b[H");
        self.flush(&frame)
    }
}
