//! Display and output formatting utilities

use crate::automaton::{Grid, Rgb, State};

/// Text renderings of a grid for logs and terminals
pub struct GridFormatter;

impl GridFormatter {
    /// One glyph per cell: `·` for 0, `█` for the highest state, `▒` between
    pub fn format_grid_compact(grid: &Grid) -> String {
        let top = grid.cells().iter().copied().max().unwrap_or(0);
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                output.push(Self::glyph(grid.get(row, col), top));
            }
            output.push('\n');
        }
        output
    }

    fn glyph(state: State, top: State) -> char {
        match state {
            0 => '·',
            s if s == top => '█',
            _ => '▒',
        }
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    pub fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// A two-column block painted with a 24-bit background color
    pub fn rgb_block(color: Rgb) -> String {
        format!("\x1b[48;2;{};{};{}m  \x1b[0m", color.0, color.1, color.2)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
