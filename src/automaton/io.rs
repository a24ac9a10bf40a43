//! Plaintext pattern blocks

use super::rules::LifeRule;
use super::State;
use crate::error::{CaError, PatternParseError};
use anyhow::{Context, Result};
use std::path::Path;

/// Rows of cell values, possibly jagged, ready for `Grid::stamp`
pub type Pattern = Vec<Vec<State>>;

/// Glyph mapping for plaintext patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaintextFormat {
    pub alive: char,
    pub dead: char,
    pub comment: char,
    pub alive_value: State,
    pub dead_value: State,
}

impl Default for PlaintextFormat {
    fn default() -> Self {
        Self {
            alive: 'O',
            dead: '.',
            comment: '!',
            alive_value: LifeRule::ALIVE,
            dead_value: 0,
        }
    }
}

impl PlaintextFormat {
    /// Parse a pattern block line by line
    ///
    /// Text after the comment glyph is ignored and lines holding only a
    /// comment are skipped. A blank line is an all-dead row.
    pub fn parse(&self, content: &str) -> std::result::Result<Pattern, PatternParseError> {
        let mut rows = Vec::new();

        for (line_idx, raw) in content.lines().enumerate() {
            let (body, had_comment) = match raw.find(self.comment) {
                Some(pos) => (&raw[..pos], true),
                None => (raw, false),
            };
            let body = body.trim_end();
            if had_comment && body.is_empty() {
                continue;
            }

            let row = body
                .chars()
                .enumerate()
                .map(|(col_idx, glyph)| match glyph {
                    g if g == self.alive => Ok(self.alive_value),
                    g if g == self.dead => Ok(self.dead_value),
                    _ => Err(PatternParseError::UnexpectedGlyph {
                        glyph,
                        line: line_idx + 1,
                        column: col_idx + 1,
                    }),
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }
        if rows.iter().all(Vec::is_empty) {
            return Err(PatternParseError::Empty);
        }

        Ok(rows)
    }

    /// Render a pattern; values other than `alive_value` print as dead
    pub fn to_plaintext(&self, pattern: &[Vec<State>]) -> String {
        let mut result = String::new();
        for row in pattern {
            result.extend(row.iter().map(|&value| {
                if value == self.alive_value {
                    self.alive
                } else {
                    self.dead
                }
            }));
            result.push('\n');
        }
        result
    }
}

/// Parse a pattern with the default `O` / `.` / `!` glyphs
pub fn parse_plaintext(content: &str) -> std::result::Result<Pattern, PatternParseError> {
    PlaintextFormat::default().parse(content)
}

/// Render a pattern with the default glyphs
pub fn pattern_to_plaintext(pattern: &[Vec<State>]) -> String {
    PlaintextFormat::default().to_plaintext(pattern)
}

/// Load a plaintext pattern file
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P, format: &PlaintextFormat) -> Result<Pattern> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    format
        .parse(&content)
        .map_err(CaError::from)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}
