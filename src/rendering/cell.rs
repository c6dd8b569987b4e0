//! Cell representation for terminal rendering.
//!
//! A [`Cell`] is the rendered unit of the character grid: one glyph plus the
//! abstract color id it should be drawn in. The quantizer produces cells, the
//! renderer draws them, and the exporter serializes them.

use crate::rendering::color::AnsiColor;

/// A single character cell: a glyph and its foreground color id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// The character to be displayed.
    pub glyph: char,
    /// The abstract ANSI color id of the glyph.
    pub color: AnsiColor,
}

impl Cell {
    /// Creates a new `Cell` with the given glyph and bright-white color.
    pub fn new(glyph: char) -> Self {
        Self {
            glyph,
            color: AnsiColor(97),
        }
    }

    /// Creates a new `Cell` with the same glyph but the given color.
    pub fn with_color(self, color: AnsiColor) -> Self {
        Self {
            glyph: self.glyph,
            color,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ')
    }
}
