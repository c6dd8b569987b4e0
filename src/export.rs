//! HTML snapshot export.
//!
//! Serializes the current cell grid into a self-contained HTML document: a
//! fixed-metric `<pre>` block where every cell becomes a `<span>` styled with
//! the hex color for its ANSI id. Because cells carry their color id as data,
//! there is nothing to re-parse here; the only degradations are an unknown
//! color id (rendered in the fallback color) and an HTML-unsafe glyph
//! (rendered as a blank placeholder). Neither aborts the export.

use crate::rendering::cell::Cell;
use crate::rendering::grid::Grid;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write snapshot to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

const HEADER: &str = "<pre style='font-size:7px; line-height:7px; background:black;'>\n";
const FOOTER: &str = "</pre>";

/// Renders the grid as an HTML document.
pub fn render_html(grid: &Grid<Cell>) -> String {
    // span + glyph + hex color is ~45 bytes per cell.
    let mut html = String::with_capacity(HEADER.len() + grid.width() * grid.height() * 45);
    html.push_str(HEADER);
    let mut skipped = 0usize;
    for row in grid.rows() {
        for cell in row {
            push_cell(&mut html, cell, &mut skipped);
        }
        html.push_str("<br>\n");
    }
    html.push_str(FOOTER);
    if skipped > 0 {
        log::debug!("snapshot: replaced {skipped} markup-unsafe glyphs with blanks");
    }
    html
}

fn push_cell(html: &mut String, cell: &Cell, skipped: &mut usize) {
    // Glyphs that would break the markup degrade to a blank placeholder
    // rather than aborting the export.
    let glyph = match cell.glyph {
        '<' | '>' | '&' | '\'' | '"' => {
            *skipped += 1;
            ' '
        }
        g => g,
    };
    let color = cell.color.hex_or_fallback();
    // Writing to a String cannot fail.
    let _ = write!(html, "<span style='color:{color}'>{glyph}</span>");
}

/// Serializes the grid and writes it to `path` as a single file write,
/// overwriting any previous snapshot.
pub fn write_html(grid: &Grid<Cell>, path: &Path) -> Result<(), ExportError> {
    let html = render_html(grid);
    std::fs::write(path, html).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })
}
