//! Rendering logic and the `Renderer` trait.
//!
//! [`Renderer`] abstracts the output side of the pipeline so the session loop
//! can be driven against an in-memory implementation in tests.
//! [`TerminalRenderer`] is the crossterm-backed implementation used by the
//! binary.
//!
//! Every tick is a full repaint: the cursor moves to the origin and the whole
//! grid is written row by row. The grid covers the entire terminal and is
//! small, so there is no diffing against the previous frame, and the cursor
//! can never drift out of sync with a partial update. The only elision is for
//! colors: a `SetForegroundColor` is queued only when the color actually
//! changes from the previous cell.

use crate::rendering::cell::Cell;
use crate::rendering::color::AnsiColor;
use crate::rendering::grid::Grid;
use crossterm::queue;
use std::io;
use std::io::{stdout, Stdout, Write};

/// Trait for rendering a full frame of cells.
pub trait Renderer {
    /// Redraws the display region from the given grid, flushing synchronously
    /// before returning.
    fn render(&mut self, grid: &Grid<Cell>) -> io::Result<()>;

    /// Clears the display region.
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Concrete `Renderer` implementation that repaints a terminal using
/// `crossterm`.
pub struct TerminalRenderer<W: Write> {
    sink: W,
    last_color: Option<AnsiColor>,
}

impl TerminalRenderer<FrameBufWriter> {
    /// Creates a renderer with a sink that only flushes once per frame.
    /// This is the recommended sink.
    pub fn new_with_frame_buf_writer() -> Self {
        Self::new_with_sink(FrameBufWriter::new())
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a new `TerminalRenderer` with the given sink.
    pub fn new_with_sink(sink: W) -> Self {
        Self {
            sink,
            last_color: None,
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, grid: &Grid<Cell>) -> io::Result<()> {
        queue!(self.sink, crossterm::cursor::MoveTo(0, 0))?;
        // Force a color set on the first cell of every frame.
        self.last_color = None;

        let height = grid.height();
        for (y, row) in grid.rows().enumerate() {
            for cell in row {
                if self.last_color != Some(cell.color) {
                    queue!(
                        self.sink,
                        crossterm::style::SetForegroundColor(cell.color.to_crossterm())
                    )?;
                    self.last_color = Some(cell.color);
                }
                queue!(self.sink, crossterm::style::Print(cell.glyph))?;
            }
            if y < height - 1 {
                queue!(self.sink, crossterm::cursor::MoveToNextLine(1))?;
            }
        }

        self.sink.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(
            self.sink,
            crossterm::style::ResetColor,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0)
        )?;
        self.sink.flush()
    }
}

/// Custom buffer writer that _only_ flushes explicitly.
///
/// Queuing a frame's worth of escape sequences into one buffer and writing it
/// with a single syscall avoids visible tearing mid-frame.
pub struct FrameBufWriter {
    buf: Vec<u8>,
    stdout: Stdout,
}

impl FrameBufWriter {
    fn new() -> Self {
        Self {
            buf: vec![],
            stdout: stdout(),
        }
    }
}

impl Write for FrameBufWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut lock = self.stdout.lock();
        lock.write_all(&self.buf)?;
        lock.flush()?;
        self.buf.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sink that records everything written to it.
    #[derive(Default)]
    struct VecSink(Vec<u8>);

    impl Write for VecSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn renders_every_glyph() {
        let mut grid = Grid::new(3, 2, Cell::default());
        grid[(0, 0)] = Cell::new('a').with_color(AnsiColor(32));
        grid[(1, 0)] = Cell::new('b').with_color(AnsiColor(32));
        grid[(2, 1)] = Cell::new('c').with_color(AnsiColor(97));

        let mut renderer = TerminalRenderer::new_with_sink(VecSink::default());
        renderer.render(&grid).unwrap();

        let out = String::from_utf8(renderer.sink.0).unwrap();
        for glyph in ['a', 'b', 'c'] {
            assert!(out.contains(glyph), "missing {glyph} in {out:?}");
        }
    }

    #[test]
    fn elides_repeated_colors() {
        let mut grid = Grid::new(4, 1, Cell::default());
        for x in 0..4 {
            grid[(x, 0)] = Cell::new('#').with_color(AnsiColor(92));
        }

        let mut renderer = TerminalRenderer::new_with_sink(VecSink::default());
        renderer.render(&grid).unwrap();

        let out = String::from_utf8(renderer.sink.0).unwrap();
        // One set for the whole row, not one per cell.
        let sets = out.matches("\x1b[38").count();
        assert_eq!(sets, 1, "expected a single color set, got {out:?}");
    }
}
