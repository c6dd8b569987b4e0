//! Terminal rendering for the character grid.
//!
//! This module contains the building blocks of the output side of the
//! pipeline:
//!
//! *   [`cell`]: the [`Cell`] struct, a glyph plus its color id.
//! *   [`color`]: the [`AnsiColor`] id and its crossterm/hex mappings.
//! *   [`grid`]: the fixed-size 2D [`Grid`] buffer.
//! *   [`renderer`]: the [`Renderer`] trait and the crossterm-backed
//!     full-repaint [`TerminalRenderer`].
//!
//! [`Cell`]: cell::Cell
//! [`AnsiColor`]: color::AnsiColor
//! [`Grid`]: grid::Grid
//! [`Renderer`]: renderer::Renderer
//! [`TerminalRenderer`]: renderer::TerminalRenderer

pub mod cell;
pub mod color;
pub mod grid;
pub mod renderer;
