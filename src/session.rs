//! The session loop: owns the mutable state and orchestrates one tick at a
//! time.
//!
//! Tick order is fixed: pacer gate, capture read, transform, quantize, input
//! poll, command dispatch, render, and conditionally export. The loop is
//! single-threaded; the only suspension point is the pacer's sleep. It stops
//! on stream exhaustion, a quit command, or the process interrupt flag, and
//! all three paths funnel through the same idempotent shutdown.

use crate::capture::{CaptureError, CaptureSource};
use crate::export;
use crate::input::{Command, InputPoller};
use crate::pacing::Pacer;
use crate::quantize::{self, GlyphRamp, PaletteSet};
use crate::rendering::cell::Cell;
use crate::rendering::color::AnsiColor;
use crate::rendering::grid::Grid;
use crate::rendering::renderer::Renderer;
use crate::transform;
use log::warn;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long a status line stays visible.
const STATUS_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Why a session stopped. Reported to the user after the terminal is
/// restored, since anything printed inside the alternate screen is lost on
/// leaving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The capture source ran out of frames or the device went away.
    StreamEnded,
    /// The user pressed a quit key.
    Quit,
    /// The process interrupt flag was raised.
    Interrupted,
}

/// The mutable per-session state. Created at startup, mutated only by
/// decoded commands, destroyed at loop exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub mirror_x: bool,
    pub mirror_y: bool,
    pub palette_idx: usize,
    pub running: bool,
}

impl SessionState {
    pub fn new(palette_idx: usize) -> Self {
        Self {
            mirror_x: false,
            mirror_y: false,
            palette_idx,
            running: true,
        }
    }

    /// Applies one command. Returns true if a snapshot export was requested
    /// this tick; exporting is a side effect of the loop, not of the state.
    pub fn apply(&mut self, command: Command, palettes: &PaletteSet) -> bool {
        match command {
            Command::ToggleMirrorX => {
                self.mirror_x = !self.mirror_x;
                false
            }
            Command::ToggleMirrorY => {
                self.mirror_y = !self.mirror_y;
                false
            }
            Command::CyclePalette => {
                self.palette_idx = palettes.next_index(self.palette_idx);
                false
            }
            Command::ExportSnapshot => true,
            Command::Quit => {
                self.running = false;
                false
            }
        }
    }
}

/// A running playback session.
///
/// Owns the capture source for its entire lifetime and releases it exactly
/// once on shutdown. Grid dimensions are fixed when the session is created.
pub struct Session<R: Renderer, I: InputPoller> {
    source: Option<Box<dyn CaptureSource>>,
    renderer: R,
    input: I,
    glyphs: GlyphRamp,
    palettes: PaletteSet,
    pacer: Pacer,
    cols: u32,
    rows: u32,
    export_path: PathBuf,
    state: SessionState,
    status: Option<(String, Instant)>,
    stop_reason: Option<StopReason>,
    cleaned_up: bool,
}

#[allow(clippy::too_many_arguments)]
impl<R: Renderer, I: InputPoller> Session<R, I> {
    pub fn new(
        source: Box<dyn CaptureSource>,
        renderer: R,
        input: I,
        glyphs: GlyphRamp,
        palettes: PaletteSet,
        initial_palette: usize,
        pacer: Pacer,
        cols: u32,
        rows: u32,
        export_path: PathBuf,
    ) -> Self {
        Self {
            source: Some(source),
            renderer,
            input,
            glyphs,
            palettes,
            pacer,
            cols,
            rows,
            export_path,
            state: SessionState::new(initial_palette),
            status: None,
            stop_reason: None,
            cleaned_up: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Why the session stopped, once it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Runs ticks until the session stops, then cleans up. Cleanup runs on
    /// every exit path, including tick errors.
    pub fn run(&mut self) -> Result<(), SessionError> {
        let result = self.run_loop();
        self.shutdown();
        result
    }

    fn run_loop(&mut self) -> Result<(), SessionError> {
        while self.state.running {
            if crate::interrupted() {
                self.stop_reason = Some(StopReason::Interrupted);
                break;
            }
            self.pacer.wait_for_tick();

            let Some(source) = self.source.as_mut() else {
                break;
            };
            let Some(frame) = source.read_frame()? else {
                self.stop_reason = Some(StopReason::StreamEnded);
                break;
            };

            let luma = transform::luminance_grid(
                frame,
                self.state.mirror_x,
                self.state.mirror_y,
                self.cols,
                self.rows,
            );
            let mut cells = quantize::cells_from_luminance(
                &luma,
                &self.glyphs,
                self.palettes.ramp(self.state.palette_idx),
            );

            let export_requested = match self.input.poll_command()? {
                Some(command) => self.state.apply(command, &self.palettes),
                None => false,
            };
            if !self.state.running {
                self.stop_reason = Some(StopReason::Quit);
                break;
            }

            self.overlay_status(&mut cells);
            self.renderer.render(&cells)?;

            if export_requested {
                // The notice is drawn into the next frames; stderr would be
                // swallowed by the alternate screen.
                let notice = match export::write_html(&cells, &self.export_path) {
                    Ok(()) => format!("saved snapshot to {}", self.export_path.display()),
                    Err(e) => {
                        warn!("{e}");
                        "snapshot export failed".to_string()
                    }
                };
                self.status = Some((notice, Instant::now()));
            }
        }
        Ok(())
    }

    /// Draws the pending status line over the top row of the frame, until it
    /// expires.
    fn overlay_status(&mut self, cells: &mut Grid<Cell>) {
        let Some((message, since)) = &self.status else {
            return;
        };
        if since.elapsed() > STATUS_TTL {
            self.status = None;
            return;
        }
        for (x, ch) in message.chars().take(cells.width()).enumerate() {
            cells[(x, 0)] = Cell::new(ch).with_color(AnsiColor(97));
        }
    }

    /// Releases the capture source and clears the display. Safe to call more
    /// than once; only the first call does anything.
    fn shutdown(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;
        self.state.running = false;
        if let Some(source) = self.source.take() {
            drop(source);
        }
        if let Err(e) = self.renderer.clear() {
            warn!("failed to clear display during shutdown: {e}");
        }
    }
}
