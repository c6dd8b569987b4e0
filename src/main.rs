use anyhow::Context;
use asciicam::capture::open_source;
use asciicam::config::Cli;
use asciicam::input::TerminalInput;
use asciicam::pacing::Pacer;
use asciicam::rendering::renderer::TerminalRenderer;
use asciicam::session::{Session, StopReason};
use asciicam::{
    install_interrupt_handler, install_panic_handler, terminal_cleanup, terminal_setup,
};
use clap::Parser;
use env_logger::Env;
use log::warn;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let settings = cli.into_settings()?;

    // Opening the source can fail with a plain message; do it before touching
    // the terminal state.
    let source = open_source(&settings.spec)
        .with_context(|| format!("cannot open {}", settings.spec))?;
    let pacer = Pacer::new(settings.mode, settings.max_fps, source.frame_rate());

    install_interrupt_handler().context("failed to install the interrupt handler")?;
    terminal_setup().context("failed to set up the terminal")?;
    install_panic_handler();

    let mut session = Session::new(
        source,
        TerminalRenderer::new_with_frame_buf_writer(),
        TerminalInput,
        settings.glyphs,
        settings.palettes,
        settings.palette_idx,
        pacer,
        settings.cols,
        settings.rows,
        settings.export_path,
    );
    let result = session.run();

    // Restore the terminal no matter how the session ended, but never let a
    // cleanup failure shadow the session's own error.
    if let Err(e) = terminal_cleanup() {
        warn!("failed to restore the terminal: {e}");
    }
    result?;

    match session.stop_reason() {
        Some(StopReason::StreamEnded) => eprintln!("stream ended"),
        Some(StopReason::Interrupted) => eprintln!("interrupted"),
        Some(StopReason::Quit) | None => {}
    }
    Ok(())
}
