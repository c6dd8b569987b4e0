#![doc = include_str!("../README.md")]

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute};
use std::io;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod capture;
pub mod config;
pub mod export;
pub mod input;
pub mod pacing;
pub mod quantize;
pub mod rendering;
pub mod session;
pub mod transform;

/// Set once by the interrupt handler, checked by the session loop at tick
/// boundaries. Cancellation is cooperative; in-flight tick work completes
/// before shutdown runs.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Installs the Ctrl-C handler. Call once at program startup.
pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst))
}

/// Whether an interrupt has been received.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Sets up the terminal for playback: alternate screen, raw mode, hidden
/// cursor.
///
/// Call before entering the session loop, and pair with
/// [`terminal_cleanup`] afterwards. It is recommended to call
/// [`install_panic_handler`] right after this function.
///
/// Note: if you are stuck in a bad terminal state, you can try running
/// `reset` in the terminal.
pub fn terminal_setup() -> io::Result<()> {
    let mut stdout = stdout();

    execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    enable_raw_mode()?;
    // don't print cursor
    execute!(stdout, cursor::Hide)?;

    Ok(())
}

/// Cleans up the terminal after playback. Resets everything done by
/// [`terminal_setup`].
pub fn terminal_cleanup() -> io::Result<()> {
    let mut stdout = stdout();
    execute!(stdout, cursor::Show)?;

    execute!(
        stdout,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
    )?;

    disable_raw_mode()?;

    execute!(stdout, crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}

/// Installs a panic handler that cleans up the terminal before panicking.
///
/// Without this, the panic message would not be displayed properly because
/// we're in a different terminal mode and in the alternate screen.
pub fn install_panic_handler() {
    let old_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |pinfo| {
        let _ = terminal_cleanup();
        eprintln!("{}", pinfo);
        old_hook(pinfo);
    }));
}
