//! Non-blocking keyboard input, decoded into commands at the boundary.
//!
//! Raw key codes never leave this module: the session loop dispatches on the
//! closed [`Command`] enum only. Unknown keys are ignored without error.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use std::io;
use std::time::Duration;

/// A user command, decoded from a single keypress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `m`: toggle horizontal mirroring.
    ToggleMirrorX,
    /// `n`: toggle vertical mirroring.
    ToggleMirrorY,
    /// `c`: advance to the next color ramp, wrapping around.
    CyclePalette,
    /// `h`: save the current frame as an HTML snapshot.
    ExportSnapshot,
    /// `q` or Esc: stop the session.
    Quit,
}

impl Command {
    /// Decodes a key code, case-insensitively. Returns `None` for keys that
    /// are not bound to anything.
    pub fn from_key(code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'm' => Some(Command::ToggleMirrorX),
                'n' => Some(Command::ToggleMirrorY),
                'c' => Some(Command::CyclePalette),
                'h' => Some(Command::ExportSnapshot),
                'q' => Some(Command::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Polled once per tick by the session loop. Must never block.
pub trait InputPoller {
    /// Returns a pending command, or `None` immediately if no bound key is
    /// waiting.
    fn poll_command(&mut self) -> io::Result<Option<Command>>;
}

/// Polls crossterm's event queue with a zero timeout.
pub struct TerminalInput;

impl InputPoller for TerminalInput {
    fn poll_command(&mut self) -> io::Result<Option<Command>> {
        while crossterm::event::poll(Duration::ZERO)? {
            // Only react to presses; some platforms also deliver Release.
            if let Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                code,
                ..
            }) = crossterm::event::read()?
            {
                if let Some(command) = Command::from_key(code) {
                    return Ok(Some(command));
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bound_keys_case_insensitively() {
        for (ch, expected) in [
            ('m', Command::ToggleMirrorX),
            ('M', Command::ToggleMirrorX),
            ('n', Command::ToggleMirrorY),
            ('c', Command::CyclePalette),
            ('H', Command::ExportSnapshot),
            ('q', Command::Quit),
        ] {
            assert_eq!(Command::from_key(KeyCode::Char(ch)), Some(expected));
        }
        assert_eq!(Command::from_key(KeyCode::Esc), Some(Command::Quit));
    }

    #[test]
    fn ignores_unbound_keys() {
        assert_eq!(Command::from_key(KeyCode::Char('x')), None);
        assert_eq!(Command::from_key(KeyCode::Enter), None);
        assert_eq!(Command::from_key(KeyCode::Up), None);
    }
}
