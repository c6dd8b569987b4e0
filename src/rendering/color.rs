//! The sixteen-color ANSI palette used for cell coloring.

/// An abstract color id for a cell: one of the sixteen standard ANSI
/// foreground codes (30..=37 normal, 90..=97 bright).
///
/// The id travels with the cell from quantization all the way to export, so
/// nothing downstream ever has to parse an escape sequence to recover it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnsiColor(pub u8);

/// Hex color used for ids outside the sixteen-entry table.
pub const FALLBACK_HEX: &str = "#FFFFFF";

impl AnsiColor {
    /// Returns the crossterm color for this id, or the terminal default if
    /// the id is not one of the sixteen known codes.
    pub fn to_crossterm(self) -> crossterm::style::Color {
        use crossterm::style::Color;
        match self.0 {
            30 => Color::Black,
            31 => Color::DarkRed,
            32 => Color::DarkGreen,
            33 => Color::DarkYellow,
            34 => Color::DarkBlue,
            35 => Color::DarkMagenta,
            36 => Color::DarkCyan,
            37 => Color::Grey,
            90 => Color::DarkGrey,
            91 => Color::Red,
            92 => Color::Green,
            93 => Color::Yellow,
            94 => Color::Blue,
            95 => Color::Magenta,
            96 => Color::Cyan,
            97 => Color::White,
            _ => Color::Reset,
        }
    }

    /// Returns the display hex color for this id, if it is a known code.
    pub fn hex(self) -> Option<&'static str> {
        let hex = match self.0 {
            30 => "#000000",
            31 => "#AA0000",
            32 => "#00AA00",
            33 => "#AA5500",
            34 => "#0000AA",
            35 => "#AA00AA",
            36 => "#00AAAA",
            37 => "#AAAAAA",
            90 => "#555555",
            91 => "#FF5555",
            92 => "#55FF55",
            93 => "#FFFF55",
            94 => "#5555FF",
            95 => "#FF55FF",
            96 => "#55FFFF",
            97 => "#FFFFFF",
            _ => return None,
        };
        Some(hex)
    }

    /// Like [`Self::hex`], but unknown ids degrade to [`FALLBACK_HEX`].
    pub fn hex_or_fallback(self) -> &'static str {
        self.hex().unwrap_or(FALLBACK_HEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_hex_entries() {
        for code in (30..=37).chain(90..=97) {
            assert!(AnsiColor(code).hex().is_some(), "missing entry for {code}");
        }
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(AnsiColor(12).hex(), None);
        assert_eq!(AnsiColor(12).hex_or_fallback(), FALLBACK_HEX);
        assert_eq!(AnsiColor(12).to_crossterm(), crossterm::style::Color::Reset);
    }
}
