//! Startup configuration: CLI arguments, optional TOML overrides, and the
//! built-in ramps and palettes.

use crate::capture::SourceSpec;
use crate::pacing::PlayMode;
use crate::quantize::{ColorRamp, GlyphRamp, PaletteSet, RampError};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// The glyph ramp used when no charset or config override is given,
/// darkest to brightest.
pub const DEFAULT_GLYPH_RAMP: &[char] = &[' ', '`', '.', '~', '+', '*', 'o', 'O', '0', '#', '@'];

/// The built-in palette sets: ANSI code ramps, darkest to brightest.
pub fn default_palette_codes() -> Vec<Vec<u8>> {
    vec![
        vec![90, 37, 97],
        vec![32, 92, 97],
        vec![33, 93],
        vec![34, 36, 94, 96],
        (30..38).collect(),
        (90..98).collect(),
    ]
}

#[derive(Parser, Debug)]
#[command(
    name = "asciicam",
    version,
    about = "Play a video stream as colored ASCII art in the terminal"
)]
pub struct Cli {
    /// Capture source: a device index like `0`, or a path to a gif, still
    /// image, or directory of frames.
    pub source: String,

    /// Cap the frame rate. Defaults to the source's reported rate.
    #[arg(long)]
    pub fps: Option<f64>,

    /// Pacing policy. Defaults to `realtime` for devices, `video` for files.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Built-in glyph charset.
    #[arg(long, value_enum, default_value = "default")]
    pub charset: Charset,

    /// Initial palette index.
    #[arg(long, default_value_t = 0)]
    pub palette: usize,

    /// Where snapshot exports are written (overwritten on each export).
    #[arg(long, default_value = "ascii_frame.html")]
    pub export_path: PathBuf,

    /// TOML file overriding the glyph ramp and palette sets.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grid width in columns. Defaults to the terminal width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Grid height in rows. Defaults to the terminal height.
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Pace to the target rate, sleeping between frames.
    Video,
    /// Never sleep; render as fast as frames arrive.
    Realtime,
}

impl From<ModeArg> for PlayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Video => PlayMode::WaitToTarget,
            ModeArg::Realtime => PlayMode::BestEffort,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    /// The full eleven-glyph ramp.
    Default,
    /// Unicode block shades.
    Blocks,
    /// Space, dot, hash.
    Minimal,
}

impl Charset {
    fn glyphs(self) -> Vec<char> {
        match self {
            Charset::Default => DEFAULT_GLYPH_RAMP.to_vec(),
            Charset::Blocks => vec![' ', '░', '▒', '▓', '█'],
            Charset::Minimal => vec![' ', '.', '#'],
        }
    }
}

/// Optional TOML overrides. Missing fields keep their built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    /// Glyph ramp as a string, darkest to brightest.
    pub glyph_ramp: Option<String>,
    /// Palette sets as lists of ANSI codes, darkest to brightest.
    pub palettes: Option<Vec<Vec<u8>>>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("could not parse config file {0}: {1}")]
    Parse(String, #[source] toml::de::Error),

    #[error(transparent)]
    Ramp(#[from] RampError),

    #[error("palette index {index} out of range: only {count} palettes configured")]
    PaletteOutOfRange { index: usize, count: usize },

    #[error("could not query the terminal size: {0}")]
    TerminalSize(#[source] std::io::Error),
}

/// Fully resolved startup settings, consumed by `main` to assemble the
/// session.
#[derive(Debug)]
pub struct Settings {
    pub spec: SourceSpec,
    pub glyphs: GlyphRamp,
    pub palettes: PaletteSet,
    pub palette_idx: usize,
    pub mode: PlayMode,
    pub max_fps: Option<f64>,
    pub export_path: PathBuf,
    pub cols: u32,
    pub rows: u32,
}

impl Cli {
    /// Resolves the arguments against the terminal's current size.
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let (term_cols, term_rows) =
            crossterm::terminal::size().map_err(ConfigError::TerminalSize)?;
        self.into_settings_with_size(term_cols as u32, term_rows as u32)
    }

    fn into_settings_with_size(self, term_cols: u32, term_rows: u32) -> Result<Settings, ConfigError> {
        let spec = SourceSpec::parse(&self.source);

        let file = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
                toml::from_str(&text)
                    .map_err(|e| ConfigError::Parse(path.display().to_string(), e))?
            }
            None => ConfigFile::default(),
        };

        let glyphs = match file.glyph_ramp {
            Some(ramp) => GlyphRamp::new(ramp.chars().collect())?,
            None => GlyphRamp::new(self.charset.glyphs())?,
        };

        let palette_codes = file.palettes.unwrap_or_else(default_palette_codes);
        let ramps = palette_codes
            .iter()
            .map(|codes| ColorRamp::from_codes(codes))
            .collect::<Result<Vec<_>, _>>()?;
        let palettes = PaletteSet::new(ramps)?;

        if self.palette >= palettes.len() {
            return Err(ConfigError::PaletteOutOfRange {
                index: self.palette,
                count: palettes.len(),
            });
        }

        // Live devices favor latency, files favor playback timing.
        let mode = match self.mode {
            Some(mode) => mode.into(),
            None if spec.is_device() => PlayMode::BestEffort,
            None => PlayMode::WaitToTarget,
        };

        Ok(Settings {
            spec,
            glyphs,
            palettes,
            palette_idx: self.palette,
            mode,
            max_fps: self.fps,
            export_path: self.export_path,
            cols: self.width.unwrap_or(term_cols).max(1),
            rows: self.height.unwrap_or(term_rows).max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("asciicam").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_resolve_for_a_file_source() {
        let settings = cli(&["clip.gif"]).into_settings_with_size(80, 24).unwrap();
        assert_eq!(settings.spec, SourceSpec::parse("clip.gif"));
        assert_eq!(settings.mode, PlayMode::WaitToTarget);
        assert_eq!(settings.glyphs.len(), DEFAULT_GLYPH_RAMP.len());
        assert_eq!(settings.palettes.len(), 6);
        assert_eq!(settings.palette_idx, 0);
        assert_eq!((settings.cols, settings.rows), (80, 24));
        assert_eq!(settings.export_path, PathBuf::from("ascii_frame.html"));
    }

    #[test]
    fn devices_default_to_best_effort() {
        let settings = cli(&["0"]).into_settings_with_size(80, 24).unwrap();
        assert_eq!(settings.spec, SourceSpec::Device(0));
        assert_eq!(settings.mode, PlayMode::BestEffort);
    }

    #[test]
    fn explicit_mode_wins_over_source_kind() {
        let settings = cli(&["0", "--mode", "video"])
            .into_settings_with_size(80, 24)
            .unwrap();
        assert_eq!(settings.mode, PlayMode::WaitToTarget);
    }

    #[test]
    fn size_overrides_replace_the_terminal_size() {
        let settings = cli(&["clip.gif", "--width", "40", "--height", "12"])
            .into_settings_with_size(80, 24)
            .unwrap();
        assert_eq!((settings.cols, settings.rows), (40, 12));
    }

    #[test]
    fn out_of_range_palette_is_rejected() {
        let err = cli(&["clip.gif", "--palette", "6"])
            .into_settings_with_size(80, 24)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PaletteOutOfRange { index: 6, count: 6 }
        ));
    }

    #[test]
    fn config_file_overrides_ramp_and_palettes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asciicam.toml");
        std::fs::write(&path, "glyph_ramp = \" .#\"\npalettes = [[90, 97]]\n").unwrap();

        let settings = cli(&["clip.gif", "--config", path.to_str().unwrap()])
            .into_settings_with_size(80, 24)
            .unwrap();
        assert_eq!(settings.glyphs.len(), 3);
        assert_eq!(settings.palettes.len(), 1);
    }

    #[test]
    fn empty_config_ramp_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asciicam.toml");
        std::fs::write(&path, "glyph_ramp = \"\"\n").unwrap();

        let err = cli(&["clip.gif", "--config", path.to_str().unwrap()])
            .into_settings_with_size(80, 24)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Ramp(RampError::Empty)));
    }
}
