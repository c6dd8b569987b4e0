//! Luminance quantization into glyphs and colors.
//!
//! A luminance sample in `[0, 255]` picks a bucket in a ramp: with a ramp of
//! length `n`, the bucket width is `256 / n` and the index is
//! `floor(sample / width)`, clamped to `n - 1` so that a full-bright sample
//! cannot fall past the last bucket. Glyph and color ramps are quantized
//! independently and may have different lengths.

use crate::rendering::cell::Cell;
use crate::rendering::color::AnsiColor;
use crate::rendering::grid::Grid;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RampError {
    #[error("a ramp must contain at least one entry")]
    Empty,
    #[error("a palette set must contain at least one ramp")]
    NoRamps,
}

/// Maps a sample to a bucket index in `[0, len - 1]`.
///
/// Deterministic, monotonic in `sample`, and in range for every sample
/// including 255.
#[inline]
pub fn bucket_index(sample: u8, len: usize) -> usize {
    debug_assert!(len >= 1);
    let step = 256.0 / len as f64;
    let idx = (sample as f64 / step) as usize;
    idx.min(len - 1)
}

/// Ordered glyphs from darkest to brightest representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    pub fn new(glyphs: Vec<char>) -> Result<Self, RampError> {
        if glyphs.is_empty() {
            return Err(RampError::Empty);
        }
        Ok(Self { glyphs })
    }

    /// The glyph representing the given luminance sample.
    pub fn glyph_for(&self, sample: u8) -> char {
        self.glyphs[bucket_index(sample, self.glyphs.len())]
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }
}

/// Ordered color ids from darkest to brightest representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorRamp {
    colors: Vec<AnsiColor>,
}

impl ColorRamp {
    pub fn new(colors: Vec<AnsiColor>) -> Result<Self, RampError> {
        if colors.is_empty() {
            return Err(RampError::Empty);
        }
        Ok(Self { colors })
    }

    /// Convenience constructor from raw ANSI codes.
    pub fn from_codes(codes: &[u8]) -> Result<Self, RampError> {
        Self::new(codes.iter().map(|&c| AnsiColor(c)).collect())
    }

    /// The color id representing the given luminance sample.
    pub fn color_for(&self, sample: u8) -> AnsiColor {
        self.colors[bucket_index(sample, self.colors.len())]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
}

/// An ordered, non-empty collection of color ramps. The session keeps an
/// index into it and cycles through with wraparound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteSet {
    ramps: Vec<ColorRamp>,
}

impl PaletteSet {
    pub fn new(ramps: Vec<ColorRamp>) -> Result<Self, RampError> {
        if ramps.is_empty() {
            return Err(RampError::NoRamps);
        }
        Ok(Self { ramps })
    }

    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    /// The ramp at `idx`. Callers must keep `idx` in range; the session
    /// maintains `0 <= palette_idx < len` as an invariant.
    pub fn ramp(&self, idx: usize) -> &ColorRamp {
        &self.ramps[idx]
    }

    /// The palette index following `idx`, wrapping around.
    pub fn next_index(&self, idx: usize) -> usize {
        (idx + 1) % self.ramps.len()
    }
}

/// Quantizes a grid of luminance samples into renderable cells.
pub fn cells_from_luminance(
    luma: &Grid<u8>,
    glyphs: &GlyphRamp,
    colors: &ColorRamp,
) -> Grid<Cell> {
    let mut grid = Grid::new(luma.width(), luma.height(), Cell::default());
    for (x, y, &sample) in luma.iter() {
        grid[(x, y)] = Cell {
            glyph: glyphs.glyph_for(sample),
            color: colors.color_for(sample),
        };
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_in_range_for_all_samples() {
        for len in 1..=16 {
            for sample in 0..=255u8 {
                let idx = bucket_index(sample, len);
                assert!(idx < len, "sample {sample} with len {len} gave {idx}");
            }
        }
    }

    #[test]
    fn index_is_monotonic() {
        for len in 1..=16 {
            let mut prev = 0;
            for sample in 0..=255u8 {
                let idx = bucket_index(sample, len);
                assert!(idx >= prev);
                prev = idx;
            }
        }
    }

    #[test]
    fn three_glyph_ramp_scenarios() {
        let ramp = GlyphRamp::new(vec![' ', '.', '#']).unwrap();
        assert_eq!(ramp.glyph_for(0), ' ');
        assert_eq!(ramp.glyph_for(130), '.');
        assert_eq!(ramp.glyph_for(255), '#');
    }

    #[test]
    fn full_bright_sample_hits_last_bucket() {
        // The classic off-by-one: 255 must clamp into index 2, not 3.
        assert_eq!(bucket_index(255, 3), 2);
        let ramp = ColorRamp::from_codes(&[90, 37, 97]).unwrap();
        assert_eq!(ramp.color_for(255), AnsiColor(97));
    }

    #[test]
    fn glyph_and_color_quantize_independently() {
        let glyphs = GlyphRamp::new(vec![' ', '#']).unwrap();
        let colors = ColorRamp::from_codes(&[90, 37, 97]).unwrap();
        // 140 is in the upper half for glyphs but the middle third for colors.
        assert_eq!(glyphs.glyph_for(140), '#');
        assert_eq!(colors.color_for(140), AnsiColor(37));
    }

    #[test]
    fn empty_ramps_are_rejected() {
        assert_eq!(GlyphRamp::new(vec![]).unwrap_err(), RampError::Empty);
        assert_eq!(ColorRamp::new(vec![]).unwrap_err(), RampError::Empty);
        assert_eq!(PaletteSet::new(vec![]).unwrap_err(), RampError::NoRamps);
    }

    #[test]
    fn palette_cycling_wraps() {
        let ramp = ColorRamp::from_codes(&[97]).unwrap();
        let set = PaletteSet::new(vec![ramp.clone(), ramp.clone(), ramp]).unwrap();
        let mut idx = 1;
        for _ in 0..set.len() {
            idx = set.next_index(idx);
        }
        assert_eq!(idx, 1);
    }

    #[test]
    fn cells_pair_glyph_and_color() {
        let glyphs = GlyphRamp::new(vec![' ', '.', '#']).unwrap();
        let colors = ColorRamp::from_codes(&[90, 37, 97]).unwrap();
        let mut luma = Grid::new(2, 1, 0u8);
        luma[(1, 0)] = 255;
        let cells = cells_from_luminance(&luma, &glyphs, &colors);
        assert_eq!(cells[(0, 0)], Cell::new(' ').with_color(AnsiColor(90)));
        assert_eq!(cells[(1, 0)], Cell::new('#').with_color(AnsiColor(97)));
    }
}
