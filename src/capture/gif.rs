//! Animated GIF playback source.

use crate::capture::{CaptureError, CaptureSource};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, RgbImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Plays the frames of an animated GIF once, at the rate implied by the
/// first frame's delay.
///
/// All frames are decoded up front. Clips that fit a terminal are small, and
/// pre-decoding keeps the per-tick cost flat, which matters for pacing.
pub struct GifSource {
    frames: Vec<RgbImage>,
    next: usize,
    frame_rate: Option<f64>,
}

impl GifSource {
    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let file = File::open(path)?;
        let decoder = GifDecoder::new(BufReader::new(file))
            .map_err(|e| CaptureError::CannotOpen(path.display().to_string(), e.to_string()))?;
        let frames = decoder.into_frames().collect_frames()?;

        let frame_rate = frames.first().and_then(|frame| {
            let (numer_ms, denom) = frame.delay().numer_denom_ms();
            if numer_ms == 0 || denom == 0 {
                None
            } else {
                Some(1000.0 * denom as f64 / numer_ms as f64)
            }
        });

        let frames = frames
            .into_iter()
            .map(|frame| DynamicImage::ImageRgba8(frame.into_buffer()).to_rgb8())
            .collect();

        Ok(Self {
            frames,
            next: 0,
            frame_rate,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl CaptureSource for GifSource {
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError> {
        let Some(frame) = self.frames.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        Ok(Some(frame.clone()))
    }

    fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }
}
