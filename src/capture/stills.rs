//! Still-image sources: a single file, or a directory replayed as a clip.

use crate::capture::{CaptureError, CaptureSource};
use image::RgbImage;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp", "tiff", "tga"];

/// A single image: yields exactly one frame, then end of stream.
pub struct StillSource {
    frame: Option<RgbImage>,
}

impl StillSource {
    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let image = image::open(path)
            .map_err(|e| CaptureError::CannotOpen(path.display().to_string(), e.to_string()))?;
        Ok(Self {
            frame: Some(image.to_rgb8()),
        })
    }
}

impl CaptureSource for StillSource {
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError> {
        Ok(self.frame.take())
    }

    fn frame_rate(&self) -> Option<f64> {
        None
    }
}

/// A directory of image files, decoded lazily and replayed in sorted order.
/// Useful for pre-extracted frame dumps.
#[derive(Debug)]
pub struct ImageDirSource {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageDirSource {
    pub fn open(dir: &Path) -> Result<Self, CaptureError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(CaptureError::CannotOpen(
                dir.display().to_string(),
                "directory contains no image files".into(),
            ));
        }
        Ok(Self { paths, next: 0 })
    }

    pub fn frame_count(&self) -> usize {
        self.paths.len()
    }
}

impl CaptureSource for ImageDirSource {
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        // A frame that fails to decode is fatal for the stream; a structurally
        // bad file will not get better on retry.
        let image = image::open(path)?;
        Ok(Some(image.to_rgb8()))
    }

    fn frame_rate(&self) -> Option<f64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn still_yields_one_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let mut source = StillSource::open(&path).unwrap();
        assert!(source.read_frame().unwrap().is_some());
        assert!(source.read_frame().unwrap().is_none());
        assert_eq!(source.frame_rate(), None);
    }

    #[test]
    fn dir_replays_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        for (name, shade) in [("b.png", 200u8), ("a.png", 100u8)] {
            RgbImage::from_pixel(2, 2, Rgb([shade, shade, shade]))
                .save(dir.path().join(name))
                .unwrap();
        }

        let mut source = ImageDirSource::open(dir.path()).unwrap();
        assert_eq!(source.frame_count(), 2);
        let first = source.read_frame().unwrap().unwrap();
        assert_eq!(first.get_pixel(0, 0).0[0], 100);
        let second = source.read_frame().unwrap().unwrap();
        assert_eq!(second.get_pixel(0, 0).0[0], 200);
        assert!(source.read_frame().unwrap().is_none());
    }

    #[test]
    fn empty_dir_cannot_be_opened() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageDirSource::open(dir.path()).unwrap_err();
        assert!(matches!(err, CaptureError::CannotOpen(_, _)));
    }
}
