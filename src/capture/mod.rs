//! Capture sources: where frames come from.
//!
//! The session loop only knows the [`CaptureSource`] trait: pull the next RGB
//! frame, or learn that the stream is over. Concrete sources are resolved
//! from a [`SourceSpec`] by [`open_source`]:
//!
//! *   animated GIF files (frames pre-decoded up front),
//! *   a directory of image files, replayed in sorted order,
//! *   a single still image (one frame, then end of stream),
//! *   a webcam device index (requires the `webcam` feature).

use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod gif;
mod stills;
#[cfg(feature = "webcam")]
mod webcam;

pub use gif::GifSource;
pub use stills::{ImageDirSource, StillSource};
#[cfg(feature = "webcam")]
pub use webcam::WebcamSource;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// The identifier does not denote anything we can capture from. Fatal
    /// before the session loop starts.
    #[error("cannot open capture source {0}: {1}")]
    CannotOpen(String, String),

    #[error("failed to decode frame: {0}")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Identifier for a capture source: a device index or a filesystem path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    Device(u32),
    Path(PathBuf),
}

impl SourceSpec {
    /// Parses a command-line identifier. A bare non-negative integer denotes
    /// a device index, anything else a path.
    pub fn parse(s: &str) -> Self {
        match s.parse::<u32>() {
            Ok(idx) => SourceSpec::Device(idx),
            Err(_) => SourceSpec::Path(PathBuf::from(s)),
        }
    }

    /// Whether this identifier denotes a live device rather than a file.
    pub fn is_device(&self) -> bool {
        matches!(self, SourceSpec::Device(_))
    }
}

impl std::fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceSpec::Device(idx) => write!(f, "device {idx}"),
            SourceSpec::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A stream of frames. Dropping a source releases it.
pub trait CaptureSource {
    /// Pulls the next frame. `Ok(None)` signals end of stream; the session
    /// loop shuts down and does not retry.
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError>;

    /// The source's native frame rate, if it reports one.
    fn frame_rate(&self) -> Option<f64>;
}

impl std::fmt::Debug for dyn CaptureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CaptureSource")
    }
}

/// Resolves a [`SourceSpec`] to a concrete capture source.
pub fn open_source(spec: &SourceSpec) -> Result<Box<dyn CaptureSource>, CaptureError> {
    match spec {
        SourceSpec::Device(idx) => open_device(*idx),
        SourceSpec::Path(path) => open_path(path),
    }
}

#[cfg(feature = "webcam")]
fn open_device(idx: u32) -> Result<Box<dyn CaptureSource>, CaptureError> {
    Ok(Box::new(WebcamSource::open(idx)?))
}

#[cfg(not(feature = "webcam"))]
fn open_device(idx: u32) -> Result<Box<dyn CaptureSource>, CaptureError> {
    Err(CaptureError::CannotOpen(
        format!("device {idx}"),
        "built without the `webcam` feature".into(),
    ))
}

fn open_path(path: &Path) -> Result<Box<dyn CaptureSource>, CaptureError> {
    if !path.exists() {
        return Err(CaptureError::CannotOpen(
            path.display().to_string(),
            "no such file or directory".into(),
        ));
    }
    if path.is_dir() {
        return Ok(Box::new(ImageDirSource::open(path)?));
    }
    let is_gif = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"));
    if is_gif {
        Ok(Box::new(GifSource::open(path)?))
    } else {
        Ok(Box::new(StillSource::open(path)?))
    }
}
