//! Live webcam capture via nokhwa. Only built with the `webcam` feature.

use crate::capture::{CaptureError, CaptureSource};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

/// A live camera device. Frames are pulled at device rate; pacing never
/// skips a capture in best-effort mode.
pub struct WebcamSource {
    camera: Camera,
}

impl WebcamSource {
    pub fn open(index: u32) -> Result<Self, CaptureError> {
        let cannot_open =
            |e: nokhwa::NokhwaError| CaptureError::CannotOpen(format!("device {index}"), e.to_string());

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(cannot_open)?;
        camera.open_stream().map_err(cannot_open)?;
        Ok(Self { camera })
    }
}

impl CaptureSource for WebcamSource {
    fn read_frame(&mut self) -> Result<Option<RgbImage>, CaptureError> {
        // A device read error means the camera went away; treat it as end of
        // stream so the session shuts down cleanly.
        let Ok(frame) = self.camera.frame() else {
            return Ok(None);
        };
        match frame.decode_image::<RgbFormat>() {
            Ok(decoded) => Ok(Some(decoded)),
            Err(_) => Ok(None),
        }
    }

    fn frame_rate(&self) -> Option<f64> {
        let rate = self.camera.frame_rate();
        if rate == 0 {
            None
        } else {
            Some(rate as f64)
        }
    }
}

impl Drop for WebcamSource {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}
