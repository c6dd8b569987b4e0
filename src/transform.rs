//! Captured frame to luminance grid.
//!
//! One transformation per tick, in a fixed order: mirror flips first (on the
//! color frame, driven by the session's mirror flags), then luminance
//! conversion, then a nearest-neighbor downsample to the character grid
//! dimensions. Nearest-neighbor keeps hard edges hard and costs almost
//! nothing, which matters at one full resize per tick.

use crate::rendering::grid::Grid;
use image::imageops;
use image::imageops::FilterType;
use image::RgbImage;

/// Transforms a captured frame into a `rows x cols` grid of luminance
/// samples.
pub fn luminance_grid(
    mut frame: RgbImage,
    mirror_x: bool,
    mirror_y: bool,
    cols: u32,
    rows: u32,
) -> Grid<u8> {
    if mirror_x {
        imageops::flip_horizontal_in_place(&mut frame);
    }
    if mirror_y {
        imageops::flip_vertical_in_place(&mut frame);
    }

    let gray = imageops::grayscale(&frame);
    let small = imageops::resize(&gray, cols, rows, FilterType::Nearest);

    let mut grid = Grid::new(cols as usize, rows as usize, 0u8);
    for (x, y, pixel) in small.enumerate_pixels() {
        grid[(x as usize, y as usize)] = pixel.0[0];
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn two_tone_frame() -> RgbImage {
        // Left half black, right half white.
        RgbImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn converts_to_full_range_luminance() {
        let grid = luminance_grid(two_tone_frame(), false, false, 4, 2);
        assert_eq!(grid[(0, 0)], 0);
        assert_eq!(grid[(3, 0)], 255);
    }

    #[test]
    fn horizontal_mirror_swaps_columns() {
        let grid = luminance_grid(two_tone_frame(), true, false, 4, 2);
        assert_eq!(grid[(0, 0)], 255);
        assert_eq!(grid[(3, 0)], 0);
    }

    #[test]
    fn vertical_mirror_swaps_rows() {
        let frame = RgbImage::from_fn(2, 4, |_, y| {
            if y < 2 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let grid = luminance_grid(frame, false, true, 2, 4);
        assert_eq!(grid[(0, 0)], 255);
        assert_eq!(grid[(0, 3)], 0);
    }

    #[test]
    fn mirroring_is_involutive() {
        let mut frame = two_tone_frame();
        let original = frame.clone();
        imageops::flip_horizontal_in_place(&mut frame);
        imageops::flip_horizontal_in_place(&mut frame);
        assert_eq!(frame, original);
        imageops::flip_vertical_in_place(&mut frame);
        imageops::flip_vertical_in_place(&mut frame);
        assert_eq!(frame, original);
    }

    #[test]
    fn nearest_downsample_preserves_hard_edges() {
        let grid = luminance_grid(two_tone_frame(), false, false, 2, 1);
        // No interpolation: each cell is exactly one of the source values.
        assert_eq!(grid[(0, 0)], 0);
        assert_eq!(grid[(1, 0)], 255);
    }
}
