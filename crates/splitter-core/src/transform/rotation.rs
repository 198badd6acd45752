//! Quarter-turn image rotation.
//!
//! Rotations are restricted to exact multiples of 90° and are performed by
//! remapping pixel coordinates, so no interpolation happens and no corners
//! are ever exposed.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image we
//! compute the single source pixel that lands there. For a clockwise quarter
//! turn of a `w x h` source into an `h x w` destination:
//! ```text
//! src_x = dst_y
//! src_y = h - 1 - dst_x
//! ```

use serde::{Deserialize, Serialize};

use super::TransformError;
use crate::decode::{Raster, BYTES_PER_PIXEL};

/// A clockwise rotation by a whole number of quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Normalize an angle in degrees into `[0, 360)` and map it to a rotation.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::UnsupportedRotationAngle` when the angle is
    /// not a multiple of 90°.
    ///
    /// # Example
    ///
    /// ```
    /// use splitter_core::transform::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Deg270);
    /// assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Deg90);
    /// assert!(Rotation::from_degrees(45).is_err());
    /// ```
    pub fn from_degrees(degrees: i32) -> Result<Self, TransformError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(TransformError::UnsupportedRotationAngle(degrees)),
        }
    }

    /// The rotation in degrees, always one of 0, 90, 180, 270.
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// One quarter turn further clockwise.
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// One quarter turn counter-clockwise.
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg270,
            Rotation::Deg90 => Rotation::Deg0,
            Rotation::Deg180 => Rotation::Deg90,
            Rotation::Deg270 => Rotation::Deg180,
        }
    }

    /// Returns true for 90° and 270°, which swap width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Dimensions of a `width x height` image after this rotation.
    pub fn rotated_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = TransformError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Rotate an image clockwise about its center.
///
/// For 0° and 180° the output has the source dimensions; for 90° and 270°
/// width and height are swapped. The source is never modified.
///
/// # Example
///
/// ```ignore
/// use splitter_core::transform::{apply_rotation, Rotation};
///
/// let rotated = apply_rotation(&image, Rotation::Deg90);
/// assert_eq!((rotated.width, rotated.height), (image.height, image.width));
/// ```
pub fn apply_rotation(image: &Raster, rotation: Rotation) -> Raster {
    // Fast path: no rotation needed
    if rotation == Rotation::Deg0 {
        return image.clone();
    }

    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = rotation.rotated_dimensions(image.width, image.height);
    let (dst_w, dst_h) = (dst_w as usize, dst_h as usize);

    let mut output = vec![0u8; dst_w * dst_h * BYTES_PER_PIXEL];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (src_x, src_y) = match rotation {
                Rotation::Deg0 => (dst_x, dst_y),
                Rotation::Deg90 => (dst_y, src_h - 1 - dst_x),
                Rotation::Deg180 => (src_w - 1 - dst_x, src_h - 1 - dst_y),
                Rotation::Deg270 => (src_w - 1 - dst_y, dst_x),
            };

            let src_idx = (src_y * src_w + src_x) * BYTES_PER_PIXEL;
            let dst_idx = (dst_y * dst_w + dst_x) * BYTES_PER_PIXEL;

            output[dst_idx..dst_idx + BYTES_PER_PIXEL]
                .copy_from_slice(&image.pixels[src_idx..src_idx + BYTES_PER_PIXEL]);
        }
    }

    Raster {
        width: dst_w as u32,
        height: dst_h as u32,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where every pixel encodes its own position.
    fn test_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(x as u8);
                pixels.push(y as u8);
                pixels.push(((x + y) * 8) as u8);
                pixels.push(255);
            }
        }
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_from_degrees_canonical() {
        assert_eq!(Rotation::from_degrees(0).unwrap(), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(90).unwrap(), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(180).unwrap(), Rotation::Deg180);
        assert_eq!(Rotation::from_degrees(270).unwrap(), Rotation::Deg270);
    }

    #[test]
    fn test_from_degrees_normalizes() {
        assert_eq!(Rotation::from_degrees(360).unwrap(), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(-180).unwrap(), Rotation::Deg180);
        assert_eq!(Rotation::from_degrees(810).unwrap(), Rotation::Deg90);
    }

    #[test]
    fn test_from_degrees_rejects_non_quarter_turns() {
        for degrees in [1, 45, 89, -30, 359] {
            assert!(matches!(
                Rotation::from_degrees(degrees),
                Err(TransformError::UnsupportedRotationAngle(d)) if d == degrees
            ));
        }
    }

    #[test]
    fn test_step_rotation_wraps() {
        assert_eq!(Rotation::Deg270.rotate_cw(), Rotation::Deg0);
        assert_eq!(Rotation::Deg0.rotate_ccw(), Rotation::Deg270);
        assert_eq!(Rotation::Deg90.rotate_cw().rotate_ccw(), Rotation::Deg90);
    }

    #[test]
    fn test_no_rotation_is_identity() {
        let img = test_image(7, 4);
        let result = apply_rotation(&img, Rotation::Deg0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_rotation_90_swaps_dimensions() {
        let img = test_image(100, 50);
        let result = apply_rotation(&img, Rotation::Deg90);

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 100);
        assert_eq!(result.pixels.len(), 50 * 100 * 4);
    }

    #[test]
    fn test_rotation_180_keeps_dimensions() {
        let img = test_image(100, 50);
        let result = apply_rotation(&img, Rotation::Deg180);

        assert_eq!(result.width, 100);
        assert_eq!(result.height, 50);
    }

    #[test]
    fn test_rotation_90_is_clockwise() {
        // 3x2 source:
        //   (0,0) (1,0) (2,0)
        //   (0,1) (1,1) (2,1)
        // Clockwise quarter turn puts the bottom-left pixel at the top-left.
        let img = test_image(3, 2);
        let result = apply_rotation(&img, Rotation::Deg90);

        assert_eq!(result.pixel(0, 0)[..2], [0, 1]);
        assert_eq!(result.pixel(1, 0)[..2], [0, 0]);
        assert_eq!(result.pixel(0, 2)[..2], [2, 1]);
        assert_eq!(result.pixel(1, 2)[..2], [2, 0]);
    }

    #[test]
    fn test_rotation_matches_image_crate() {
        let img = test_image(5, 3);
        let rgba = img.to_rgba_image().unwrap();

        let cases = [
            (Rotation::Deg90, image::imageops::rotate90(&rgba)),
            (Rotation::Deg180, image::imageops::rotate180(&rgba)),
            (Rotation::Deg270, image::imageops::rotate270(&rgba)),
        ];

        for (rotation, expected) in cases {
            let result = apply_rotation(&img, rotation);
            assert_eq!(result, Raster::from_rgba_image(expected), "{rotation:?}");
        }
    }

    #[test]
    fn test_rotation_90_then_270_restores_image() {
        let img = test_image(9, 4);
        let there = apply_rotation(&img, Rotation::Deg90);
        let back = apply_rotation(&there, Rotation::Deg270);
        assert_eq!(back, img);
    }

    #[test]
    fn test_rotation_does_not_mutate_source() {
        let img = test_image(6, 3);
        let copy = img.clone();
        let _ = apply_rotation(&img, Rotation::Deg270);
        assert_eq!(img, copy);
    }

    #[test]
    fn test_single_pixel_rotation() {
        let img = Raster::filled(1, 1, [9, 8, 7, 6]);
        for rotation in [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
            assert_eq!(apply_rotation(&img, rotation), img);
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
