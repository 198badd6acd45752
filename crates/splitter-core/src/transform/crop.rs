//! Rectangular crop extraction.
//!
//! Crop requests arrive in source-image pixel coordinates as real numbers
//! (they come from a drag-to-resize box scaled up from screen space) and are
//! clamped to whole pixels inside the source before any copy happens.
//!
//! # Clamping
//!
//! - origin: `max(0, floor(v))`
//! - size: `floor(min(requested, source_dim - origin))`, at least 1
//! - an origin at or past the right/bottom edge is `InvalidCropRegion`

use serde::{Deserialize, Serialize};

use super::TransformError;
use crate::decode::{Raster, BYTES_PER_PIXEL};

/// A rectangle in real-valued pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if any coordinate differs from `other` by at least `tolerance`.
    pub fn differs_from(&self, other: &Rectangle, tolerance: f64) -> bool {
        (self.x - other.x).abs() >= tolerance
            || (self.y - other.y).abs() >= tolerance
            || (self.width - other.width).abs() >= tolerance
            || (self.height - other.height).abs() >= tolerance
    }

    /// Clamp to whole pixels inside a `source_width x source_height` image.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidCropRegion` if a coordinate is not
    /// finite or the origin lies at or beyond the source bounds.
    pub fn clamp_to(&self, source_width: u32, source_height: u32) -> Result<PixelRect, TransformError> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());

        if !finite || source_width == 0 || source_height == 0 {
            return Err(self.invalid(source_width, source_height));
        }

        let x = self.x.max(0.0).floor();
        let y = self.y.max(0.0).floor();

        if x >= source_width as f64 || y >= source_height as f64 {
            return Err(self.invalid(source_width, source_height));
        }

        let width = self.width.min(source_width as f64 - x).floor().max(1.0);
        let height = self.height.min(source_height as f64 - y).floor().max(1.0);

        Ok(PixelRect {
            x: x as u32,
            y: y as u32,
            width: width as u32,
            height: height as u32,
        })
    }

    fn invalid(&self, source_width: u32, source_height: u32) -> TransformError {
        TransformError::InvalidCropRegion {
            rect: *self,
            source_width,
            source_height,
        }
    }
}

/// A rectangle in whole pixels, guaranteed non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<PixelRect> for Rectangle {
    fn from(rect: PixelRect) -> Self {
        Rectangle::new(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        )
    }
}

/// Copy a region of an image into a new raster. No scaling is applied.
///
/// # Errors
///
/// Returns `TransformError::InvalidCropRegion` when the rectangle clamps to
/// nothing. Callers in the split pipeline use [`crop_or_source`] instead.
///
/// # Example
///
/// ```ignore
/// use splitter_core::transform::{apply_crop, Rectangle};
///
/// let rect = Rectangle::new(-10.0, 0.0, 2000.0, 500.0);
/// let cropped = apply_crop(&image_1000x800, &rect)?;
/// assert_eq!((cropped.width, cropped.height), (1000, 500));
/// ```
pub fn apply_crop(image: &Raster, rect: &Rectangle) -> Result<Raster, TransformError> {
    let region = rect.clamp_to(image.width, image.height)?;
    Ok(extract_region(image, region))
}

/// Crop, falling back to a copy of the untouched source when the rectangle
/// is unusable. A bad crop never aborts a split.
pub fn crop_or_source(image: &Raster, rect: &Rectangle) -> Raster {
    match apply_crop(image, rect) {
        Ok(cropped) => cropped,
        Err(err) => {
            log::warn!("{err}; using the full image instead");
            image.clone()
        }
    }
}

/// Copy an already-clamped region, row by row.
fn extract_region(image: &Raster, region: PixelRect) -> Raster {
    // Fast path: full crop returns a clone
    if region.x == 0
        && region.y == 0
        && region.width == image.width
        && region.height == image.height
    {
        return image.clone();
    }

    let src_stride = image.width as usize * BYTES_PER_PIXEL;
    let row_bytes = region.width as usize * BYTES_PER_PIXEL;
    let mut output = Vec::with_capacity(row_bytes * region.height as usize);

    for y in region.y..region.y + region.height {
        let start = y as usize * src_stride + region.x as usize * BYTES_PER_PIXEL;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Raster {
        width: region.width,
        height: region.height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
