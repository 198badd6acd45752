//! Image resizing for slice output and preview generation.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `Raster` instances without modifying the input.

use super::{DecodeError, FilterType, Raster};

/// Resize a raster to exact dimensions, stretching if the aspect differs.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared dimensions.
pub fn resize(
    image: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image
        .as_image_view()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to view raster".to_string()))?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(Raster::from_rgba_image(resized))
}

/// Resize a raster to fit within a maximum edge length while preserving
/// aspect ratio. Rasters that already fit are returned unchanged.
pub fn resize_to_fit(
    image: &Raster,
    max_edge: u32,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(image.width, image.height, max_edge);

    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
pub(crate) fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}
