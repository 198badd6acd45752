//! WASM bindings for rotation and crop.

use crate::types::{to_js_error, JsRaster};
use splitter_core::transform::{self as core_transform, Rectangle, Rotation};
use wasm_bindgen::prelude::*;

/// Rotate an image clockwise by a multiple of 90 degrees.
///
/// Negative angles turn counter-clockwise (`-90` is the same as `270`).
/// 90 and 270 swap width and height.
///
/// # Errors
///
/// Returns an error if `degrees` is not a multiple of 90.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_image(image, 90);
/// console.log(`${rotated.width}x${rotated.height}`);
/// ```
#[wasm_bindgen]
pub fn rotate_image(image: &JsRaster, degrees: i32) -> Result<JsRaster, JsValue> {
    let rotation = Rotation::from_degrees(degrees).map_err(to_js_error)?;
    image.checked()?;
    Ok(rotate(image, rotation))
}

/// Crop an image in source pixel coordinates.
///
/// The rectangle is clamped to the image; partially outside regions are
/// trimmed rather than rejected.
///
/// # Errors
///
/// Returns an error if nothing of the rectangle lies inside the image.
#[wasm_bindgen]
pub fn crop_image(image: &JsRaster, x: f64, y: f64, width: f64, height: f64) -> Result<JsRaster, JsValue> {
    core_transform::apply_crop(image.checked()?, &Rectangle::new(x, y, width, height))
        .map(JsRaster::from_raster)
        .map_err(to_js_error)
}

/// Like [`crop_image`], but an unusable rectangle returns the whole image.
#[wasm_bindgen]
pub fn crop_image_or_source(
    image: &JsRaster,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<JsRaster, JsValue> {
    let rect = Rectangle::new(x, y, width, height);
    Ok(JsRaster::from_raster(core_transform::crop_or_source(image.checked()?, &rect)))
}

fn rotate(image: &JsRaster, rotation: Rotation) -> JsRaster {
    JsRaster::from_raster(core_transform::apply_rotation(image.raster(), rotation))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a simple test image.
    fn test_image(width: u32, height: u32) -> JsRaster {
        let pixels: Vec<u8> = (0..(width * height * 4) as usize)
            .map(|i| (i % 256) as u8)
            .collect();
        JsRaster::new(width, height, pixels)
    }

    #[test]
    fn test_rotation_no_change() {
        let img = test_image(100, 60);
        let result = rotate_image(&img, 0).unwrap();
        assert_eq!(result.width(), 100);
        assert_eq!(result.height(), 60);
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_rotation_90_degrees() {
        let img = test_image(100, 50);
        let result = rotate_image(&img, 90).unwrap();
        // 90-degree rotation swaps dimensions
        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 100);
    }

    #[test]
    fn test_rotation_full_turn_restores_pixels() {
        let img = test_image(7, 3);
        let turned = rotate(&rotate(&img, Rotation::Deg90), Rotation::Deg270);
        assert_eq!(turned.pixels(), img.pixels());
    }

    #[test]
    fn test_crop_clamps_to_image() {
        let img = test_image(1000, 800);
        let result = crop_image(&img, -10.0, 0.0, 2000.0, 500.0).unwrap();
        assert_eq!(result.width(), 1000);
        assert_eq!(result.height(), 500);
    }

    #[test]
    fn test_crop_region() {
        let img = test_image(100, 100);
        let result = crop_image(&img, 25.0, 25.0, 50.0, 50.0).unwrap();
        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 50);
    }

    #[test]
    fn test_crop_or_source_falls_back() {
        let img = test_image(40, 30);
        let result = crop_image_or_source(&img, 500.0, 0.0, 10.0, 10.0).unwrap();
        assert_eq!(result.width(), 40);
        assert_eq!(result.height(), 30);
    }
}

/// WASM-specific tests for error paths. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_rotation_rejects_odd_angle() {
        let img = JsRaster::new(2, 2, vec![0; 16]);
        assert!(rotate_image(&img, 45).is_err());
    }

    #[wasm_bindgen_test]
    fn test_crop_outside_image() {
        let img = JsRaster::new(10, 10, vec![0; 400]);
        assert!(crop_image(&img, 10.0, 0.0, 5.0, 5.0).is_err());
    }
}
