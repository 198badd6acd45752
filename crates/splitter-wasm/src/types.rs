//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core splitter
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use splitter_core::decode::{FilterType, Raster, BYTES_PER_PIXEL};
use splitter_core::slice::Slice;
use splitter_core::SplitterConfig;
use wasm_bindgen::prelude::*;

/// An RGBA image held in WASM memory.
///
/// # Memory Management
///
/// The pixel data stays in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`, which is what `ImageData` needs for drawing to a canvas.
///
/// The `free()` method can be called to explicitly release WASM memory, but
/// this is optional as wasm-bindgen's finalizer will handle cleanup.
#[wasm_bindgen]
pub struct JsRaster {
    raster: Raster,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a raster from dimensions and RGBA pixel data (4 bytes per pixel).
    ///
    /// The buffer length is not checked here; operations on a mismatched
    /// raster return an error instead.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            raster: Raster {
                width,
                height,
                pixels,
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.raster.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.raster.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.raster.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.raster.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRaster {
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self { raster }
    }

    pub(crate) fn raster(&self) -> &Raster {
        &self.raster
    }

    /// The raster, if its buffer holds exactly `width * height * 4` bytes.
    pub(crate) fn checked(&self) -> Result<&Raster, JsValue> {
        let expected = self.raster.width as usize * self.raster.height as usize * BYTES_PER_PIXEL;
        if self.raster.is_empty() || self.raster.pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "Invalid {}x{} image: expected {expected} pixel bytes, got {}",
                self.raster.width,
                self.raster.height,
                self.raster.pixels.len()
            )));
        }
        Ok(&self.raster)
    }
}

/// One slice of a split, with its row-major position in the layout.
#[wasm_bindgen]
pub struct JsSlice {
    index: u32,
    raster: Raster,
}

#[wasm_bindgen]
impl JsSlice {
    /// Position in the layout, `row * cols + col`.
    #[wasm_bindgen(getter)]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.raster.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.raster.height
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.raster.pixels.clone()
    }

    /// Move the pixels out into a standalone image.
    pub fn into_raster(self) -> JsRaster {
        JsRaster::from_raster(self.raster)
    }
}

impl From<Slice> for JsSlice {
    fn from(slice: Slice) -> Self {
        Self {
            index: slice.index,
            raster: slice.raster,
        }
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Read session settings from a JS object; `undefined` or `null` means defaults.
pub(crate) fn settings_from_js(value: JsValue) -> Result<SplitterConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(SplitterConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Error conversion used by every binding.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_creation() {
        let img = JsRaster::new(100, 50, vec![0u8; 100 * 50 * 4]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_js_raster_pixels() {
        let pixels = vec![255u8, 128, 64, 255, 32, 16, 8, 0];
        let img = JsRaster::new(2, 1, pixels.clone());
        assert_eq!(img.pixels(), pixels);
        assert_eq!(img.raster().pixel(1, 0), [32, 16, 8, 0]);
    }

    #[test]
    fn test_js_slice_from_core() {
        let slice = Slice {
            index: 3,
            raster: Raster::filled(4, 2, [1, 2, 3, 4]),
        };
        let js = JsSlice::from(slice);
        assert_eq!(js.index(), 3);
        assert_eq!((js.width(), js.height()), (4, 2));

        let raster = js.into_raster();
        assert_eq!(raster.byte_length(), 32);
    }

    #[test]
    fn test_filter_from_u8() {
        assert!(matches!(filter_from_u8(0), FilterType::Nearest));
        assert!(matches!(filter_from_u8(1), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(2), FilterType::Lanczos3));
        // Unknown values default to Bilinear
        assert!(matches!(filter_from_u8(3), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(255), FilterType::Bilinear));
    }
}
