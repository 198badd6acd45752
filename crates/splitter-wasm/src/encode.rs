//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Encode a JsRaster as JPEG, PNG or WebP
//! - [`slice_file_name`] - Download name for a slice
//!
//! # Example
//!
//! ```typescript
//! import { encode_image, slice_file_name } from '@splitter/wasm';
//!
//! const bytes = encode_image(slice.into_raster(), file.type, 92);
//! const name = slice_file_name(file.name, slice.index); // "photo_1.jpg"
//! ```

use crate::types::{to_js_error, JsRaster};
use splitter_core::decode::ImageFormat;
use splitter_core::encode::{self, EncodeOptions, SliceNaming};
use wasm_bindgen::prelude::*;

/// Encode an image for download.
///
/// # Arguments
///
/// * `image` - RGBA image to encode
/// * `mime` - `image/jpeg`, `image/png` or `image/webp`
/// * `quality` - JPEG quality (1-100); defaults to 100, ignored for PNG/WebP
///
/// # Errors
///
/// Returns an error for an unsupported MIME type or if encoding fails.
///
/// # Example
///
/// ```typescript
/// const png = encode_image(image, "image/png", undefined);
/// const blob = new Blob([png], { type: "image/png" });
/// ```
#[wasm_bindgen]
pub fn encode_image(image: &JsRaster, mime: &str, quality: Option<u8>) -> Result<Vec<u8>, JsValue> {
    let format = ImageFormat::from_mime(mime)
        .ok_or_else(|| JsValue::from_str(&format!("Unsupported output type: {mime}")))?;
    encode::encode(image.raster(), format, &options(quality)).map_err(to_js_error)
}

/// Download name for the slice at `index`: `photo.jpg` -> `photo_{index+1}.jpg`.
#[wasm_bindgen]
pub fn slice_file_name(original_name: &str, index: u32) -> String {
    SliceNaming::from_file_name(original_name).file_name(index)
}

fn options(quality: Option<u8>) -> EncodeOptions {
    match quality {
        Some(jpeg_quality) => EncodeOptions { jpeg_quality },
        None => EncodeOptions::default(),
    }
}
