//! Image decoding WASM bindings.
//!
//! This module exposes upload validation, decoding and preview sizing to
//! JavaScript.
//!
//! # Functions
//!
//! - [`validate_upload`] - Check MIME type and size before reading the file
//! - [`decode_image`] - Decode JPEG, PNG or WebP bytes with EXIF orientation applied
//! - [`detect_mime`] - Sniff the format from the file's magic bytes
//! - [`resize_to_fit`] - Downscale for the preview canvas
//! - [`preview_size`] - Canvas size for a rotated preview
//!
//! # Example
//!
//! ```typescript
//! import { validate_upload, decode_image, preview_size } from '@splitter/wasm';
//!
//! const mime = validate_upload(file.type, file.size, undefined);
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const [w, h] = preview_size(image.width, image.height, 0);
//! ```

use crate::types::{filter_from_u8, settings_from_js, to_js_error, JsRaster};
use splitter_core::crop_box::{self, PREVIEW_MAX_EDGE};
use splitter_core::decode;
use splitter_core::transform::Rotation;
use wasm_bindgen::prelude::*;

/// Check an upload before decoding it.
///
/// Returns the canonical MIME type (`image/jpg` becomes `image/jpeg`).
///
/// # Errors
///
/// Returns an error for unsupported types or files over the size limit in
/// `settings.maxUploadBytes` (10 MB by default).
#[wasm_bindgen]
pub fn validate_upload(mime: &str, byte_length: f64, settings: JsValue) -> Result<String, JsValue> {
    let settings = settings_from_js(settings)?;
    decode::validate_upload(mime, byte_length.max(0.0) as u64, &settings)
        .map(|format| format.mime().to_string())
        .map_err(to_js_error)
}

/// Decode an image file into RGBA pixels.
///
/// EXIF orientation is applied, so the result matches what an `<img>` shows.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(to_js_error)
}

/// MIME type sniffed from the file header, if it is a supported format.
#[wasm_bindgen]
pub fn detect_mime(bytes: &[u8]) -> Option<String> {
    decode::detect_format(bytes).map(|format| format.mime().to_string())
}

/// Resize an image to fit within `max_edge`, preserving aspect ratio.
///
/// Images already within the limit are returned unchanged. See
/// [`crate::types::filter_from_u8`] for filter values.
#[wasm_bindgen]
pub fn resize_to_fit(image: &JsRaster, max_edge: u32, filter: u8) -> Result<JsRaster, JsValue> {
    decode::resize_to_fit(image.checked()?, max_edge, filter_from_u8(filter))
        .map(JsRaster::from_raster)
        .map_err(to_js_error)
}

/// Preview canvas `[width, height]` for an image shown at `rotation_degrees`.
///
/// The longer edge is capped at 500 px. Quarter turns swap the result.
///
/// # Errors
///
/// Returns an error if `rotation_degrees` is not a multiple of 90.
#[wasm_bindgen]
pub fn preview_size(width: u32, height: u32, rotation_degrees: i32) -> Result<Vec<u32>, JsValue> {
    let rotation = Rotation::from_degrees(rotation_degrees).map_err(to_js_error)?;
    let (w, h) = crop_box::preview_size((width, height), PREVIEW_MAX_EDGE, rotation);
    Ok(vec![w, h])
}
