//! Splitter WASM - WebAssembly bindings for the image splitter
//!
//! This crate exposes the splitter-core functionality to JavaScript.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and slices
//! - `decode` - Upload validation, decoding and preview sizing
//! - `transform` - Rotation and crop
//! - `crop_box` - Interactive crop box driven by pointer gestures
//! - `layout` - Grid layout, presets and ratio helpers
//! - `split` - The full rotate/crop/slice/encode pipeline
//! - `encode` - JPEG/PNG/WebP encoding and download names
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, split_and_encode_image } from '@splitter/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const files = split_and_encode_image(image, request, file.type, file.name, undefined);
//! ```

use wasm_bindgen::prelude::*;

mod crop_box;
mod decode;
mod encode;
mod layout;
mod logger;
mod split;
mod transform;
mod types;

// Re-export public types
pub use crop_box::JsCropBox;
pub use decode::{decode_image, detect_mime, preview_size, resize_to_fit, validate_upload};
pub use encode::{encode_image, slice_file_name};
pub use layout::{
    calculate_grid, classify_orientation, composite_ratio, preset_ratio, recommended_layout,
    supported_counts,
};
pub use split::{split_and_encode_image, split_image};
pub use transform::{crop_image, crop_image_or_source, rotate_image};
pub use types::{JsRaster, JsSlice};

/// Initialize the WASM module (called automatically on load).
///
/// Routes core log output to the browser console: `debug` and up in debug
/// builds, `info` and up in release builds.
#[wasm_bindgen(start)]
pub fn init() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logger::install(level);
}

/// Change the console log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::install(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
