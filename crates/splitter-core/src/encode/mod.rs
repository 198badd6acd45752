//! Slice encoding for download.
//!
//! This module provides functionality for:
//! - Encoding rasters to JPEG, PNG or WebP
//! - Encoding a batch of slices with independent per-slice results
//! - Naming output files after the uploaded original
//!
//! # Examples
//!
//! ```ignore
//! use splitter_core::decode::ImageFormat;
//! use splitter_core::encode::{encode, EncodeOptions, SliceNaming};
//!
//! let bytes = encode(&slice.raster, ImageFormat::Png, &EncodeOptions::default())?;
//! let name = SliceNaming::from_file_name("photo.png").file_name(slice.index);
//! assert_eq!(name, "photo_1.png");
//! ```

mod codec;
mod naming;

use thiserror::Error;

pub use codec::{encode, encode_slices, EncodeOptions, EncodedSlice};
pub use naming::SliceNaming;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the raster dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: &'static str, reason: String },
}
