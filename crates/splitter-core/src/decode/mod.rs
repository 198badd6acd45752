//! Image decoding pipeline for the splitter.
//!
//! This module provides functionality for:
//! - Validating uploads (MIME type and size limit)
//! - Decoding JPEG, PNG and WebP images with EXIF orientation applied
//! - Resizing rasters for slice output and previews
//!
//! # Examples
//!
//! ```ignore
//! use splitter_core::decode::{decode_image, validate_upload};
//!
//! validate_upload("image/png", bytes.len() as u64, &config)?;
//! let raster = decode_image(&bytes)?;
//! println!("Decoded {}x{} image", raster.width, raster.height);
//! ```

mod loader;
mod resize;
mod types;

pub use loader::{decode_image, decode_image_no_orientation, detect_format, validate_upload};
pub use resize::{resize, resize_to_fit};
pub(crate) use resize::calculate_fit_dimensions;
pub use types::{DecodeError, FilterType, ImageFormat, Raster, BYTES_PER_PIXEL};
