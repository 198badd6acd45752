//! Image transformation operations: rotation and cropping.
//!
//! These run before slicing, in this order:
//! 1. Rotation (quarter turns only)
//! 2. Crop
//!
//! # Coordinate System
//!
//! - Rotation is clockwise, in multiples of 90°
//! - Crop coordinates are source-image pixels, after rotation
//! - Origin is the top-left corner

mod crop;
mod rotation;

use thiserror::Error;

pub use crop::{apply_crop, crop_or_source, PixelRect, Rectangle};
pub use rotation::{apply_rotation, Rotation};

/// Errors from rotation and crop requests.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The requested crop clamps to an empty region.
    #[error(
        "Invalid crop region ({}, {}, {}x{}) for a {source_width}x{source_height} image",
        .rect.x, .rect.y, .rect.width, .rect.height
    )]
    InvalidCropRegion {
        rect: Rectangle,
        source_width: u32,
        source_height: u32,
    },

    /// The angle is not a multiple of 90°.
    #[error("Unsupported rotation angle: {0}° (must be a multiple of 90)")]
    UnsupportedRotationAngle(i32),
}
