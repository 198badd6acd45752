//! Upload validation and decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, ImageFormat, Raster};
use crate::config::SplitterConfig;

/// Check an upload's declared MIME type and size before decoding it.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedType` for anything other than JPEG, PNG
/// or WebP, and `DecodeError::FileTooLarge` when `byte_len` exceeds
/// `config.max_upload_bytes`.
pub fn validate_upload(
    mime: &str,
    byte_len: u64,
    config: &SplitterConfig,
) -> Result<ImageFormat, DecodeError> {
    let format =
        ImageFormat::from_mime(mime).ok_or_else(|| DecodeError::UnsupportedType(mime.to_string()))?;

    if byte_len > config.max_upload_bytes {
        return Err(DecodeError::FileTooLarge {
            size: byte_len,
            limit: config.max_upload_bytes,
        });
    }

    Ok(format)
}

/// Sniff the container format from the leading bytes.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .and_then(ImageFormat::from_image_format)
}

/// Decode a JPEG, PNG or WebP image, applying EXIF orientation correction.
///
/// The result is always RGBA8 so PNG and WebP transparency survives slicing.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not one of the
/// supported containers, `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let format = detect_format(bytes).ok_or(DecodeError::InvalidFormat)?;
    let orientation = extract_orientation(bytes);

    let img = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(Raster::from_rgba_image(oriented.into_rgba8()))
}

/// Decode without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let format = detect_format(bytes).ok_or(DecodeError::InvalidFormat)?;

    let img = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(Raster::from_rgba_image(img.into_rgba8()))
}

/// EXIF orientation tag values (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ExifOrientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90Cw,
    Transverse,
    Rotate270Cw,
}

impl From<u32> for ExifOrientation {
    fn from(value: u32) -> Self {
        match value {
            2 => ExifOrientation::FlipHorizontal,
            3 => ExifOrientation::Rotate180,
            4 => ExifOrientation::FlipVertical,
            5 => ExifOrientation::Transpose,
            6 => ExifOrientation::Rotate90Cw,
            7 => ExifOrientation::Transverse,
            8 => ExifOrientation::Rotate270Cw,
            _ => ExifOrientation::Normal,
        }
    }
}

/// Read the orientation tag; anything unreadable counts as `Normal`.
fn extract_orientation(bytes: &[u8]) -> ExifOrientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(ExifOrientation::from)
            .unwrap_or_default(),
        Err(_) => ExifOrientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: ExifOrientation) -> DynamicImage {
    match orientation {
        ExifOrientation::Normal => img,
        ExifOrientation::FlipHorizontal => img.fliph(),
        ExifOrientation::Rotate180 => img.rotate180(),
        ExifOrientation::FlipVertical => img.flipv(),
        ExifOrientation::Transpose => img.rotate90().fliph(),
        ExifOrientation::Rotate90Cw => img.rotate90(),
        ExifOrientation::Transverse => img.rotate270().fliph(),
        ExifOrientation::Rotate270Cw => img.rotate270(),
    }
}
