//! Raster encoding with the `image` crate's codecs.
//!
//! JPEG has no alpha channel, so alpha is dropped before encoding. PNG and
//! WebP keep it; WebP is written lossless.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::EncodeError;
use crate::config::{SplitterConfig, DEFAULT_JPEG_QUALITY};
use crate::decode::{ImageFormat, Raster, BYTES_PER_PIXEL};
use crate::slice::Slice;

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality (1-100). Ignored for PNG and WebP.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl From<&SplitterConfig> for EncodeOptions {
    fn from(config: &SplitterConfig) -> Self {
        Self {
            jpeg_quality: config.jpeg_quality,
        }
    }
}

/// One encoded slice, ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSlice {
    pub index: u32,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl EncodedSlice {
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }
}

/// Encode a raster.
///
/// # Errors
///
/// Returns `InvalidDimensions` for an empty raster, `InvalidPixelData` when
/// the buffer length doesn't match, and `EncodingFailed` if the codec fails.
///
/// # Example
///
/// ```
/// use splitter_core::decode::{ImageFormat, Raster};
/// use splitter_core::encode::{encode, EncodeOptions};
///
/// let raster = Raster::filled(16, 16, [200, 10, 10, 255]);
/// let png = encode(&raster, ImageFormat::Png, &EncodeOptions::default()).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode(
    raster: &Raster,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (raster.width, raster.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        ImageFormat::Jpeg => {
            let rgb = drop_alpha(&raster.pixels);
            let quality = options.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                &rgb,
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        ImageFormat::Png => PngEncoder::new(&mut buffer).write_image(
            &raster.pixels,
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ImageFormat::WebP => WebPEncoder::new_lossless(&mut buffer).write_image(
            &raster.pixels,
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format: format.mime(),
        reason: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}

/// Encode every slice independently.
///
/// The result has one entry per input slice, in the same order. A failed
/// slice is logged and reported in place; the others are still encoded.
pub fn encode_slices(
    slices: &[Slice],
    format: ImageFormat,
    options: &EncodeOptions,
) -> Vec<Result<EncodedSlice, EncodeError>> {
    slices
        .iter()
        .map(|slice| {
            encode(&slice.raster, format, options)
                .map(|bytes| EncodedSlice {
                    index: slice.index,
                    format,
                    bytes,
                })
                .inspect_err(|err| log::warn!("Slice {} not encoded: {err}", slice.index))
        })
        .collect()
}

/// RGBA -> RGB.
fn drop_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / BYTES_PER_PIXEL * 3);
    for px in rgba.chunks_exact(BYTES_PER_PIXEL) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================
