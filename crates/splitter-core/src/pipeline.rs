//! End-to-end split: rotate, crop, slice and encode.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SplitterConfig;
use crate::decode::{ImageFormat, Raster};
use crate::encode::{encode_slices, EncodeError, EncodeOptions, EncodedSlice};
use crate::layout::{LayoutError, SplitConfig};
use crate::slice::{slice, Slice, SliceError};
use crate::transform::{apply_rotation, crop_or_source, Rectangle, Rotation};

/// Errors from a full split.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Slice(#[from] SliceError),

    /// Slices were produced but none of them could be encoded.
    #[error("None of the {attempted} slices could be encoded")]
    NoSlicesEncoded { attempted: usize },
}

/// What the user asked for: orientation, crop and layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitRequest {
    pub rotation: Rotation,
    /// Crop in source pixels of the *rotated* image. `None` uses everything.
    pub crop: Option<Rectangle>,
    pub config: SplitConfig,
}

/// Encoded slices plus the ones that failed to encode.
#[derive(Debug)]
pub struct SplitOutput {
    pub slices: Vec<EncodedSlice>,
    pub failures: Vec<(u32, EncodeError)>,
}

/// Rotate then crop. An unusable crop falls back to the rotated image.
pub fn prepare_source<'a>(
    source: &'a Raster,
    rotation: Rotation,
    crop: Option<&Rectangle>,
) -> Cow<'a, Raster> {
    let rotated = match rotation {
        Rotation::Deg0 => Cow::Borrowed(source),
        _ => Cow::Owned(apply_rotation(source, rotation)),
    };

    match crop {
        Some(rect) => Cow::Owned(crop_or_source(&rotated, rect)),
        None => rotated,
    }
}

/// Rotate, crop and slice `source`.
///
/// Uses the rayon slicer when `settings.parallel` is set and the `parallel`
/// feature is compiled in.
pub fn split(
    source: &Raster,
    request: &SplitRequest,
    settings: &SplitterConfig,
) -> Result<Vec<Slice>, SplitError> {
    request.config.validate()?;

    let prepared = prepare_source(source, request.rotation, request.crop.as_ref());
    log::debug!(
        "Prepared {}x{} source (rotation {}, crop {})",
        prepared.width,
        prepared.height,
        request.rotation.degrees(),
        request.crop.is_some()
    );

    #[cfg(feature = "parallel")]
    if settings.parallel {
        return Ok(crate::slice::slice_parallel(
            &prepared,
            &request.config,
            settings.resize_filter,
        )?);
    }

    Ok(slice(&prepared, &request.config, settings.resize_filter)?)
}

/// [`split`], then encode every slice as `format`.
///
/// # Errors
///
/// Fails if slicing fails, or with `SplitError::NoSlicesEncoded` when every
/// slice fails to encode. Partial encode failures are returned in
/// [`SplitOutput::failures`].
pub fn split_and_encode(
    source: &Raster,
    request: &SplitRequest,
    format: ImageFormat,
    settings: &SplitterConfig,
) -> Result<SplitOutput, SplitError> {
    let slices = split(source, request, settings)?;
    let options = EncodeOptions::from(settings);

    let mut output = SplitOutput {
        slices: Vec::with_capacity(slices.len()),
        failures: Vec::new(),
    };
    for (slice, result) in slices.iter().zip(encode_slices(&slices, format, &options)) {
        match result {
            Ok(encoded) => output.slices.push(encoded),
            Err(err) => output.failures.push((slice.index, err)),
        }
    }

    if output.slices.is_empty() {
        return Err(SplitError::NoSlicesEncoded {
            attempted: slices.len(),
        });
    }

    Ok(output)
}
