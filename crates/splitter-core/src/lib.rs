//! Splitter Core - Image splitting library
//!
//! This crate provides the core functionality of the image splitter:
//! decoding uploads, rotating and cropping, dividing an image into an
//! aspect-fitted grid of slices, and encoding those slices for download.

pub mod config;
pub mod crop_box;
pub mod decode;
pub mod encode;
pub mod layout;
pub mod pipeline;
pub mod slice;
pub mod transform;

pub use config::SplitterConfig;
pub use decode::{decode_image, DecodeError, ImageFormat, Raster};
pub use encode::{encode, EncodeError, SliceNaming};
pub use layout::{calculate_grid, AspectRatio, GridLayout, LayoutMode, SplitConfig};
pub use pipeline::{split, split_and_encode, SplitError, SplitOutput, SplitRequest};
pub use slice::{slice, Slice, SliceError};
#[cfg(feature = "parallel")]
pub use slice::slice_parallel;
pub use transform::{apply_crop, apply_rotation, crop_or_source, Rectangle, Rotation, TransformError};
