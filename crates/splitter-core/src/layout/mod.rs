//! Split layout: grids, aspect ratios and presets.
//!
//! Everything here is pure arithmetic on dimensions; no pixels are touched.

mod aspect;
mod grid;
mod presets;

use thiserror::Error;

pub use aspect::{AspectRatio, LayoutMode, SplitConfig};
pub use grid::{calculate_grid, GridLayout};
pub use presets::{ImageOrientation, PresetScene, SUPPORTED_COUNTS};

/// Errors from invalid split settings.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// A ratio component is zero, negative or not finite.
    #[error("Invalid aspect ratio {width}:{height}")]
    InvalidAspectRatio { width: f64, height: f64 },

    /// A custom ratio component is outside 1..=99.
    #[error("Custom ratio {width}:{height} out of range (each side must be 1-99)")]
    InvalidCustomRatio { width: u32, height: u32 },

    /// A split must produce at least one slice.
    #[error("Slice count must be at least 1")]
    ZeroCount,
}
