//! Aspect ratios, split configuration and contain-fit sizing.

use serde::{Deserialize, Serialize};

use super::{GridLayout, LayoutError};

/// How the source is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One row, `count` columns.
    Horizontal,
    /// `count` rows, one column.
    Vertical,
    /// A near-square grid from [`super::calculate_grid`].
    #[default]
    Grid,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Horizontal => "horizontal",
            LayoutMode::Vertical => "vertical",
            LayoutMode::Grid => "grid",
        }
    }
}

/// A width:height ratio.
///
/// Stored as its two components; the quotient is computed on demand so
/// repeated comparisons don't accumulate rounding error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl AspectRatio {
    pub const SQUARE: AspectRatio = AspectRatio {
        width: 1.0,
        height: 1.0,
    };

    /// Create a ratio from two positive, finite components.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidAspectRatio` for zero, negative or
    /// non-finite components.
    pub fn new(width: f64, height: f64) -> Result<Self, LayoutError> {
        let ratio = Self { width, height };
        ratio.validate()?;
        Ok(ratio)
    }

    /// A user-entered ratio; each component must be a whole number in 1..=99.
    pub fn custom(width: u32, height: u32) -> Result<Self, LayoutError> {
        if !(1..=99).contains(&width) || !(1..=99).contains(&height) {
            return Err(LayoutError::InvalidCustomRatio { width, height });
        }
        Ok(Self {
            width: width as f64,
            height: height as f64,
        })
    }

    /// Check that both components are positive and finite.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(LayoutError::InvalidAspectRatio {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// `width / height`.
    #[inline]
    pub fn value(&self) -> f64 {
        self.width / self.height
    }

    /// Largest `(width, height)` with this ratio that fits inside
    /// `cell_width x cell_height`, each dimension at least 1.
    ///
    /// A cell wider than the ratio keeps its height and narrows; otherwise it
    /// keeps its width and gets shorter. Results are floored.
    ///
    /// # Example
    ///
    /// ```
    /// use splitter_core::layout::AspectRatio;
    ///
    /// assert_eq!(AspectRatio::SQUARE.fit_within(600, 400), (400, 400));
    /// let portrait = AspectRatio::new(3.0, 4.0).unwrap();
    /// assert_eq!(portrait.fit_within(450, 900), (450, 600));
    /// ```
    pub fn fit_within(&self, cell_width: u32, cell_height: u32) -> (u32, u32) {
        let target = self.value();
        let cell_w = cell_width as f64;
        let cell_h = cell_height as f64;

        let (width, height) = if cell_w / cell_h > target {
            ((cell_h * target).floor(), cell_h)
        } else {
            (cell_w, (cell_w / target).floor())
        };

        ((width as u32).max(1), (height as u32).max(1))
    }

    /// The ratio of a whole `grid` of cells that each have this ratio.
    pub fn scaled_by(&self, grid: GridLayout) -> AspectRatio {
        AspectRatio {
            width: self.width * grid.cols as f64,
            height: self.height * grid.rows as f64,
        }
    }

    /// Inverse of [`AspectRatio::scaled_by`]: the ratio of one cell.
    pub fn per_cell(&self, grid: GridLayout) -> AspectRatio {
        AspectRatio {
            width: self.width / grid.cols as f64,
            height: self.height / grid.rows as f64,
        }
    }
}

/// Parameters for one split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitConfig {
    /// Number of slices to produce (at least 1).
    pub count: u32,
    /// Target ratio of each slice.
    pub aspect_ratio: AspectRatio,
    pub layout_mode: LayoutMode,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            count: 4,
            aspect_ratio: AspectRatio::SQUARE,
            layout_mode: LayoutMode::Grid,
        }
    }
}

impl SplitConfig {
    pub fn new(count: u32, aspect_ratio: AspectRatio, layout_mode: LayoutMode) -> Self {
        Self {
            count,
            aspect_ratio,
            layout_mode,
        }
    }

    /// Check the count and ratio.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.count == 0 {
            return Err(LayoutError::ZeroCount);
        }
        self.aspect_ratio.validate()
    }

    /// Rows and columns for a source of the given orientation.
    pub fn grid(&self, is_landscape: bool) -> GridLayout {
        GridLayout::for_mode(self.layout_mode, self.count, is_landscape)
    }

    /// Ratio of the crop box that covers every slice at once.
    ///
    /// The crop box is drawn around the whole set of slices, so its ratio is
    /// the slice ratio scaled by the layout's columns and rows.
    pub fn composite_ratio(&self, is_landscape: bool) -> AspectRatio {
        self.aspect_ratio.scaled_by(self.grid(is_landscape))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: The fitted size never exceeds the cell.
        #[test]
        fn prop_fit_stays_inside_cell(
            cell_w in 1u32..=5000,
            cell_h in 1u32..=5000,
            rw in 1u32..=32,
            rh in 1u32..=32,
        ) {
            let ratio = AspectRatio::new(rw as f64, rh as f64).unwrap();
            let (w, h) = ratio.fit_within(cell_w, cell_h);

            prop_assert!(w >= 1 && h >= 1);
            prop_assert!(w <= cell_w);
            prop_assert!(h <= cell_h);
        }

        /// Property: One side always matches the cell exactly.
        #[test]
        fn prop_fit_touches_one_side(
            cell_w in 1u32..=5000,
            cell_h in 1u32..=5000,
            rw in 1u32..=32,
            rh in 1u32..=32,
        ) {
            let ratio = AspectRatio::new(rw as f64, rh as f64).unwrap();
            let (w, h) = ratio.fit_within(cell_w, cell_h);

            prop_assert!(w == cell_w || h == cell_h);
        }

        /// Property: The fitted ratio is within one pixel of the target.
        #[test]
        fn prop_fit_matches_ratio_within_a_pixel(
            cell_w in 50u32..=5000,
            cell_h in 50u32..=5000,
            rw in 1u32..=16,
            rh in 1u32..=16,
        ) {
            let ratio = AspectRatio::new(rw as f64, rh as f64).unwrap();
            let (w, h) = ratio.fit_within(cell_w, cell_h);
            prop_assume!(w > 1 && h > 1);

            let target = ratio.value();
            if w == cell_w {
                prop_assert!((w as f64 / target - h as f64).abs() < 1.0);
            } else {
                prop_assert!((h as f64 * target - w as f64).abs() < 1.0);
            }
        }
    }
}
