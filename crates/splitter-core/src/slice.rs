//! Aspect-fit slicing.
//!
//! A source raster is divided into `rows x cols` equal cells (integer floor
//! division; trailing pixels at the right and bottom edges are dropped). Each
//! of the first `count` cells, in row-major order, becomes one slice:
//!
//! 1. The output size is the largest rectangle with the target ratio that
//!    fits inside the cell (contain-fit, see [`AspectRatio::fit_within`]).
//! 2. The *whole* cell is resampled into that output size.
//!
//! The second step stretches rather than crops, so every slice keeps all of
//! its cell's content. Nothing is drawn around the fitted area.
//!
//! The per-cell work lives in [`render_cell`], a pure function shared by the
//! sequential [`slice`] and the rayon-backed [`slice_parallel`].

use thiserror::Error;

use crate::decode::{FilterType, Raster, BYTES_PER_PIXEL};
use crate::layout::{AspectRatio, GridLayout, LayoutError, SplitConfig};
use crate::transform::PixelRect;

/// Errors from slicing.
#[derive(Debug, Error)]
pub enum SliceError {
    /// The split settings are unusable.
    #[error("Invalid split settings: {0}")]
    InvalidConfig(#[from] LayoutError),

    /// One cell could not be rendered. Slicing skips it and carries on.
    #[error("Slice {index} could not be rendered: {reason}")]
    SliceAllocationFailed { index: u32, reason: String },

    /// Every cell failed.
    #[error("No slices were produced")]
    NoSlicesProduced,
}

/// One output slice and its position in the layout (`row * cols + col`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub index: u32,
    pub raster: Raster,
}

/// Geometry for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlan {
    pub index: u32,
    pub row: u32,
    pub col: u32,
    /// Region of the source that is sampled.
    pub source: PixelRect,
    pub output_width: u32,
    pub output_height: u32,
}

/// Geometry for a whole split, computed without touching pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePlan {
    pub grid: GridLayout,
    pub cell_width: u32,
    pub cell_height: u32,
    pub count: u32,
    pub aspect_ratio: AspectRatio,
}

impl SlicePlan {
    /// Plan a split of a `width x height` source.
    ///
    /// Grids follow the source orientation (`width > height` is landscape).
    ///
    /// # Errors
    ///
    /// Returns `SliceError::InvalidConfig` for a zero count or a bad ratio.
    pub fn new(width: u32, height: u32, config: &SplitConfig) -> Result<Self, SliceError> {
        config.validate()?;

        let grid = config.grid(width > height);
        let plan = Self {
            grid,
            cell_width: width / grid.cols,
            cell_height: height / grid.rows,
            count: config.count,
            aspect_ratio: config.aspect_ratio,
        };

        log::debug!(
            "Splitting {width}x{height} into {}x{} cells of {}x{} ({} slices)",
            grid.rows,
            grid.cols,
            plan.cell_width,
            plan.cell_height,
            plan.slice_count()
        );

        Ok(plan)
    }

    /// Number of slices the plan yields: `min(count, rows * cols)`.
    pub fn slice_count(&self) -> u32 {
        self.count.min(self.grid.cell_count())
    }

    /// Contain-fit output size shared by every cell.
    pub fn output_size(&self) -> (u32, u32) {
        self.aspect_ratio
            .fit_within(self.cell_width, self.cell_height)
    }

    /// Cells in row-major order, stopping after `count`.
    pub fn cells(&self) -> impl Iterator<Item = CellPlan> + '_ {
        let (output_width, output_height) = self.output_size();
        let cols = self.grid.cols;

        (0..self.slice_count()).map(move |index| {
            let row = index / cols;
            let col = index % cols;
            CellPlan {
                index,
                row,
                col,
                source: PixelRect {
                    x: col * self.cell_width,
                    y: row * self.cell_height,
                    width: self.cell_width,
                    height: self.cell_height,
                },
                output_width,
                output_height,
            }
        })
    }
}

/// Render one cell: stretch its full source region into the output size.
///
/// # Errors
///
/// Returns `SliceError::SliceAllocationFailed` when the cell is empty, lies
/// outside the source, or the output buffer size overflows.
pub fn render_cell(
    source: &Raster,
    cell: &CellPlan,
    filter: FilterType,
) -> Result<Raster, SliceError> {
    let fail = |reason: &str| SliceError::SliceAllocationFailed {
        index: cell.index,
        reason: reason.to_string(),
    };

    let region = cell.source;
    if region.width == 0 || region.height == 0 {
        return Err(fail("cell is empty"));
    }

    let in_bounds = region.x.checked_add(region.width).is_some_and(|r| r <= source.width)
        && region.y.checked_add(region.height).is_some_and(|b| b <= source.height);
    if !in_bounds {
        return Err(fail("cell lies outside the source"));
    }

    (cell.output_width as usize)
        .checked_mul(cell.output_height as usize)
        .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| fail("output size overflows"))?;

    let view = source
        .as_image_view()
        .ok_or_else(|| fail("source pixel buffer does not match its dimensions"))?;
    let cell_view = image::imageops::crop_imm(&view, region.x, region.y, region.width, region.height);

    let resized = image::imageops::resize(
        &*cell_view,
        cell.output_width,
        cell.output_height,
        filter.to_image_filter(),
    );

    Ok(Raster::from_rgba_image(resized))
}

/// Slice a raster on the current thread.
///
/// # Example
///
/// ```ignore
/// use splitter_core::layout::{AspectRatio, LayoutMode, SplitConfig};
/// use splitter_core::slice::slice;
///
/// let config = SplitConfig::new(4, AspectRatio::SQUARE, LayoutMode::Grid);
/// let slices = slice(&image_1200x800, &config, FilterType::Bilinear)?;
/// assert_eq!(slices.len(), 4);
/// assert_eq!((slices[0].raster.width, slices[0].raster.height), (400, 400));
/// ```
pub fn slice(
    source: &Raster,
    config: &SplitConfig,
    filter: FilterType,
) -> Result<Vec<Slice>, SliceError> {
    let plan = SlicePlan::new(source.width, source.height, config)?;

    let rendered = plan
        .cells()
        .map(|cell| (cell.index, render_cell(source, &cell, filter)))
        .collect();

    collect_slices(rendered)
}

/// Slice a raster with one rayon task per cell.
///
/// Output order is row-major regardless of which task finishes first.
#[cfg(feature = "parallel")]
pub fn slice_parallel(
    source: &Raster,
    config: &SplitConfig,
    filter: FilterType,
) -> Result<Vec<Slice>, SliceError> {
    use rayon::iter::{IntoParallelIterator as _, ParallelIterator as _};

    let plan = SlicePlan::new(source.width, source.height, config)?;
    let cells: Vec<CellPlan> = plan.cells().collect();

    let rendered = cells
        .into_par_iter()
        .map(|cell| (cell.index, render_cell(source, &cell, filter)))
        .collect();

    collect_slices(rendered)
}

/// Drop failed cells (logging each) and fail only if nothing is left.
fn collect_slices(rendered: Vec<(u32, Result<Raster, SliceError>)>) -> Result<Vec<Slice>, SliceError> {
    let slices: Vec<Slice> = rendered
        .into_iter()
        .filter_map(|(index, result)| match result {
            Ok(raster) => Some(Slice { index, raster }),
            Err(err) => {
                log::warn!("Skipping slice: {err}");
                None
            }
        })
        .collect();

    if slices.is_empty() {
        return Err(SliceError::NoSlicesProduced);
    }

    Ok(slices)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::layout::LayoutMode;
    use proptest::prelude::*;

    fn mode_strategy() -> impl Strategy<Value = LayoutMode> {
        prop_oneof![
            Just(LayoutMode::Horizontal),
            Just(LayoutMode::Vertical),
            Just(LayoutMode::Grid),
        ]
    }

    proptest! {
        /// Property: The plan yields min(count, rows * cols) cells, all inside the source.
        #[test]
        fn prop_plan_cells_within_source(
            width in 1u32..=4000,
            height in 1u32..=4000,
            count in 1u32..=20,
            mode in mode_strategy(),
        ) {
            let config = SplitConfig::new(count, AspectRatio::SQUARE, mode);
            let plan = SlicePlan::new(width, height, &config).unwrap();
            let cells: Vec<CellPlan> = plan.cells().collect();

            prop_assert_eq!(cells.len() as u32, count.min(plan.grid.cell_count()));
            for (i, cell) in cells.iter().enumerate() {
                prop_assert_eq!(cell.index, i as u32);
                prop_assert_eq!(cell.index, cell.row * plan.grid.cols + cell.col);
                prop_assert!(cell.source.x + cell.source.width <= width);
                prop_assert!(cell.source.y + cell.source.height <= height);
                prop_assert!(cell.output_width <= cell.source.width.max(1));
                prop_assert!(cell.output_height <= cell.source.height.max(1));
            }
        }

        /// Property: Every slice matches the target ratio up to integer flooring.
        #[test]
        fn prop_slices_match_target_ratio(
            width in 40u32..=160,
            height in 40u32..=160,
            count in 1u32..=6,
            (rw, rh) in (1u32..=4, 1u32..=4),
            mode in mode_strategy(),
        ) {
            let img = Raster::filled(width, height, [9, 9, 9, 255]);
            let ratio = AspectRatio::new(rw as f64, rh as f64).unwrap();
            let config = SplitConfig::new(count, ratio, mode);

            let slices = slice(&img, &config, FilterType::Bilinear).unwrap();
            prop_assert_eq!(slices.len() as u32, count);

            for s in &slices {
                let (w, h) = (s.raster.width as f64, s.raster.height as f64);
                prop_assume!(w > 1.0 && h > 1.0);
                // One side is exact and the other is floored, so the
                // error is at most one pixel on the floored side.
                let by_width = (w / ratio.value() - h).abs();
                let by_height = (h * ratio.value() - w).abs();
                prop_assert!(by_width < 1.0 || by_height < 1.0);
            }
        }
    }
}
