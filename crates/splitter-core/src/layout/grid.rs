//! Row/column layout for a split.

use serde::{Deserialize, Serialize};

use super::LayoutMode;

/// Number of rows and columns a source is divided into.
///
/// Always `rows >= 1`, `cols >= 1` and `rows * cols >= count` for the count
/// it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
}

impl GridLayout {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells, including any beyond the requested count.
    pub fn cell_count(&self) -> u32 {
        self.rows * self.cols
    }

    /// Layout for a split mode: strips are `1 x count` / `count x 1`, grids
    /// use [`calculate_grid`].
    pub fn for_mode(mode: LayoutMode, count: u32, is_landscape: bool) -> Self {
        let count = count.max(1);
        match mode {
            LayoutMode::Horizontal => GridLayout::new(1, count),
            LayoutMode::Vertical => GridLayout::new(count, 1),
            LayoutMode::Grid => calculate_grid(count, is_landscape),
        }
    }
}

/// Grid layout for `count` slices.
///
/// Common counts use fixed presets; two- and six-way splits follow the
/// source orientation. Everything else falls back to the smallest
/// near-square grid with `cols = ceil(sqrt(count))`.
///
/// # Example
///
/// ```
/// use splitter_core::layout::{calculate_grid, GridLayout};
///
/// assert_eq!(calculate_grid(6, true), GridLayout::new(2, 3));
/// assert_eq!(calculate_grid(6, false), GridLayout::new(3, 2));
/// assert_eq!(calculate_grid(5, true), GridLayout::new(2, 3));
/// ```
pub fn calculate_grid(count: u32, is_landscape: bool) -> GridLayout {
    match count {
        0 | 1 => GridLayout::new(1, 1),
        2 if is_landscape => GridLayout::new(1, 2),
        2 => GridLayout::new(2, 1),
        4 => GridLayout::new(2, 2),
        6 if is_landscape => GridLayout::new(2, 3),
        6 => GridLayout::new(3, 2),
        9 => GridLayout::new(3, 3),
        _ => {
            let cols = ceil_sqrt(count);
            let rows = count.div_ceil(cols);
            GridLayout::new(rows, cols)
        }
    }
}

/// Smallest `n` with `n * n >= value`, computed without float rounding drift.
fn ceil_sqrt(value: u32) -> u32 {
    let mut n = (value as f64).sqrt() as u32;
    while (n as u64) * (n as u64) < value as u64 {
        n += 1;
    }
    while n > 1 && ((n - 1) as u64) * ((n - 1) as u64) >= value as u64 {
        n -= 1;
    }
    n.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_table() {
        let cases = [
            (1, true, (1, 1)),
            (1, false, (1, 1)),
            (2, true, (1, 2)),
            (2, false, (2, 1)),
            (4, true, (2, 2)),
            (4, false, (2, 2)),
            (6, true, (2, 3)),
            (6, false, (3, 2)),
            (9, true, (3, 3)),
            (9, false, (3, 3)),
        ];

        for (count, landscape, (rows, cols)) in cases {
            assert_eq!(
                calculate_grid(count, landscape),
                GridLayout::new(rows, cols),
                "count={count} landscape={landscape}"
            );
        }
    }

    #[test]
    fn test_zero_count_is_single_cell() {
        assert_eq!(calculate_grid(0, true), GridLayout::new(1, 1));
    }

    #[test]
    fn test_fallback_layouts() {
        assert_eq!(calculate_grid(3, true), GridLayout::new(2, 2));
        assert_eq!(calculate_grid(5, false), GridLayout::new(2, 3));
        assert_eq!(calculate_grid(7, true), GridLayout::new(3, 3));
        assert_eq!(calculate_grid(10, true), GridLayout::new(3, 4));
        assert_eq!(calculate_grid(16, true), GridLayout::new(4, 4));
        assert_eq!(calculate_grid(17, false), GridLayout::new(4, 5));
    }

    #[test]
    fn test_for_mode_strips() {
        assert_eq!(
            GridLayout::for_mode(LayoutMode::Horizontal, 3, false),
            GridLayout::new(1, 3)
        );
        assert_eq!(
            GridLayout::for_mode(LayoutMode::Vertical, 3, true),
            GridLayout::new(3, 1)
        );
        assert_eq!(
            GridLayout::for_mode(LayoutMode::Grid, 6, true),
            GridLayout::new(2, 3)
        );
        assert_eq!(
            GridLayout::for_mode(LayoutMode::Horizontal, 0, true),
            GridLayout::new(1, 1)
        );
    }

    #[test]
    fn test_ceil_sqrt() {
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(2), 2);
        assert_eq!(ceil_sqrt(4), 2);
        assert_eq!(ceil_sqrt(5), 3);
        assert_eq!(ceil_sqrt(100), 10);
        assert_eq!(ceil_sqrt(101), 11);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
