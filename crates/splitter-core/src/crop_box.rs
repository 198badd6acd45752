//! Interactive crop box.
//!
//! The crop box lives in display coordinates (the preview canvas). Pointer
//! input arrives as [`CropGesture`]s and is folded into a new [`CropBox`] by
//! [`CropBox::reduce`]. Each step computes the rectangle from the one held
//! when the gesture started plus the total pointer travel, so a stream of
//! small moves can't drift through repeated rounding or clamping.
//!
//! Once the user is done, [`display_to_source`] maps the rectangle onto
//! source pixels for [`crate::transform::apply_crop`].

use serde::{Deserialize, Serialize};

use crate::decode::calculate_fit_dimensions;
use crate::layout::AspectRatio;
use crate::transform::{Rectangle, Rotation};

/// Narrowest crop box a resize can produce.
pub const MIN_CROP_WIDTH: f64 = 50.0;

/// Share of the canvas the initial crop box covers.
pub const DEFAULT_FILL: f64 = 0.9;

/// Longest edge of the preview canvas.
pub const PREVIEW_MAX_EDGE: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// What a drag does: the box body moves, the bottom-right handle resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    Move,
    Resize,
}

/// Pointer input for the crop box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CropGesture {
    /// Pointer pressed on the box body or the resize handle.
    Start { mode: DragMode, pointer: Point },
    /// Pointer moved to an absolute position.
    Move { pointer: Point },
    /// Pointer released.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    mode: DragMode,
    origin: Point,
    start: Rectangle,
}

/// Crop rectangle constrained to a container and a fixed ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    rect: Rectangle,
    bounds: Size,
    ratio: AspectRatio,
    drag: Option<Drag>,
}

impl CropBox {
    /// The largest box with `ratio` covering `fill` of `bounds`, centred.
    ///
    /// `fill` is clamped to `(0, 1]`, so the box never leaves the bounds.
    pub fn centered(bounds: Size, ratio: AspectRatio, fill: f64) -> Self {
        let fill = if fill.is_finite() && fill > 0.0 {
            fill.min(1.0)
        } else {
            DEFAULT_FILL
        };

        let rect = if bounds.width <= 0.0 || bounds.height <= 0.0 || ratio.validate().is_err() {
            Rectangle::default()
        } else {
            let target = ratio.value();
            let (width, height) = if bounds.width / bounds.height > target {
                let h = bounds.height * fill;
                (h * target, h)
            } else {
                let w = bounds.width * fill;
                (w, w / target)
            };
            Rectangle::new(
                (bounds.width - width) / 2.0,
                (bounds.height - height) / 2.0,
                width,
                height,
            )
        };

        Self {
            rect,
            bounds,
            ratio,
            drag: None,
        }
    }

    /// Restore a previously chosen rectangle.
    pub fn with_rect(bounds: Size, ratio: AspectRatio, rect: Rectangle) -> Self {
        Self {
            rect,
            bounds,
            ratio,
            drag: None,
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Apply one gesture.
    ///
    /// Moves without a preceding `Start`, and moves of less than one pixel
    /// on both axes, leave the box unchanged.
    pub fn reduce(self, gesture: CropGesture) -> Self {
        match gesture {
            CropGesture::Start { mode, pointer } => Self {
                drag: Some(Drag {
                    mode,
                    origin: pointer,
                    start: self.rect,
                }),
                ..self
            },
            CropGesture::End => Self { drag: None, ..self },
            CropGesture::Move { pointer } => {
                let Some(drag) = self.drag else {
                    return self;
                };

                let dx = pointer.x - drag.origin.x;
                let dy = pointer.y - drag.origin.y;
                if dx.abs() < 1.0 && dy.abs() < 1.0 {
                    return self;
                }

                let rect = match drag.mode {
                    DragMode::Move => self.moved(drag.start, dx, dy),
                    DragMode::Resize => self.resized(drag.start, dx),
                };
                Self { rect, ..self }
            }
        }
    }

    fn moved(&self, start: Rectangle, dx: f64, dy: f64) -> Rectangle {
        let max_x = (self.bounds.width - start.width).max(0.0);
        let max_y = (self.bounds.height - start.height).max(0.0);

        Rectangle {
            x: (start.x + dx).clamp(0.0, max_x).round(),
            y: (start.y + dy).clamp(0.0, max_y).round(),
            ..start
        }
    }

    /// Resize from the bottom-right corner; the width drives the height.
    fn resized(&self, start: Rectangle, dx: f64) -> Rectangle {
        let target = self.ratio.value();

        let mut width = (start.width + dx).max(MIN_CROP_WIDTH);
        let mut height = width / target;

        if start.x + width > self.bounds.width {
            width = self.bounds.width - start.x;
            height = width / target;
        }
        if start.y + height > self.bounds.height {
            height = self.bounds.height - start.y;
            width = height * target;
        }

        Rectangle {
            width: width.round(),
            height: height.round(),
            ..start
        }
    }
}

/// Map a display-space rectangle onto source pixels.
///
/// `source` is the size of the image the canvas shows, after rotation.
/// Values are rounded to two decimals; [`Rectangle::clamp_to`] does the
/// final integer snapping.
pub fn display_to_source(rect: &Rectangle, display: Size, source: (u32, u32)) -> Rectangle {
    if display.width <= 0.0 || display.height <= 0.0 {
        return *rect;
    }

    let scale_x = source.0 as f64 / display.width;
    let scale_y = source.1 as f64 / display.height;
    let round2 = |v: f64| (v * 100.0).round() / 100.0;

    Rectangle {
        x: round2(rect.x * scale_x),
        y: round2(rect.y * scale_y),
        width: round2(rect.width * scale_x),
        height: round2(rect.height * scale_y),
    }
}

/// Canvas size for previewing a `natural` sized image under `rotation`.
///
/// The longer edge is capped at `max_edge` (never enlarged), and the result
/// is swapped for quarter turns.
pub fn preview_size(natural: (u32, u32), max_edge: u32, rotation: Rotation) -> (u32, u32) {
    let (width, height) = natural;
    let fitted = if width.max(height) <= max_edge {
        natural
    } else {
        calculate_fit_dimensions(width, height, max_edge)
    };

    rotation.rotated_dimensions(fitted.0, fitted.1)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
