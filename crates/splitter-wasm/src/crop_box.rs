//! WASM binding for the interactive crop box.
//!
//! The UI forwards pointer events as plain objects:
//!
//! ```typescript
//! box.apply({ type: "start", mode: "move", pointer: { x, y } });
//! box.apply({ type: "move", pointer: { x, y } });
//! box.apply({ type: "end" });
//! const rect = box.rect(); // { x, y, width, height } in canvas pixels
//! ```

use crate::types::to_js_error;
use splitter_core::crop_box::{self, CropBox, CropGesture, Size, DEFAULT_FILL};
use splitter_core::layout::AspectRatio;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct JsCropBox {
    inner: CropBox,
}

#[wasm_bindgen]
impl JsCropBox {
    /// A centred crop box covering 90% of a `width x height` canvas.
    ///
    /// `ratio_width:ratio_height` is the ratio of the whole box, usually
    /// `composite_ratio` for the current split settings.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive ratio.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, ratio_width: f64, ratio_height: f64) -> Result<JsCropBox, JsValue> {
        let ratio = AspectRatio::new(ratio_width, ratio_height).map_err(to_js_error)?;
        Ok(Self::centered(width, height, ratio))
    }

    /// Feed one pointer gesture.
    pub fn apply(&mut self, gesture: JsValue) -> Result<(), JsValue> {
        let gesture: CropGesture = serde_wasm_bindgen::from_value(gesture).map_err(to_js_error)?;
        self.reduce(gesture);
        Ok(())
    }

    /// Current rectangle in canvas pixels.
    pub fn rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.rect()).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Current rectangle mapped onto source pixels `[x, y, width, height]`.
    ///
    /// `source_width x source_height` is the image size after rotation.
    pub fn to_source(&self, source_width: u32, source_height: u32) -> Vec<f64> {
        let rect = crop_box::display_to_source(
            &self.inner.rect(),
            self.inner.bounds(),
            (source_width, source_height),
        );
        vec![rect.x, rect.y, rect.width, rect.height]
    }
}

impl JsCropBox {
    fn centered(width: f64, height: f64, ratio: AspectRatio) -> Self {
        Self {
            inner: CropBox::centered(Size::new(width, height), ratio, DEFAULT_FILL),
        }
    }

    fn reduce(&mut self, gesture: CropGesture) {
        self.inner = self.inner.reduce(gesture);
    }

    #[cfg(test)]
    fn current(&self) -> splitter_core::transform::Rectangle {
        self.inner.rect()
    }
}


/// WASM-specific tests for the JS object interface. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_apply_js_gestures() {
        let mut cb = JsCropBox::new(400.0, 400.0, 1.0, 1.0).unwrap();
        let before = cb.current();

        let start = js_sys::JSON::parse(r#"{"type":"start","mode":"move","pointer":{"x":0,"y":0}}"#).unwrap();
        let step = js_sys::JSON::parse(r#"{"type":"move","pointer":{"x":15,"y":0}}"#).unwrap();
        cb.apply(start).unwrap();
        cb.apply(step).unwrap();

        assert_eq!(cb.current().x, (before.x + 15.0).round());
    }

    #[wasm_bindgen_test]
    fn test_rejects_bad_ratio() {
        assert!(JsCropBox::new(100.0, 100.0, 0.0, 1.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_rejects_unknown_gesture() {
        let mut cb = JsCropBox::new(100.0, 100.0, 1.0, 1.0).unwrap();
        let bogus = js_sys::JSON::parse(r#"{"type":"pinch"}"#).unwrap();
        assert!(cb.apply(bogus).is_err());
    }
}
