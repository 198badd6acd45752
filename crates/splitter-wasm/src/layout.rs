//! WASM bindings for layout math and presets.
//!
//! These back the settings panel: which counts to offer, which layout to
//! suggest, and what ratio the crop box should have.

use crate::types::to_js_error;
use splitter_core::layout::{self, AspectRatio, ImageOrientation, PresetScene, SplitConfig, SUPPORTED_COUNTS};
use wasm_bindgen::prelude::*;

/// `[rows, cols]` for a grid split of `count` slices.
#[wasm_bindgen]
pub fn calculate_grid(count: u32, is_landscape: bool) -> Vec<u32> {
    let grid = layout::calculate_grid(count, is_landscape);
    vec![grid.rows, grid.cols]
}

/// Slice counts offered in the UI.
#[wasm_bindgen]
pub fn supported_counts() -> Vec<u32> {
    SUPPORTED_COUNTS.to_vec()
}

/// `"landscape"`, `"portrait"` or `"square"`.
#[wasm_bindgen]
pub fn classify_orientation(width: u32, height: u32) -> String {
    ImageOrientation::classify(width, height).as_str().to_string()
}

/// Suggested layout mode (`"horizontal"`, `"vertical"` or `"grid"`).
#[wasm_bindgen]
pub fn recommended_layout(width: u32, height: u32, count: u32) -> String {
    ImageOrientation::classify(width, height)
        .recommended_layout(count)
        .as_str()
        .to_string()
}

/// Slice ratio `[width, height]` for a preset scene.
///
/// `custom_width`/`custom_height` are only read for the `custom` scene and
/// must be whole numbers in 1-99.
///
/// # Errors
///
/// Returns an error for an unknown scene or an out-of-range custom ratio.
#[wasm_bindgen]
pub fn preset_ratio(scene: &str, custom_width: u32, custom_height: u32) -> Result<Vec<f64>, JsValue> {
    let scene = PresetScene::from_name(scene)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown preset scene: {scene}")))?;
    let custom = match scene {
        PresetScene::Custom => AspectRatio::custom(custom_width, custom_height).map_err(to_js_error)?,
        _ => AspectRatio::SQUARE,
    };
    let ratio = scene.ratio(custom);
    Ok(vec![ratio.width, ratio.height])
}

/// Ratio `[width, height]` of the crop box that covers every slice.
///
/// `config` is a `SplitConfig` object:
/// `{ count, aspectRatio: { width, height }, layoutMode }`.
#[wasm_bindgen]
pub fn composite_ratio(config: JsValue, is_landscape: bool) -> Result<Vec<f64>, JsValue> {
    let config: SplitConfig = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
    config.validate().map_err(to_js_error)?;
    let ratio = config.composite_ratio(is_landscape);
    Ok(vec![ratio.width, ratio.height])
}
