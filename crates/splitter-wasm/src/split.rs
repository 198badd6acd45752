//! WASM bindings for the split pipeline.
//!
//! A request object carries everything the user picked:
//!
//! ```typescript
//! const request = {
//!   rotation: 90,                                   // 0, 90, 180 or 270
//!   crop: { x: 0, y: 40, width: 1200, height: 800 }, // or null
//!   config: { count: 4, aspectRatio: { width: 1, height: 1 }, layoutMode: "grid" },
//! };
//! const slices = split_image(image, request, undefined);
//! ```
//!
//! Slicing runs on the calling thread; call these from a Web Worker to keep
//! the page responsive.

use crate::types::{settings_from_js, to_js_error, JsRaster, JsSlice};
use js_sys::{Array, Object, Reflect, Uint8Array};
use splitter_core::decode::{ImageFormat, Raster};
use splitter_core::encode::SliceNaming;
use splitter_core::pipeline::{self, SplitError, SplitOutput, SplitRequest};
use splitter_core::SplitterConfig;
use wasm_bindgen::prelude::*;

/// Rotate, crop and slice an image.
///
/// Returns an `Array` of `JsSlice` in row-major order. Cells that could not
/// be rendered are skipped (and logged), so check each slice's `index`.
///
/// # Errors
///
/// Returns an error for a malformed request or when no slice was produced.
#[wasm_bindgen]
pub fn split_image(image: &JsRaster, request: JsValue, settings: JsValue) -> Result<Array, JsValue> {
    let request = request_from_js(request)?;
    let settings = settings_from_js(settings)?;

    let slices = run_split(image.checked()?, &request, &settings).map_err(to_js_error)?;
    Ok(slices.into_iter().map(JsValue::from).collect())
}

/// Split and encode in one call.
///
/// Returns an `Array` of `{ index, name, mime, bytes }` objects, where
/// `bytes` is a `Uint8Array` and `name` follows `{base}_{index+1}.{ext}`.
/// Slices that fail to encode are logged and left out.
///
/// # Errors
///
/// Returns an error for a malformed request, an unsupported `mime`, or
/// when nothing could be sliced or encoded.
#[wasm_bindgen]
pub fn split_and_encode_image(
    image: &JsRaster,
    request: JsValue,
    mime: &str,
    file_name: &str,
    settings: JsValue,
) -> Result<Array, JsValue> {
    let request = request_from_js(request)?;
    let settings = settings_from_js(settings)?;
    let format = ImageFormat::from_mime(mime)
        .ok_or_else(|| JsValue::from_str(&format!("Unsupported output type: {mime}")))?;

    let output = pipeline::split_and_encode(image.checked()?, &request, format, &settings)
        .map_err(to_js_error)?;
    let naming = SliceNaming::from_file_name(file_name);

    let files = Array::new();
    for file in named_files(output, &naming) {
        let entry = Object::new();
        Reflect::set(&entry, &"index".into(), &file.index.into())?;
        Reflect::set(&entry, &"name".into(), &file.name.into())?;
        Reflect::set(&entry, &"mime".into(), &file.mime.into())?;
        Reflect::set(&entry, &"bytes".into(), &Uint8Array::from(file.bytes.as_slice()).into())?;
        files.push(&entry);
    }
    Ok(files)
}

/// An encoded slice with its download name.
#[derive(Debug)]
struct NamedFile {
    index: u32,
    name: String,
    mime: &'static str,
    bytes: Vec<u8>,
}

fn request_from_js(value: JsValue) -> Result<SplitRequest, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(to_js_error)
}

fn run_split(
    source: &Raster,
    request: &SplitRequest,
    settings: &SplitterConfig,
) -> Result<Vec<JsSlice>, SplitError> {
    let slices = pipeline::split(source, request, settings)?;
    Ok(slices.into_iter().map(JsSlice::from).collect())
}

fn named_files(output: SplitOutput, naming: &SliceNaming) -> Vec<NamedFile> {
    for (index, err) in &output.failures {
        log::warn!("Dropping {}: {err}", naming.file_name(*index));
    }

    output
        .slices
        .into_iter()
        .map(|slice| NamedFile {
            index: slice.index,
            name: naming.file_name(slice.index),
            mime: slice.mime(),
            bytes: slice.bytes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitter_core::layout::{AspectRatio, LayoutMode, SplitConfig};
    use splitter_core::transform::{Rectangle, Rotation};

    fn request(count: u32, mode: LayoutMode) -> SplitRequest {
        SplitRequest {
            rotation: Rotation::Deg0,
            crop: None,
            config: SplitConfig::new(count, AspectRatio::SQUARE, mode),
        }
    }

    #[test]
    fn test_run_split_grid() {
        let source = Raster::filled(1200, 800, [0, 0, 0, 255]);
        let slices = run_split(&source, &request(4, LayoutMode::Grid), &SplitterConfig::default()).unwrap();

        assert_eq!(slices.len(), 4);
        for (i, slice) in slices.iter().enumerate() {
            assert_eq!(slice.index(), i as u32);
            assert_eq!((slice.width(), slice.height()), (400, 400));
        }
    }

    #[test]
    fn test_run_split_with_rotation_and_crop() {
        let source = Raster::filled(800, 1200, [0, 0, 0, 255]);
        let req = SplitRequest {
            rotation: Rotation::Deg90,
            crop: Some(Rectangle::new(0.0, 0.0, 1200.0, 600.0)),
            config: SplitConfig::new(2, AspectRatio::SQUARE, LayoutMode::Horizontal),
        };
        let slices = run_split(&source, &req, &SplitterConfig::default()).unwrap();

        assert_eq!(slices.len(), 2);
        assert_eq!((slices[0].width(), slices[0].height()), (600, 600));
    }

    #[test]
    fn test_named_files() {
        let source = Raster::filled(90, 30, [10, 20, 30, 255]);
        let output = pipeline::split_and_encode(
            &source,
            &request(3, LayoutMode::Horizontal),
            ImageFormat::WebP,
            &SplitterConfig::default(),
        )
        .unwrap();

        let files = named_files(output, &SliceNaming::from_file_name("banner.webp"));
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["banner_1.webp", "banner_2.webp", "banner_3.webp"]);
        assert!(files.iter().all(|f| f.mime == "image/webp" && !f.bytes.is_empty()));
    }
}

/// WASM-specific tests for the JS request interface. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_request(json: &str) -> JsValue {
        js_sys::JSON::parse(json).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_split_image_from_js_request() {
        let image = JsRaster::new(900, 900, vec![0; 900 * 900 * 4]);
        let request = js_request(
            r#"{"rotation":0,"crop":null,"config":{"count":2,"aspectRatio":{"width":3,"height":4},"layoutMode":"horizontal"}}"#,
        );

        let slices = split_image(&image, request, JsValue::UNDEFINED).unwrap();
        assert_eq!(slices.length(), 2);
    }

    #[wasm_bindgen_test]
    fn test_split_image_rejects_bad_rotation() {
        let image = JsRaster::new(10, 10, vec![0; 400]);
        let request = js_request(r#"{"rotation":45}"#);
        assert!(split_image(&image, request, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_split_and_encode_image() {
        let image = JsRaster::new(40, 20, vec![255; 40 * 20 * 4]);
        let request = js_request(r#"{"config":{"count":2,"aspectRatio":{"width":1,"height":1},"layoutMode":"horizontal"}}"#);

        let files = split_and_encode_image(&image, request, "image/png", "pic.png", JsValue::UNDEFINED).unwrap();
        assert_eq!(files.length(), 2);

        let first = files.get(0);
        let name = Reflect::get(&first, &"name".into()).unwrap();
        assert_eq!(name.as_string().as_deref(), Some("pic_1.png"));
    }
}
