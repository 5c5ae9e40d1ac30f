//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_orientation`] - Read the EXIF orientation tag of a JPEG
//! - [`decode_image`] - Decode JPEG, PNG or WebP bytes to RGB
//! - [`read_metadata`] - Dimensions, orientation, resolution and format
//! - [`resize`] - Resize an image to exact dimensions
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, decode_orientation, apply_orientation } from '@pixelfit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const raw = decode_image(bytes);
//! const upright = apply_orientation(raw, decode_orientation(bytes));
//! ```

use crate::types::{filter_from_u8, JsDecodedImage};
use pixelfit_core::config::DEFAULT_MAX_OUTPUT_PIXELS;
use pixelfit_core::decode;
use wasm_bindgen::prelude::*;

/// Read the EXIF orientation tag (1-8) from JPEG bytes.
///
/// Never fails: anything without a readable orientation reports 1 (upright).
#[wasm_bindgen]
pub fn decode_orientation(bytes: &[u8]) -> u8 {
    decode::decode_orientation(bytes).tag()
}

/// Decode an uploaded JPEG, PNG or WebP file to RGB pixels.
///
/// The EXIF orientation is not applied; pass the result and
/// `decode_orientation(bytes)` to `apply_orientation`.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not a supported format, or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an upload and return its metadata as a plain object:
/// `{ width, height, orientation, dpi, format }`.
#[wasm_bindgen]
pub fn read_metadata(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let source = decode::decode_source(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&source.metadata())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize metadata: {}", e)))
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
///
/// # Errors
///
/// Returns an error if a target dimension is zero or the output would exceed
/// the default pixel limit.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    check_output_size(width, height).map_err(|e| JsValue::from_str(&e))?;
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn check_output_size(width: u32, height: u32) -> Result<(), String> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels > DEFAULT_MAX_OUTPUT_PIXELS {
        return Err(format!(
            "{}x{} output exceeds the {} pixel limit",
            width, height, DEFAULT_MAX_OUTPUT_PIXELS
        ));
    }
    Ok(())
}
