//! WASM bindings for image transformation operations.
//!
//! Reorientation and crop, as used by the preview and the export pipeline.

use crate::types::JsDecodedImage;
use pixelfit_core::decode::Orientation;
use pixelfit_core::transform::{apply_crop as core_crop, apply_orientation as core_orient};
use wasm_bindgen::prelude::*;

/// Re-render an image upright for an EXIF orientation tag.
///
/// Tags 5-8 swap width and height. Unknown tags leave the image unchanged.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const upright = apply_orientation(decode_image(bytes), decode_orientation(bytes));
/// ```
#[wasm_bindgen]
pub fn apply_orientation(image: &JsDecodedImage, orientation: u8) -> JsDecodedImage {
    let result = core_orient(image.to_decoded(), Orientation::from(u32::from(orientation)));
    JsDecodedImage::from_decoded(result)
}

/// Apply crop to an image using normalized coordinates.
///
/// Coordinates are in the range [0, 1], where (0, 0) is the top-left corner
/// and (1, 1) is the bottom-right corner.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Crop the center 50% of the image
/// const cropped = apply_crop(sourceImage, 0.25, 0.25, 0.5, 0.5);
/// ```
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsDecodedImage,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> JsDecodedImage {
    let result = core_crop(&image.to_decoded(), left, top, width, height);
    JsDecodedImage::from_decoded(result)
}
