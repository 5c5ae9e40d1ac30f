//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Encode an image once at a given quality
//! - [`compress_to_target`] - Search for an encoding close to a byte budget
//!
//! # Example
//!
//! ```typescript
//! import { compress_to_target } from '@pixelfit/wasm';
//!
//! // Aim for 200 KB, within 3%
//! const result = compress_to_target(image, 'image/jpeg', 200_000, 0.03);
//! const blob = new Blob([result.bytes()], { type: 'image/jpeg' });
//! console.log(`${result.achieved_bytes} bytes after ${result.attempts} attempts`);
//! ```

use crate::types::{parse_mime, JsCompressionResult, JsDecodedImage};
use pixelfit_core::compress::{self, CompressionRequest};
use pixelfit_core::config::CompressorConfig;
use pixelfit_core::encode::{self, NativeEncoder};
use wasm_bindgen::prelude::*;

/// Encode an image as `mime` (`image/jpeg`, `image/webp` or `image/png`).
///
/// `quality` is a scalar in [0, 1]; only JPEG honors it.
///
/// # Errors
///
/// Returns an error for an unsupported mime type, a pixel buffer that does
/// not match the dimensions, or a codec failure.
#[wasm_bindgen]
pub fn encode_image(image: &JsDecodedImage, mime: &str, quality: f64) -> Result<Vec<u8>, JsValue> {
    let mime = parse_mime(mime).map_err(|e| JsValue::from_str(&e))?;
    encode::encode_image(&NativeEncoder, &image.to_decoded(), mime, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as close to `target_bytes` as possible.
///
/// Lowers quality first and then dimensions. With no target, or for PNG,
/// the image is encoded once at full quality. The best attempt is returned
/// even when the tolerance could not be met; check `within_tolerance`.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `mime` - Output type, e.g. `image/jpeg`
/// * `target_bytes` - Byte budget, or `undefined` for no budget
/// * `tolerance` - Acceptable relative deviation, 0.03 when `undefined`
///
/// # Errors
///
/// Returns an error for an unsupported mime type or when the encoder fails
/// on every attempt.
#[wasm_bindgen]
pub fn compress_to_target(
    image: &JsDecodedImage,
    mime: &str,
    target_bytes: Option<u32>,
    tolerance: Option<f64>,
) -> Result<JsCompressionResult, JsValue> {
    let request = build_request(mime, target_bytes, tolerance).map_err(|e| JsValue::from_str(&e))?;
    compress::compress_to_target(
        &NativeEncoder,
        &image.to_decoded(),
        &request,
        &CompressorConfig::default(),
    )
    .map(JsCompressionResult::from)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn build_request(
    mime: &str,
    target_bytes: Option<u32>,
    tolerance: Option<f64>,
) -> Result<CompressionRequest, String> {
    let mime = parse_mime(mime)?;
    Ok(CompressionRequest {
        mime,
        target_bytes: target_bytes.map(u64::from),
        tolerance,
    })
}


/// WASM-specific tests that require JsValue errors.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_image_unsupported_mime() {
        let img = JsDecodedImage::new(4, 4, vec![0u8; 48]).unwrap();
        assert!(encode_image(&img, "image/gif", 0.8).is_err());
    }

    #[wasm_bindgen_test]
    fn test_short_pixel_buffer_rejected_at_construction() {
        assert!(JsDecodedImage::new(100, 100, vec![0u8; 10]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_empty_image() {
        let img = JsDecodedImage::new(0, 0, vec![]).unwrap();
        assert!(compress_to_target(&img, "image/jpeg", Some(1000), None).is_err());
    }
}
