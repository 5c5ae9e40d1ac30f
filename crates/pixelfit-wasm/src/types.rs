//! WASM-compatible wrapper types.
//!
//! These wrap the core Pixelfit types and handle the conversion between Rust
//! and JavaScript data representations.

use pixelfit_core::compress::CompressionResult;
use pixelfit_core::decode::{DecodedImage, FilterType};
use pixelfit_core::encode::MimeType;
use pixelfit_core::session::ProcessOutput;
use wasm_bindgen::prelude::*;

/// A decoded RGB surface held in WASM memory.
///
/// Calling `pixels()` copies the buffer into a JS `Uint8Array`; keep images
/// in WASM memory between pipeline steps and only extract pixels for display.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per pixel,
    /// row-major order).
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels` is not exactly `width * height * 3` bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsDecodedImage, JsValue> {
        Self::try_new(width, height, pixels).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    /// Every `JsDecodedImage` holds a buffer matching its dimensions, so the
    /// core transforms never index past the end of it.
    pub(crate) fn try_new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(format!(
                "Expected {} bytes of RGB data for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage. This clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// The outcome of a target-size compression.
#[wasm_bindgen]
pub struct JsCompressionResult {
    inner: CompressionResult,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// Encoded file bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn achieved_bytes(&self) -> usize {
        self.inner.achieved_bytes
    }

    /// Output width, smaller than requested if the size search had to shrink.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Quality scalar in [0, 1] used for the returned bytes
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f64 {
        self.inner.quality
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.attempts
    }

    #[wasm_bindgen(getter)]
    pub fn within_tolerance(&self) -> bool {
        self.inner.within_tolerance
    }

    #[wasm_bindgen(getter)]
    pub fn fallback(&self) -> bool {
        self.inner.fallback
    }
}

impl From<CompressionResult> for JsCompressionResult {
    fn from(inner: CompressionResult) -> Self {
        Self { inner }
    }
}

/// A processed image ready for download.
#[wasm_bindgen]
pub struct JsProcessOutput {
    inner: ProcessOutput,
}

#[wasm_bindgen]
impl JsProcessOutput {
    /// Compression details and the encoded bytes.
    pub fn result(&self) -> JsCompressionResult {
        self.inner.result.clone().into()
    }

    /// Suggested download name, e.g. `holiday_resized.jpg`.
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.inner.file_name.clone()
    }

    /// Output mime type, for building a `Blob`.
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime.as_str().to_string()
    }
}

impl From<ProcessOutput> for JsProcessOutput {
    fn from(inner: ProcessOutput) -> Self {
        Self { inner }
    }
}

/// Convert a u8 filter value to the core FilterType.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Lanczos3.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        1 => FilterType::Bilinear,
        _ => FilterType::Lanczos3,
    }
}

/// Parse an `image/*` mime string from JS.
pub(crate) fn parse_mime(mime: &str) -> Result<MimeType, String> {
    mime.parse::<MimeType>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_creation() {
        let img = JsDecodedImage::new(100, 50, vec![0u8; 100 * 50 * 3]).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_mismatched_buffer_rejected() {
        let err = JsDecodedImage::try_new(10, 10, vec![0u8; 12]).err().unwrap();
        assert_eq!(err, "Expected 300 bytes of RGB data for 10x10, got 12");
        assert!(JsDecodedImage::try_new(2, 2, vec![0u8; 13]).is_err());
        assert!(JsDecodedImage::try_new(0, 0, vec![]).is_ok());
    }

    #[test]
    fn test_decoded_round_trip() {
        let decoded = DecodedImage::new(2, 1, vec![255, 128, 64, 32, 16, 8]);
        let js_img = JsDecodedImage::from_decoded(decoded.clone());
        assert_eq!(js_img.pixels(), decoded.pixels);
        assert_eq!(js_img.to_decoded(), decoded);
    }

    #[test]
    fn test_compression_result_getters() {
        let result: JsCompressionResult = CompressionResult {
            bytes: vec![1, 2, 3],
            achieved_bytes: 3,
            width: 20,
            height: 10,
            quality: 0.5,
            attempts: 4,
            within_tolerance: true,
            fallback: false,
        }
        .into();

        assert_eq!(result.bytes(), vec![1, 2, 3]);
        assert_eq!(result.achieved_bytes(), 3);
        assert_eq!((result.width(), result.height()), (20, 10));
        assert_eq!(result.quality(), 0.5);
        assert_eq!(result.attempts(), 4);
        assert!(result.within_tolerance());
        assert!(!result.fallback());
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), FilterType::Nearest);
        assert_eq!(filter_from_u8(1), FilterType::Bilinear);
        assert_eq!(filter_from_u8(2), FilterType::Lanczos3);
        assert_eq!(filter_from_u8(255), FilterType::Lanczos3);
    }

    #[test]
    fn test_parse_mime() {
        assert_eq!(parse_mime("image/webp"), Ok(MimeType::Webp));
        assert!(parse_mime("image/gif").is_err());
    }
}
