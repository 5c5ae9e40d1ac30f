//! Cropping with normalized coordinates.
//!
//! All crop parameters are in the range 0.0 to 1.0, relative to the image
//! being cropped, so a crop chosen on a scaled-down preview applies
//! unchanged to the full-resolution source.
//!
//! # Coordinate System
//!
//! - (0.0, 0.0) = top-left corner
//! - (1.0, 1.0) = bottom-right corner
//! - width/height are fractions of the image dimensions

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// A crop rectangle in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The rectangle covering the whole image.
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn is_full(&self) -> bool {
        self.left <= 0.0 && self.top <= 0.0 && self.width >= 1.0 && self.height >= 1.0
    }

    pub fn apply(&self, image: &DecodedImage) -> DecodedImage {
        apply_crop(image, self.left, self.top, self.width, self.height)
    }
}

impl Default for CropRect {
    fn default() -> Self {
        Self::full()
    }
}

/// Crop an image using normalized coordinates.
///
/// # Behavior
///
/// - Coordinates beyond the image bounds are clamped
/// - NaN coordinates are treated as 0
/// - Minimum output dimension is 1x1 pixels
/// - A full crop (0, 0, 1, 1) returns a copy of the original image
pub fn apply_crop(
    image: &DecodedImage,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> DecodedImage {
    if CropRect::new(left, top, width, height).is_full() || image.is_empty() {
        return image.clone();
    }

    let to_px = |fraction: f64, extent: u32| -> u32 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        (fraction * extent as f64).round() as u32
    };

    let px_left = to_px(left, image.width).min(image.width - 1);
    let px_top = to_px(top, image.height).min(image.height - 1);
    let px_right = (px_left + to_px(width, image.width)).min(image.width);
    let px_bottom = (px_top + to_px(height, image.height)).min(image.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let row_len = (out_width * 3) as usize;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    // Rows are contiguous in both buffers
    for y in px_top..px_top + out_height {
        let start = ((y * image.width + px_left) * 3) as usize;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}
