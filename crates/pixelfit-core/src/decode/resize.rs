//! Resampling on top of `image::imageops`.

use super::{DecodeError, DecodedImage, FilterType};

/// Resample `image` to exactly `width x height`.
///
/// Matching dimensions return a clone without resampling.
///
/// # Errors
///
/// `InvalidFormat` for a zero target dimension, `CorruptedFile` when the
/// pixel buffer does not match the image's dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }
    if (image.width, image.height) == (width, height) {
        return Ok(image.clone());
    }

    let rgb = image.to_rgb_image().ok_or_else(|| {
        DecodeError::CorruptedFile(format!(
            "{} byte buffer for a {}x{} surface",
            image.pixels.len(),
            image.width,
            image.height
        ))
    })?;

    let resampled = image::imageops::resize(&rgb, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resampled))
}

/// Scale both axes by `factor`, rounding each and keeping at least one pixel.
pub fn scale_by(
    image: &DecodedImage,
    factor: f64,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let (width, height) = scaled_dimensions(image.width, image.height, factor);
    resize(image, width, height, filter)
}

fn scaled_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let scale = |v: u32| {
        let scaled = (v as f64 * factor).round();
        if scaled.is_finite() && scaled >= 1.0 {
            scaled.min(u32::MAX as f64) as u32
        } else {
            1
        }
    };
    (scale(width), scale(height))
}
