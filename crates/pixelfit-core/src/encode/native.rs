//! Encoding backed by the `image` crate's codecs.
//!
//! JPEG honors the quality scalar. PNG is lossless and ignores it. The
//! `image` crate only writes lossless WebP, so WebP quality is applied by
//! reducing the number of levels per channel before encoding: fewer levels
//! compress better, and quality 1.0 keeps every pixel exact.

use std::borrow::Cow;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{EncodeError, MimeType};
use crate::decode::DecodedImage;

/// Maps a surface, a mime type and a quality scalar in `[0, 1]` to bytes.
///
/// The compressor only talks to this trait, so any encoder that produces
/// standard containers can be plugged in.
pub trait Encoder {
    fn encode(
        &self,
        image: &DecodedImage,
        mime: MimeType,
        quality: f64,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// The default encoder, built on the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEncoder;

impl Encoder for NativeEncoder {
    fn encode(
        &self,
        image: &DecodedImage,
        mime: MimeType,
        quality: f64,
    ) -> Result<Vec<u8>, EncodeError> {
        match mime {
            MimeType::Jpeg => encode_jpeg(
                &image.pixels,
                image.width,
                image.height,
                jpeg_quality(quality),
            ),
            MimeType::Png => encode_png(&image.pixels, image.width, image.height),
            MimeType::Webp => encode_webp(
                &image.pixels,
                image.width,
                image.height,
                jpeg_quality(quality),
            ),
        }
    }
}

/// Encode through any `Encoder`.
pub fn encode_image<E: Encoder + ?Sized>(
    encoder: &E,
    image: &DecodedImage,
    mime: MimeType,
    quality: f64,
) -> Result<Vec<u8>, EncodeError> {
    encoder.encode(image, mime, quality)
}

/// Map a quality scalar in `[0, 1]` to the JPEG encoder's 1-100 scale.
pub fn jpeg_quality(quality: f64) -> u8 {
    if !quality.is_finite() {
        return 100;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode packed RGB8 pixels as a baseline JPEG at `quality` (1-100).
///
/// # Errors
///
/// Returns an error if the dimensions are zero, the pixel buffer does not
/// match them, or the codec fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    let codec = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
    write_rgb(codec, pixels, width, height)?;
    Ok(out)
}

pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    write_rgb(PngEncoder::new(&mut out), pixels, width, height)?;
    Ok(out)
}

/// Encode packed RGB8 pixels as WebP at `quality` (1-100).
///
/// Below 100 the channels are posterized with [`webp_levels`] and then
/// written losslessly.
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;
    let levels = webp_levels(quality);
    let mut out = Vec::new();
    write_rgb(
        WebPEncoder::new_lossless(&mut out),
        &posterize(pixels, levels),
        width,
        height,
    )?;
    Ok(out)
}

/// Levels kept per channel at `quality` (1-100).
///
/// Quadratic, so high qualities stay close to the source while low ones
/// get coarse quickly.
pub fn webp_levels(quality: u8) -> u16 {
    if quality >= 100 {
        return 256;
    }
    let normalized = f64::from(quality.max(1)) / 100.0;
    (2.0 + normalized * normalized * 254.0).round().clamp(2.0, 256.0) as u16
}

fn posterize(pixels: &[u8], levels: u16) -> Cow<'_, [u8]> {
    if levels >= 256 {
        return Cow::Borrowed(pixels);
    }
    let step = 255.0 / f64::from(levels - 1);
    Cow::Owned(
        pixels
            .iter()
            .map(|&v| ((f64::from(v) / step).round() * step).round().clamp(0.0, 255.0) as u8)
            .collect(),
    )
}

fn write_rgb<C: ImageEncoder>(
    codec: C,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), EncodeError> {
    validate(pixels, width, height)?;
    codec
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))
}

fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * 3;
    match pixels.len() {
        actual if actual == expected => Ok(()),
        actual => Err(EncodeError::InvalidPixelData { expected, actual }),
    }
}
