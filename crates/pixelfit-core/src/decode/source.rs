//! Decoding of uploaded files into source images.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{decode_orientation, read_resolution_dpi};
use super::{DecodeError, DecodedImage, SourceImage};
use crate::encode::MimeType;

/// Decode image bytes (JPEG, PNG or WebP) to an RGB surface.
///
/// EXIF orientation is not applied; see `decode_source` and
/// `transform::apply_orientation`.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are empty or not a
/// recognized image format.
/// Returns `DecodeError::CorruptedFile` if the image data is corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    decode_with_format(bytes).map(|(image, _)| image)
}

/// Decode an uploaded file into a `SourceImage`.
///
/// Reads the orientation tag and resolution alongside the pixels so that the
/// caller can reorient and resolve physical sizes later.
pub fn decode_source(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let (image, format) = decode_with_format(bytes)?;
    let orientation = if format == Some(MimeType::Jpeg) {
        decode_orientation(bytes)
    } else {
        Default::default()
    };
    let dpi = read_resolution_dpi(bytes);

    log::debug!(
        "Decoded {}x{} source (format {:?}, orientation {:?}, dpi {:?})",
        image.width,
        image.height,
        format,
        orientation,
        dpi
    );

    Ok(SourceImage {
        image,
        orientation,
        dpi,
        format,
    })
}

fn decode_with_format(bytes: &[u8]) -> Result<(DecodedImage, Option<MimeType>), DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = match reader.format() {
        Some(format) => format,
        None => return Err(DecodeError::InvalidFormat),
    };

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let image = DecodedImage::from_rgb_image(img.into_rgb8());
    if image.is_empty() {
        return Err(DecodeError::CorruptedFile("image has no pixels".to_string()));
    }

    Ok((image, mime_for_format(format)))
}

fn mime_for_format(format: ImageFormat) -> Option<MimeType> {
    match format {
        ImageFormat::Jpeg => Some(MimeType::Jpeg),
        ImageFormat::Png => Some(MimeType::Png),
        ImageFormat::WebP => Some(MimeType::Webp),
        _ => None,
    }
}
