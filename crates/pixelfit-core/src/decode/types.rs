//! Value types shared by decoding, transforms and encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::MimeType;

/// Errors from reading an upload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Empty input, or bytes that are not JPEG, PNG or WebP.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// A recognized container whose body could not be decoded.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Malformed EXIF data. Never surfaces from `decode_orientation`.
    #[error("EXIF error: {0}")]
    ExifError(String),
}

/// Resampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    Nearest,
    /// Triangle filter; used for the compressor's intermediate shrinks.
    Bilinear,
    /// Sharpest result, used for the final resize.
    #[default]
    Lanczos3,
}

impl FilterType {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        use image::imageops::FilterType as Image;
        match self {
            FilterType::Nearest => Image::Nearest,
            FilterType::Bilinear => Image::Triangle,
            FilterType::Lanczos3 => Image::Lanczos3,
        }
    }
}

/// How the stored pixels must be transformed to display upright.
///
/// Discriminants are the EXIF `Orientation` (0x0112) tag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    MirrorX = 2,
    Rotate180 = 3,
    MirrorY = 4,
    /// Mirror across the main diagonal.
    Transpose = 5,
    Rotate90CW = 6,
    /// Mirror across the anti-diagonal.
    Transverse = 7,
    Rotate90CCW = 8,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::Normal,
        Orientation::MirrorX,
        Orientation::Rotate180,
        Orientation::MirrorY,
        Orientation::Transpose,
        Orientation::Rotate90CW,
        Orientation::Transverse,
        Orientation::Rotate90CCW,
    ];

    /// Tags 5-8 render as `height x width`.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        self.tag() >= 5
    }

    /// The orientation that undoes this one. Only the two quarter turns
    /// differ from themselves.
    pub fn inverse(self) -> Self {
        match self {
            Orientation::Rotate90CW => Orientation::Rotate90CCW,
            Orientation::Rotate90CCW => Orientation::Rotate90CW,
            other => other,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Out-of-range tag values read as `Normal`.
impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        Orientation::ALL
            .into_iter()
            .find(|o| u32::from(o.tag()) == value)
            .unwrap_or_default()
    }
}

/// What `decode_source` learned about an upload besides its pixels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Stored width, before reorientation.
    pub width: u32,
    /// Stored height, before reorientation.
    pub height: u32,
    pub orientation: Orientation,
    /// Recorded horizontal resolution, converted to dots per inch.
    pub dpi: Option<f64>,
    pub format: Option<MimeType>,
}

impl ImageMetadata {
    /// Width and height once the orientation is applied.
    pub fn oriented_dimensions(&self) -> (u32, u32) {
        match self.orientation.swaps_dimensions() {
            true => (self.height, self.width),
            false => (self.width, self.height),
        }
    }
}

/// A pixel surface: packed RGB8, row-major, `width * height * 3` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "RGB buffer does not match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgb_image(rgb: image::RgbImage) -> Self {
        let (width, height) = rgb.dimensions();
        Self {
            width,
            height,
            pixels: rgb.into_raw(),
        }
    }

    /// Copy into an `image::RgbImage`; `None` when the buffer length is wrong.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0 || self.pixels.is_empty()
    }
}

/// An uploaded image: the raw decoded surface plus what was read from its
/// metadata. Orientation is recorded but not applied.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: DecodedImage,
    pub orientation: Orientation,
    pub dpi: Option<f64>,
    pub format: Option<MimeType>,
}

impl SourceImage {
    pub fn metadata(&self) -> ImageMetadata {
        ImageMetadata {
            width: self.image.width,
            height: self.image.height,
            orientation: self.orientation,
            dpi: self.dpi,
            format: self.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_map_to_image_crate() {
        use image::imageops::FilterType as Image;
        assert_eq!(FilterType::Nearest.to_image_filter(), Image::Nearest);
        assert_eq!(FilterType::Bilinear.to_image_filter(), Image::Triangle);
        assert_eq!(FilterType::default().to_image_filter(), Image::Lanczos3);
    }

    #[test]
    fn test_orientation_from_tag() {
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(8), Orientation::Rotate90CCW);
        for invalid in [0, 9, 255, u32::MAX] {
            assert_eq!(Orientation::from(invalid), Orientation::Normal);
        }
        for orientation in Orientation::ALL {
            assert_eq!(Orientation::from(u32::from(orientation.tag())), orientation);
        }
    }

    #[test]
    fn test_only_tags_five_to_eight_swap() {
        let swapping: Vec<u8> = Orientation::ALL
            .into_iter()
            .filter(|o| o.swaps_dimensions())
            .map(Orientation::tag)
            .collect();
        assert_eq!(swapping, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_inverse_pairs() {
        assert_eq!(Orientation::Rotate90CW.inverse(), Orientation::Rotate90CCW);
        assert_eq!(Orientation::Rotate90CCW.inverse(), Orientation::Rotate90CW);
        for orientation in Orientation::ALL {
            assert_eq!(orientation.inverse().inverse(), orientation);
        }
        assert_eq!(Orientation::Transverse.inverse(), Orientation::Transverse);
    }

    #[test]
    fn test_source_metadata() {
        let source = SourceImage {
            image: DecodedImage::new(4, 2, vec![0u8; 4 * 2 * 3]),
            orientation: Orientation::Transpose,
            dpi: Some(300.0),
            format: Some(MimeType::Jpeg),
        };
        let meta = source.metadata();
        assert_eq!((meta.width, meta.height), (4, 2));
        assert_eq!(meta.oriented_dimensions(), (2, 4));
        assert_eq!(meta.dpi, Some(300.0));
    }

    #[test]
    fn test_surface_helpers() {
        let img = DecodedImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.pixel_count(), 5000);
        assert!(!img.is_empty());
        assert!(DecodedImage::new(0, 0, vec![]).is_empty());

        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(DecodedImage::from_rgb_image(rgb), img);
    }

    #[test]
    fn test_decode_error_messages() {
        let err = DecodeError::ExifError("truncated IFD".to_string());
        assert_eq!(err.to_string(), "EXIF error: truncated IFD");
        assert_eq!(
            DecodeError::InvalidFormat.to_string(),
            "Invalid or unsupported image format"
        );
    }
}
