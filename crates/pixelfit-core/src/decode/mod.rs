//! Image decoding for Pixelfit.
//!
//! This module provides functionality for:
//! - Decoding uploaded JPEG, PNG and WebP files to RGB surfaces
//! - Reading the EXIF orientation tag by walking the JPEG segments directly
//! - Reading the recorded resolution (DPI) for physical-unit resizing
//! - Resampling surfaces to exact dimensions
//!
//! # Architecture
//!
//! The pipeline is designed to be used from a Web Worker via WASM bindings.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use pixelfit_core::decode::decode_source;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let source = decode_source(&bytes).unwrap();
//! println!("{}x{} {:?}", source.image.width, source.image.height, source.orientation);
//! ```

mod exif;
mod resize;
mod source;
mod types;

pub use exif::{decode_orientation, read_resolution_dpi};
pub use resize::{resize, scale_by};
pub use source::{decode_image, decode_source};
pub use types::{DecodeError, DecodedImage, FilterType, ImageMetadata, Orientation, SourceImage};

#[cfg(test)]
pub(crate) use exif::test_support;
