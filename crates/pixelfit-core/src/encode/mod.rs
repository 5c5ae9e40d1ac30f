//! Image encoding for Pixelfit.
//!
//! This module provides functionality for:
//! - The `Encoder` seam the target-size compressor drives
//! - A native encoder for JPEG, PNG and WebP on top of the `image` crate
//! - The `MimeType` value type used to pick an output format
//!
//! # Architecture
//!
//! The encoding pipeline is designed to be used from a Web Worker via WASM
//! bindings. All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use pixelfit_core::encode::{Encoder, MimeType, NativeEncoder};
//!
//! let bytes = NativeEncoder.encode(&image, MimeType::Jpeg, 0.8).unwrap();
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod mime;
mod native;

use thiserror::Error;

pub use mime::MimeType;
pub use native::{
    encode_image, encode_jpeg, encode_png, encode_webp, jpeg_quality, Encoder, NativeEncoder,
};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The requested output format is not supported
    #[error("Unsupported output type: {0}")]
    UnsupportedMime(String),

    /// The codec failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
