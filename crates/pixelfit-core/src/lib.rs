//! Pixelfit Core - Image resize and compression library
//!
//! This crate provides the image processing behind Pixelfit: decoding
//! uploads, EXIF reorientation, cropping, target dimension resolution and
//! compression towards a byte budget.

pub mod compress;
pub mod config;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod naming;
pub mod session;
pub mod transform;

pub use compress::{compress_to_target, CompressError, CompressionRequest, CompressionResult};
pub use config::{CompressorConfig, ConfigError, ServiceConfig};
pub use decode::{decode_image, decode_orientation, decode_source, DecodedImage, Orientation};
pub use encode::{encode_image, Encoder, MimeType, NativeEncoder};
pub use geometry::{resolve_target_dims, GeometrySpec, ResizeUnit};
pub use naming::output_file_name;
pub use session::{EditSession, ImageService, ProcessError, ProcessOutput, ProcessRequest};
pub use transform::{apply_crop, apply_orientation, CropRect};

/// Crate version, as reported to the host page.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
