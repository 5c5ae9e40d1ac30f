//! Pixel transforms applied before resizing: upright reorientation and crop.
//!
//! # Transform Order
//!
//! When processing an upload, transforms are applied in this order:
//! 1. EXIF reorientation
//! 2. Crop
//! 3. Resize to the resolved target dimensions
//! 4. Target-size compression
//!
//! # Coordinate System
//!
//! - Crop coordinates are normalized (0.0 to 1.0) relative to the upright image
//! - Origin is top-left corner

mod crop;
mod orientation;

pub use crop::{apply_crop, CropRect};
pub use orientation::apply_orientation;
