//! Pixelfit WASM - WebAssembly bindings for Pixelfit
//!
//! This crate exposes the pixelfit-core functionality to the Web Worker that
//! resizes, crops and compresses uploads in the browser.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and results
//! - `decode` - Decoding, EXIF orientation and resize bindings
//! - `encode` - Single encodes and target-size compression
//! - `transform` - Reorientation and crop
//! - `geometry` - Target dimension resolution and output naming
//! - `session` - The stateful `JsEditSession` pipeline
//! - `logger` - Routes core logging to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@pixelfit/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession(undefined);
//! session.load(new Uint8Array(await file.arrayBuffer()), file.name);
//! const output = session.process({ mime: 'image/webp', target_bytes: 150_000 });
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod geometry;
mod logger;
mod session;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_image, decode_orientation, read_metadata, resize};
pub use encode::{compress_to_target, encode_image};
pub use geometry::{output_file_name, resolve_target_dims};
pub use session::JsEditSession;
pub use transform::{apply_crop, apply_orientation};
pub use types::{JsCompressionResult, JsDecodedImage, JsProcessOutput};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(logger::default_level());
    log::debug!("pixelfit-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    pixelfit_core::VERSION.to_string()
}

/// Change the console log level (`off`, `error`, `warn`, `info`, `debug` or `trace`).
///
/// # Errors
///
/// Returns an error for an unknown level name.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    log::set_max_level(filter);
    Ok(())
}
