//! The stateful editing session exposed to the worker.
//!
//! A `JsEditSession` owns a configured service and the currently loaded
//! upload, so the page never re-sends the original file between edits.
//!
//! ```typescript
//! const session = new JsEditSession({ auto_orient: true });
//! session.load(new Uint8Array(await file.arrayBuffer()), file.name);
//!
//! const output = session.process({
//!   geometry: { width: 1920, unit: 'longest' },
//!   mime: 'image/jpeg',
//!   target_bytes: 300_000,
//! });
//! download(output.result().bytes(), output.file_name, output.mime);
//! ```

use pixelfit_core::config::ServiceConfig;
use pixelfit_core::session::{EditSession, ImageService, ProcessRequest};
use wasm_bindgen::prelude::*;

use crate::types::JsProcessOutput;

#[wasm_bindgen]
pub struct JsEditSession {
    service: ImageService,
    session: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session from a partial config object; `undefined` uses the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be read or fails validation.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: ServiceConfig = if config.is_undefined() || config.is_null() {
            ServiceConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Self::with_config(config).map_err(|e| JsValue::from_str(&e))
    }

    /// Decode an upload and make it the current source.
    ///
    /// On failure the previous source is gone as well.
    pub fn load(&mut self, bytes: &[u8], name: &str) -> Result<(), JsValue> {
        self.session
            .load(bytes, name)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    pub fn has_source(&self) -> bool {
        self.session.has_source()
    }

    /// Width of the source as processed (after auto-orientation), 0 if none.
    #[wasm_bindgen(getter)]
    pub fn source_width(&self) -> u32 {
        self.service
            .source_dimensions(&self.session)
            .map_or(0, |(w, _)| w)
    }

    /// Height of the source as processed (after auto-orientation), 0 if none.
    #[wasm_bindgen(getter)]
    pub fn source_height(&self) -> u32 {
        self.service
            .source_dimensions(&self.session)
            .map_or(0, |(_, h)| h)
    }

    /// Run the pipeline with a request object:
    /// `{ geometry?, crop?, mime?, target_bytes?, tolerance? }`.
    ///
    /// # Errors
    ///
    /// Returns an error if no image is loaded, the request is malformed, or
    /// encoding fails.
    pub fn process(&self, request: JsValue) -> Result<JsProcessOutput, JsValue> {
        let request: ProcessRequest = serde_wasm_bindgen::from_value(request)
            .map_err(|e| JsValue::from_str(&format!("Invalid request: {}", e)))?;
        self.process_request(&request)
            .map_err(|e| JsValue::from_str(&e))
    }
}

impl JsEditSession {
    fn with_config(config: ServiceConfig) -> Result<Self, String> {
        let service = ImageService::setup(config).map_err(|e| e.to_string())?;
        Ok(Self {
            service,
            session: EditSession::new(),
        })
    }

    fn process_request(&self, request: &ProcessRequest) -> Result<JsProcessOutput, String> {
        self.service
            .process(&self.session, request)
            .map(JsProcessOutput::from)
            .map_err(|e| e.to_string())
    }
}
