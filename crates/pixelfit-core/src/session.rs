//! The edit pipeline: a configured service and the session it operates on.
//!
//! `ImageService::setup` validates configuration once; after that a service
//! is always ready. The currently loaded upload lives in an `EditSession`
//! owned by the caller and passed to every `process` call.
//!
//! # Pipeline
//!
//! ```text
//! source -> orient -> crop -> resolve geometry -> resize -> compress -> name
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compress::{compress_to_target, CompressError, CompressionRequest, CompressionResult};
use crate::config::{ConfigError, ServiceConfig};
use crate::decode::{decode_source, resize, DecodeError, DecodedImage, SourceImage};
use crate::encode::{Encoder, MimeType, NativeEncoder};
use crate::geometry::{resolve_target_dims, GeometrySpec};
use crate::naming::output_file_name;
use crate::transform::{apply_orientation, CropRect};

/// Errors from the edit pipeline.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("No image loaded")]
    MissingSource,

    #[error("Invalid image: {0}")]
    InvalidImage(#[from] DecodeError),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// The pipeline produced a surface that could not be resampled.
    #[error("Resize failed: {0}")]
    Resize(#[source] DecodeError),

    #[error("Encoding failed: {0}")]
    Encode(#[from] CompressError),
}

impl ProcessError {
    /// Whether the error was caused by the caller's input rather than by
    /// the pipeline itself.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ProcessError::Encode(_) | ProcessError::Resize(_))
    }
}

/// An upload held by a session.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub source: SourceImage,
    /// File name as reported by the browser.
    pub name: String,
}

/// The explicit edit context: at most one loaded source.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    source: Option<LoadedSource>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and make it the session's source.
    ///
    /// The previous source is dropped even if decoding fails, so a session
    /// never keeps serving an image the user has replaced.
    pub fn load(&mut self, bytes: &[u8], name: &str) -> Result<&LoadedSource, ProcessError> {
        self.source = None;

        let source = decode_source(bytes).inspect_err(|e| {
            log::warn!("Rejected upload {:?}: {}", name, e);
        })?;

        log::info!(
            "Loaded {:?}: {}x{}, orientation {}",
            name,
            source.image.width,
            source.image.height,
            source.orientation.tag()
        );

        Ok(&*self.source.insert(LoadedSource {
            source,
            name: name.to_string(),
        }))
    }

    pub fn clear(&mut self) {
        self.source = None;
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&LoadedSource> {
        self.source.as_ref()
    }
}

/// One run of the pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessRequest {
    /// Output size; the (cropped) source size when `None`.
    pub geometry: Option<GeometrySpec>,
    /// Normalized crop applied to the upright source.
    pub crop: Option<CropRect>,
    pub mime: MimeType,
    /// Byte budget; no size search when `None`.
    pub target_bytes: Option<u64>,
    /// Relative tolerance; the configured one when `None`.
    pub tolerance: Option<f64>,
}

/// Result of a pipeline run, ready to download.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    pub result: CompressionResult,
    pub file_name: String,
    pub mime: MimeType,
}

/// A configured pipeline.
pub struct ImageService {
    config: ServiceConfig,
    encoder: Box<dyn Encoder>,
}

impl ImageService {
    /// Validate `config` and build a service using the native encoders.
    pub fn setup(config: ServiceConfig) -> Result<Self, ConfigError> {
        Self::with_encoder(config, Box::new(NativeEncoder))
    }

    /// Like `setup`, with a caller-provided encoder.
    pub fn with_encoder(config: ServiceConfig, encoder: Box<dyn Encoder>) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!("Image service ready: {:?}", config);
        Ok(Self { config, encoder })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Dimensions of the session's source as the pipeline will see them.
    pub fn source_dimensions(&self, session: &EditSession) -> Option<(u32, u32)> {
        session.source().map(|loaded| {
            let metadata = loaded.source.metadata();
            if self.config.auto_orient {
                metadata.oriented_dimensions()
            } else {
                (metadata.width, metadata.height)
            }
        })
    }

    /// Run the full pipeline on the session's source.
    ///
    /// User errors are logged at `warn`, internal failures at `error`.
    pub fn process(
        &self,
        session: &EditSession,
        request: &ProcessRequest,
    ) -> Result<ProcessOutput, ProcessError> {
        let outcome = self.run(session, request);
        if let Err(e) = &outcome {
            if e.is_user_error() {
                log::warn!("Process rejected: {}", e);
            } else {
                log::error!("Process failed: {}", e);
            }
        }
        outcome
    }

    fn run(
        &self,
        session: &EditSession,
        request: &ProcessRequest,
    ) -> Result<ProcessOutput, ProcessError> {
        let loaded = session.source().ok_or(ProcessError::MissingSource)?;
        validate_request(request)?;

        let source = &loaded.source;
        let mut image = self.upright(source);

        if let Some(crop) = request.crop.filter(|c| !c.is_full()) {
            image = crop.apply(&image);
        }

        let (width, height) = match &request.geometry {
            Some(geometry) => {
                let dpi = geometry
                    .dpi
                    .filter(is_valid_dpi)
                    .or(source.dpi.filter(is_valid_dpi))
                    .unwrap_or(self.config.default_dpi);
                resolve_target_dims(
                    geometry.width,
                    geometry.height,
                    geometry.unit,
                    image.width,
                    image.height,
                    Some(dpi),
                )
            }
            None => (image.width, image.height),
        };
        self.check_output_size(width, height)?;
        let image = resize(&image, width, height, self.config.resize_filter)
            .map_err(ProcessError::Resize)?;

        let compression = CompressionRequest {
            mime: request.mime,
            target_bytes: request.target_bytes,
            tolerance: request.tolerance,
        };
        let result = compress_to_target(
            self.encoder.as_ref(),
            &image,
            &compression,
            &self.config.compressor,
        )?;
        let file_name = output_file_name(&loaded.name, request.mime);

        log::info!(
            "Processed {:?} -> {} ({}x{}, {} bytes)",
            loaded.name,
            file_name,
            result.width,
            result.height,
            result.achieved_bytes
        );

        Ok(ProcessOutput {
            result,
            file_name,
            mime: request.mime,
        })
    }

    fn check_output_size(&self, width: u32, height: u32) -> Result<(), ProcessError> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.config.max_output_pixels {
            return Err(ProcessError::InvalidTarget(format!(
                "{}x{} output exceeds the {} pixel limit",
                width, height, self.config.max_output_pixels
            )));
        }
        Ok(())
    }

    fn upright(&self, source: &SourceImage) -> DecodedImage {
        if self.config.auto_orient {
            apply_orientation(source.image.clone(), source.orientation)
        } else {
            source.image.clone()
        }
    }
}

fn is_valid_dpi(dpi: &f64) -> bool {
    dpi.is_finite() && *dpi > 0.0
}

fn validate_request(request: &ProcessRequest) -> Result<(), ProcessError> {
    if request.target_bytes == Some(0) {
        return Err(ProcessError::InvalidTarget(
            "target size must be greater than zero".to_string(),
        ));
    }
    if let Some(tolerance) = request.tolerance {
        if !(0.0..1.0).contains(&tolerance) {
            return Err(ProcessError::InvalidTarget(format!(
                "tolerance must be in [0, 1), got {}",
                tolerance
            )));
        }
    }
    Ok(())
}
