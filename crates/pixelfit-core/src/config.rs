//! Service and compressor configuration.
//!
//! Both structs deserialize from partial objects: any missing field takes
//! its default, so a JS caller can pass `{}` or override a single knob.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::geometry::DEFAULT_DPI;

/// Largest output surface a service will allocate, about 150 MB of RGB.
pub const DEFAULT_MAX_OUTPUT_PIXELS: u64 = 50_000_000;

/// Configuration errors, reported when a service is set up.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Quality band must satisfy 0 < low < high < 1, got [{low}, {high}]")]
    InvalidQualityBand { low: f64, high: f64 },

    #[error("Tolerance must be a non-negative fraction below 1, got {0}")]
    InvalidTolerance(f64),

    #[error("Shrink factor must be in (0, 1), got {0}")]
    InvalidShrinkFactor(f64),

    #[error("Fallback quality must be in (0, 1], got {0}")]
    InvalidFallbackQuality(f64),

    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),

    #[error("Default DPI must be positive, got {0}")]
    InvalidDpi(f64),
}

/// Tuning for the target-size search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorConfig {
    /// Lower bound of the quality search band (exclusive of 0).
    pub quality_low: f64,
    /// Upper bound of the quality search band (exclusive of 1).
    pub quality_high: f64,
    /// Acceptable relative deviation from the target size.
    pub tolerance: f64,
    /// Bisection steps per resolution round.
    pub max_iterations: u32,
    /// Resolution rounds, including the first at full size.
    pub max_rounds: u32,
    /// Encode calls allowed across all rounds.
    pub max_attempts: u32,
    /// Per-axis scale applied for each fallback round.
    pub shrink_factor: f64,
    /// Quality used when the encoder keeps failing.
    pub fallback_quality: f64,
    /// Filter used when shrinking between rounds.
    pub shrink_filter: FilterType,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            quality_low: 0.05,
            quality_high: 0.95,
            tolerance: 0.03,
            max_iterations: 8,
            max_rounds: 8,
            max_attempts: 18,
            shrink_factor: 0.85,
            fallback_quality: 0.92,
            shrink_filter: FilterType::Bilinear,
        }
    }
}

impl CompressorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (low, high) = (self.quality_low, self.quality_high);
        if !(low > 0.0 && low < high && high < 1.0) {
            return Err(ConfigError::InvalidQualityBand { low, high });
        }
        if !(0.0..1.0).contains(&self.tolerance) {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if !(self.shrink_factor > 0.0 && self.shrink_factor < 1.0) {
            return Err(ConfigError::InvalidShrinkFactor(self.shrink_factor));
        }
        if !(self.fallback_quality > 0.0 && self.fallback_quality <= 1.0) {
            return Err(ConfigError::InvalidFallbackQuality(self.fallback_quality));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroLimit("max_iterations"));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroLimit("max_rounds"));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroLimit("max_attempts"));
        }
        Ok(())
    }
}

/// Configuration for an `ImageService`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Re-render sources upright according to their EXIF orientation.
    pub auto_orient: bool,
    /// Resolution used for physical units when neither request nor source has one.
    pub default_dpi: f64,
    /// Filter used when resizing to the requested dimensions.
    pub resize_filter: FilterType,
    /// Requests resolving to more pixels than this are rejected.
    pub max_output_pixels: u64,
    pub compressor: CompressorConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            auto_orient: true,
            default_dpi: DEFAULT_DPI,
            resize_filter: FilterType::Lanczos3,
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
            compressor: CompressorConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.default_dpi.is_finite() && self.default_dpi > 0.0) {
            return Err(ConfigError::InvalidDpi(self.default_dpi));
        }
        if self.max_output_pixels == 0 {
            return Err(ConfigError::ZeroLimit("max_output_pixels"));
        }
        self.compressor.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CompressorConfig::default().validate().is_ok());
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut config = CompressorConfig::default();
        config.quality_low = 0.9;
        config.quality_high = 0.2;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidQualityBand {
                low: 0.9,
                high: 0.2
            })
        );
    }

    #[test]
    fn test_closed_band_rejected() {
        let mut config = CompressorConfig::default();
        config.quality_low = 0.0;
        assert!(config.validate().is_err());

        let mut config = CompressorConfig::default();
        config.quality_high = 1.0;
        assert!(config.validate().is_err());

        let mut config = CompressorConfig::default();
        config.quality_low = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_limits_rejected() {
        let mut config = CompressorConfig::default();
        config.max_attempts = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLimit("max_attempts")));

        let mut config = CompressorConfig::default();
        config.shrink_factor = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidShrinkFactor(_))
        ));

        let mut config = CompressorConfig::default();
        config.tolerance = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_service_dpi_rejected() {
        let mut config = ServiceConfig::default();
        config.default_dpi = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidDpi(0.0)));
    }

    #[test]
    fn test_output_cap_required() {
        let mut config = ServiceConfig::default();
        config.max_output_pixels = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroLimit("max_output_pixels"))
        );
        assert_eq!(
            ServiceConfig::default().max_output_pixels,
            DEFAULT_MAX_OUTPUT_PIXELS
        );
    }
}
