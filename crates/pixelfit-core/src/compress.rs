//! Target-size compression.
//!
//! Finds an encoding whose byte size lands close to a requested budget.
//!
//! # Algorithm
//!
//! 1. Lossless output, or no target, is encoded once at full quality.
//! 2. Otherwise the quality scalar is bisected inside an open band
//!    `(quality_low, quality_high)`: an output over the target lowers the
//!    upper bound, anything else raises the lower bound. The candidate
//!    closest to the target is kept throughout.
//! 3. If a round ends outside tolerance and the best candidate is still too
//!    large, the original surface is resampled by `shrink_factor^round` and
//!    the search continues. Fallback rounds first probe at `quality_low`
//!    and shrink again straight away if even that is too large.
//! 4. The best candidate of all rounds is returned, met or not.
//!
//! All rounds share one attempt budget, so the number of encodes is
//! bounded by `max_attempts`, plus one if the failure fallback runs.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CompressorConfig;
use crate::decode::{scale_by, DecodedImage};
use crate::encode::{EncodeError, Encoder, MimeType};

/// Quality used when no search takes place.
pub const MAX_QUALITY: f64 = 1.0;

/// Consecutive encoder failures treated as systemic.
const FAILURE_LIMIT: u32 = 2;

/// Errors from target-size compression.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("Cannot compress an empty image")]
    EmptyImage,

    #[error("Encoder failed: {0}")]
    EncodeFailed(#[from] EncodeError),
}

/// What to produce.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionRequest {
    pub mime: MimeType,
    /// Byte budget; `None` or 0 disables the search.
    pub target_bytes: Option<u64>,
    /// Acceptable relative deviation; the configured tolerance when `None`.
    pub tolerance: Option<f64>,
}

impl CompressionRequest {
    pub fn new(mime: MimeType, target_bytes: Option<u64>) -> Self {
        Self {
            mime,
            target_bytes,
            tolerance: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}

/// The encoded output and how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub bytes: Vec<u8>,
    pub achieved_bytes: usize,
    /// Dimensions of the surface that produced `bytes`.
    pub width: u32,
    pub height: u32,
    /// Quality scalar in `[0, 1]` that produced `bytes`.
    pub quality: f64,
    /// Encoder calls made, including failed ones.
    pub attempts: u32,
    /// Whether a target was given and the output is within tolerance of it.
    pub within_tolerance: bool,
    /// Whether the result came from the encoder-failure fallback.
    pub fallback: bool,
}

/// Encode `image` as close to `request.target_bytes` as the encoder allows.
///
/// # Errors
///
/// Returns `CompressError::EmptyImage` for an image without pixels, and
/// `CompressError::EncodeFailed` when the encoder fails systemically and
/// the fallback encode fails as well.
pub fn compress_to_target<E: Encoder + ?Sized>(
    encoder: &E,
    image: &DecodedImage,
    request: &CompressionRequest,
    config: &CompressorConfig,
) -> Result<CompressionResult, CompressError> {
    if image.is_empty() {
        return Err(CompressError::EmptyImage);
    }

    let tolerance = match request.tolerance {
        Some(t) if t.is_finite() && t >= 0.0 => t,
        _ => config.tolerance,
    };

    let target = match request.target_bytes {
        Some(target) if target > 0 && request.mime.is_lossy() => target,
        _ => return encode_once(encoder, image, request, tolerance),
    };

    let mut search = TargetSearch::new(encoder, request.mime, target, tolerance, config);
    let mut working: Cow<'_, DecodedImage> = Cow::Borrowed(image);

    for round in 0..config.max_rounds {
        if round > 0 {
            if !search.can_continue() || (working.width, working.height) == (1, 1) {
                break;
            }
            let factor = config.shrink_factor.powi(round as i32);
            let shrunk = match scale_by(image, factor, config.shrink_filter) {
                Ok(shrunk) => shrunk,
                Err(e) => {
                    log::warn!("Stopping downscale fallback: {}", e);
                    break;
                }
            };
            // Small surfaces can round to the same size for several rounds
            if (shrunk.width, shrunk.height) == (working.width, working.height) {
                continue;
            }
            log::debug!(
                "Round {}: shrinking to {}x{}",
                round,
                shrunk.width,
                shrunk.height
            );
            working = Cow::Owned(shrunk);

            // An under-target probe confirms the band's lower bound
            match search.attempt(&working, config.quality_low) {
                Step::Over => continue,
                Step::Under if search.converged() => break,
                _ => {}
            }
        }

        search.bisect(&working);

        if !search.can_continue() || search.converged() || !search.best_over_target() {
            break;
        }
    }

    search.finish(image)
}

fn encode_once<E: Encoder + ?Sized>(
    encoder: &E,
    image: &DecodedImage,
    request: &CompressionRequest,
    tolerance: f64,
) -> Result<CompressionResult, CompressError> {
    let bytes = encoder.encode(image, request.mime, MAX_QUALITY)?;
    if bytes.is_empty() {
        return Err(EncodeError::EncodingFailed("encoder returned no data".to_string()).into());
    }

    let within_tolerance = request
        .target_bytes
        .filter(|&t| t > 0)
        .is_some_and(|t| relative_distance(bytes.len(), t) <= tolerance);

    log::info!(
        "Encoded {}x{} {} once: {} bytes",
        image.width,
        image.height,
        request.mime,
        bytes.len()
    );

    Ok(CompressionResult {
        achieved_bytes: bytes.len(),
        bytes,
        width: image.width,
        height: image.height,
        quality: MAX_QUALITY,
        attempts: 1,
        within_tolerance,
        fallback: false,
    })
}

fn relative_distance(size: usize, target: u64) -> f64 {
    (size as u64).abs_diff(target) as f64 / target as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Over,
    Under,
    Failed,
}

#[derive(Debug)]
struct Candidate {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    quality: f64,
}

/// Search state shared by every round of one compression.
struct TargetSearch<'a, E: ?Sized> {
    encoder: &'a E,
    mime: MimeType,
    target: u64,
    tolerance: f64,
    config: &'a CompressorConfig,
    attempts: u32,
    consecutive_failures: u32,
    best: Option<Candidate>,
}

impl<'a, E: Encoder + ?Sized> TargetSearch<'a, E> {
    fn new(
        encoder: &'a E,
        mime: MimeType,
        target: u64,
        tolerance: f64,
        config: &'a CompressorConfig,
    ) -> Self {
        Self {
            encoder,
            mime,
            target,
            tolerance,
            config,
            attempts: 0,
            consecutive_failures: 0,
            best: None,
        }
    }

    /// Budget remains and the encoder has not failed systemically.
    fn can_continue(&self) -> bool {
        self.attempts < self.config.max_attempts && self.consecutive_failures < FAILURE_LIMIT
    }

    fn converged(&self) -> bool {
        self.best
            .as_ref()
            .is_some_and(|b| relative_distance(b.bytes.len(), self.target) <= self.tolerance)
    }

    fn best_over_target(&self) -> bool {
        self.best
            .as_ref()
            .is_some_and(|b| b.bytes.len() as u64 > self.target)
    }

    fn attempt(&mut self, image: &DecodedImage, quality: f64) -> Step {
        self.attempts += 1;

        let bytes = match self.encoder.encode(image, self.mime, quality) {
            Ok(bytes) if !bytes.is_empty() => bytes,
            Ok(_) => {
                self.consecutive_failures += 1;
                log::warn!("Encoder returned no data at quality {:.3}", quality);
                return Step::Failed;
            }
            Err(e) => {
                self.consecutive_failures += 1;
                log::warn!("Encode at quality {:.3} failed: {}", quality, e);
                return Step::Failed;
            }
        };
        self.consecutive_failures = 0;

        let size = bytes.len();
        log::debug!(
            "Attempt {}: {}x{} at quality {:.3} -> {} bytes (target {})",
            self.attempts,
            image.width,
            image.height,
            quality,
            size,
            self.target
        );

        let step = if size as u64 > self.target {
            Step::Over
        } else {
            Step::Under
        };
        self.consider(Candidate {
            bytes,
            width: image.width,
            height: image.height,
            quality,
        });
        step
    }

    /// Keep the candidate closest to the target; the first one wins ties.
    fn consider(&mut self, candidate: Candidate) {
        let target = self.target;
        let distance = |c: &Candidate| (c.bytes.len() as u64).abs_diff(target);
        let better = match &self.best {
            Some(best) => distance(&candidate) < distance(best),
            None => true,
        };
        if better {
            self.best = Some(candidate);
        }
    }

    /// One bisection round over the configured band.
    fn bisect(&mut self, image: &DecodedImage) {
        let (mut low, mut high) = (self.config.quality_low, self.config.quality_high);

        for _ in 0..self.config.max_iterations {
            if !self.can_continue() || self.converged() {
                break;
            }
            let quality = (low + high) / 2.0;
            match self.attempt(image, quality) {
                Step::Over => high = quality,
                Step::Under => low = quality,
                Step::Failed => {}
            }
        }
    }

    fn finish(mut self, original: &DecodedImage) -> Result<CompressionResult, CompressError> {
        if self.consecutive_failures >= FAILURE_LIMIT || self.best.is_none() {
            return self.fallback(original);
        }

        let within_tolerance = self.converged();
        let attempts = self.attempts;
        let Some(best) = self.best.take() else {
            return self.fallback(original);
        };

        log::info!(
            "Compressed to {} bytes at {}x{} (target {}, quality {:.3}, {} attempts{})",
            best.bytes.len(),
            best.width,
            best.height,
            self.target,
            best.quality,
            attempts,
            if within_tolerance { "" } else { ", outside tolerance" }
        );

        Ok(CompressionResult {
            achieved_bytes: best.bytes.len(),
            bytes: best.bytes,
            width: best.width,
            height: best.height,
            quality: best.quality,
            attempts,
            within_tolerance,
            fallback: false,
        })
    }

    /// Single encode at the fallback quality after systemic encoder failure.
    fn fallback(self, original: &DecodedImage) -> Result<CompressionResult, CompressError> {
        let quality = self.config.fallback_quality;
        let attempts = self.attempts + 1;
        log::warn!(
            "Encoder failed {} times in a row; falling back to quality {:.2}",
            self.consecutive_failures,
            quality
        );

        let encoded = self
            .encoder
            .encode(original, self.mime, quality)
            .and_then(|bytes| {
                if bytes.is_empty() {
                    Err(EncodeError::EncodingFailed(
                        "encoder returned no data".to_string(),
                    ))
                } else {
                    Ok(bytes)
                }
            });

        match encoded {
            Ok(bytes) => Ok(CompressionResult {
                achieved_bytes: bytes.len(),
                within_tolerance: relative_distance(bytes.len(), self.target) <= self.tolerance,
                bytes,
                width: original.width,
                height: original.height,
                quality,
                attempts,
                fallback: true,
            }),
            Err(e) => {
                log::error!("Fallback encode failed: {}", e);
                Err(CompressError::EncodeFailed(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::encode::NativeEncoder;

    /// Encoder whose output size is `header + quality * bytes_per_pixel * pixels`.
    struct ModelEncoder {
        header: f64,
        bytes_per_pixel: f64,
        calls: Cell<u32>,
        qualities: RefCell<Vec<f64>>,
    }

    impl ModelEncoder {
        fn new(header: f64, bytes_per_pixel: f64) -> Self {
            Self {
                header,
                bytes_per_pixel,
                calls: Cell::new(0),
                qualities: RefCell::new(Vec::new()),
            }
        }
    }

    impl Encoder for ModelEncoder {
        fn encode(
            &self,
            image: &DecodedImage,
            _mime: MimeType,
            quality: f64,
        ) -> Result<Vec<u8>, EncodeError> {
            self.calls.set(self.calls.get() + 1);
            self.qualities.borrow_mut().push(quality);
            let size = self.header + quality * self.bytes_per_pixel * image.pixel_count() as f64;
            Ok(vec![0u8; size.round().max(1.0) as usize])
        }
    }

    /// Encoder that fails on the listed call indices and otherwise returns 1000 bytes.
    struct FlakyEncoder {
        failing_calls: Vec<u32>,
        empty_instead_of_error: bool,
        calls: Cell<u32>,
    }

    impl FlakyEncoder {
        fn failing(failing_calls: Vec<u32>) -> Self {
            Self {
                failing_calls,
                empty_instead_of_error: false,
                calls: Cell::new(0),
            }
        }
    }

    impl Encoder for FlakyEncoder {
        fn encode(
            &self,
            _image: &DecodedImage,
            _mime: MimeType,
            _quality: f64,
        ) -> Result<Vec<u8>, EncodeError> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            if self.failing_calls.contains(&call) {
                if self.empty_instead_of_error {
                    return Ok(Vec::new());
                }
                return Err(EncodeError::EncodingFailed("simulated".to_string()));
            }
            Ok(vec![0u8; 1000])
        }
    }

    fn flat_image(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![90u8; (width * height * 3) as usize])
    }

    fn textured_gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(((x * 7) ^ (y * 13)) as u8);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_no_target_encodes_once() {
        let img = flat_image(32, 32);
        for mime in [MimeType::Jpeg, MimeType::Webp, MimeType::Png] {
            let encoder = ModelEncoder::new(100.0, 1.0);
            let request = CompressionRequest::new(mime, None);
            let result =
                compress_to_target(&encoder, &img, &request, &CompressorConfig::default()).unwrap();
            assert_eq!(result.attempts, 1);
            assert_eq!(encoder.calls.get(), 1);
            assert_eq!(result.quality, MAX_QUALITY);
            assert!(!result.within_tolerance);
        }
    }

    #[test]
    fn test_zero_target_encodes_once() {
        let encoder = ModelEncoder::new(100.0, 1.0);
        let request = CompressionRequest::new(MimeType::Jpeg, Some(0));
        let result =
            compress_to_target(&encoder, &flat_image(8, 8), &request, &Default::default()).unwrap();
        assert_eq!(result.attempts, 1);
    }

    #[test]
    fn test_png_skips_search() {
        let img = textured_gradient(40, 30);
        let request = CompressionRequest::new(MimeType::Png, Some(500));
        let result =
            compress_to_target(&NativeEncoder, &img, &request, &Default::default()).unwrap();

        assert_eq!(result.attempts, 1);
        assert_eq!(result.achieved_bytes, result.bytes.len());
        assert_eq!(&result.bytes[1..4], b"PNG");
        assert_eq!((result.width, result.height), (40, 30));
    }

    #[test]
    fn test_bisection_converges() {
        // 100x100: sizes span 600..=9600 over the band
        let encoder = ModelEncoder::new(100.0, 1.0);
        let request = CompressionRequest::new(MimeType::Jpeg, Some(5000)).with_tolerance(0.03);
        let result =
            compress_to_target(&encoder, &flat_image(100, 100), &request, &Default::default())
                .unwrap();

        assert!(result.within_tolerance);
        assert!(relative_distance(result.achieved_bytes, 5000) <= 0.03);
        assert_eq!((result.width, result.height), (100, 100));
        assert!(result.attempts <= 8);
        assert!(!result.fallback);
    }

    #[test]
    fn test_qualities_stay_inside_open_band() {
        let encoder = ModelEncoder::new(0.0, 1.0);
        // Unreachable target forces the full search
        let request = CompressionRequest::new(MimeType::Jpeg, Some(1)).with_tolerance(0.0);
        let config = CompressorConfig::default();
        compress_to_target(&encoder, &flat_image(64, 64), &request, &config).unwrap();

        for &q in encoder.qualities.borrow().iter() {
            assert!(q > 0.0 && q < 1.0, "quality {} left the band", q);
            assert!(q >= config.quality_low && q <= config.quality_high);
        }
    }

    #[test]
    fn test_under_target_raises_quality() {
        let encoder = ModelEncoder::new(100.0, 1.0);
        // Target above anything reachable: every attempt is under
        let request = CompressionRequest::new(MimeType::Jpeg, Some(1_000_000));
        let result =
            compress_to_target(&encoder, &flat_image(10, 10), &request, &Default::default())
                .unwrap();

        let qualities = encoder.qualities.borrow();
        assert!(qualities.windows(2).all(|w| w[1] > w[0]));
        // Under target means no downscaling
        assert_eq!((result.width, result.height), (10, 10));
        assert_eq!(result.attempts, 8);
        assert!(!result.within_tolerance);
    }

    #[test]
    fn test_downscale_fallback_when_min_quality_too_large() {
        // Even at quality_low the full-size output is 0.25 * pixels bytes
        let encoder = ModelEncoder::new(0.0, 1.0);
        let mut config = CompressorConfig::default();
        config.quality_low = 0.25;
        let img = flat_image(100, 100);
        let target = 1000; // needs the area to fall to 40%
        let request = CompressionRequest::new(MimeType::Jpeg, Some(target));
        let result = compress_to_target(&encoder, &img, &request, &config).unwrap();

        assert!(result.width < 100 && result.height < 100);
        assert!(result.attempts <= config.max_attempts);
        // Closer than the best possible full-size encode
        let full_size_min = (0.25 * 10_000.0) as u64;
        assert!((result.achieved_bytes as u64).abs_diff(target) < full_size_min - target);
    }

    #[test]
    fn test_attempt_budget_is_shared_across_rounds() {
        let encoder = ModelEncoder::new(0.0, 1.0);
        let mut config = CompressorConfig::default();
        config.max_attempts = 10;
        // Never reachable: every round stays over target
        let request = CompressionRequest::new(MimeType::Jpeg, Some(1)).with_tolerance(0.0);
        let result = compress_to_target(&encoder, &flat_image(200, 200), &request, &config).unwrap();

        assert_eq!(result.attempts, 10);
        assert_eq!(encoder.calls.get(), 10);
    }

    #[test]
    fn test_shrinking_stops_at_one_pixel() {
        let encoder = ModelEncoder::new(0.0, 100.0);
        let mut config = CompressorConfig::default();
        config.max_attempts = 1000;
        config.max_rounds = 1000;
        let request = CompressionRequest::new(MimeType::Jpeg, Some(1)).with_tolerance(0.0);
        let result = compress_to_target(&encoder, &flat_image(4, 4), &request, &config).unwrap();

        assert_eq!((result.width, result.height), (1, 1));
        assert!(result.attempts < 100);
    }

    #[test]
    fn test_single_failure_is_skipped() {
        let encoder = FlakyEncoder::failing(vec![0]);
        let request = CompressionRequest::new(MimeType::Jpeg, Some(1000));
        let result =
            compress_to_target(&encoder, &flat_image(10, 10), &request, &Default::default())
                .unwrap();

        assert!(!result.fallback);
        assert!(result.within_tolerance);
        assert_eq!(result.attempts, 2);
    }

    #[test]
    fn test_two_failures_trigger_fallback() {
        let encoder = FlakyEncoder::failing(vec![0, 1]);
        let config = CompressorConfig::default();
        let request = CompressionRequest::new(MimeType::Jpeg, Some(5000));
        let result = compress_to_target(&encoder, &flat_image(10, 10), &request, &config).unwrap();

        assert!(result.fallback);
        assert_eq!(result.quality, config.fallback_quality);
        assert_eq!(result.attempts, 3);
        assert_eq!(result.achieved_bytes, 1000);
        assert!(!result.within_tolerance);
    }

    #[test]
    fn test_empty_outputs_count_as_failures() {
        let encoder = FlakyEncoder {
            failing_calls: vec![0, 1],
            empty_instead_of_error: true,
            calls: Cell::new(0),
        };
        let request = CompressionRequest::new(MimeType::Webp, Some(5000));
        let result =
            compress_to_target(&encoder, &flat_image(10, 10), &request, &Default::default())
                .unwrap();
        assert!(result.fallback);
    }

    #[test]
    fn test_persistent_failure_is_reported() {
        let encoder = FlakyEncoder::failing((0..100).collect());
        let request = CompressionRequest::new(MimeType::Jpeg, Some(5000));
        let result =
            compress_to_target(&encoder, &flat_image(10, 10), &request, &Default::default());
        assert!(matches!(result, Err(CompressError::EncodeFailed(_))));
    }

    #[test]
    fn test_empty_image_rejected() {
        let request = CompressionRequest::new(MimeType::Jpeg, Some(5000));
        let result = compress_to_target(
            &NativeEncoder,
            &DecodedImage::new(0, 0, vec![]),
            &request,
            &Default::default(),
        );
        assert!(matches!(result, Err(CompressError::EmptyImage)));
    }

    #[test]
    fn test_first_candidate_wins_ties() {
        let encoder = ModelEncoder::new(0.0, 1.0);
        let config = CompressorConfig::default();
        let mut search = TargetSearch::new(&encoder, MimeType::Jpeg, 100, 0.0, &config);
        let candidate = |len: usize, quality: f64| Candidate {
            bytes: vec![0u8; len],
            width: 1,
            height: 1,
            quality,
        };

        search.consider(candidate(90, 0.1));
        search.consider(candidate(110, 0.2));
        assert_eq!(search.best.as_ref().map(|b| b.quality), Some(0.1));

        search.consider(candidate(105, 0.3));
        assert_eq!(search.best.as_ref().map(|b| b.quality), Some(0.3));
    }

    #[test]
    fn test_fallback_round_bisects_above_probe() {
        let encoder = ModelEncoder::new(0.0, 1.0);
        let mut config = CompressorConfig::default();
        config.quality_low = 0.25;
        let request = CompressionRequest::new(MimeType::Jpeg, Some(1000));
        compress_to_target(&encoder, &flat_image(100, 100), &request, &config).unwrap();

        // Round 0 spends 8 attempts over target, 85x85 and 72x72 are over
        // even at quality_low, 61x61 lands under at quality_low (930 bytes)
        let qualities = encoder.qualities.borrow();
        assert_eq!(qualities[8..11], [0.25, 0.25, 0.25]);
        assert_eq!(qualities[11], (config.quality_low + config.quality_high) / 2.0);
        assert!(qualities[12..].iter().all(|&q| q > 0.25 && q < 0.6));
    }

    #[test]
    fn test_native_gradient_reaches_target() {
        let img = textured_gradient(256, 256);
        let config = CompressorConfig::default();
        let request = CompressionRequest::new(MimeType::Jpeg, Some(20_000)).with_tolerance(0.03);
        let result = compress_to_target(&NativeEncoder, &img, &request, &config).unwrap();

        assert!(result.attempts <= config.max_attempts);
        assert_eq!(&result.bytes[0..2], &[0xFF, 0xD8]);
        if result.within_tolerance {
            assert!(relative_distance(result.achieved_bytes, 20_000) <= 0.03);
        }

        // Downscaling never ends further from the target than full resolution
        let full_only = CompressorConfig {
            max_rounds: 1,
            ..config.clone()
        };
        let full = compress_to_target(&NativeEncoder, &img, &request, &full_only).unwrap();
        assert_eq!((full.width, full.height), (256, 256));
        let distance = |r: &CompressionResult| (r.achieved_bytes as u64).abs_diff(20_000);
        assert!(
            distance(&result) <= distance(&full),
            "got {} bytes at {}x{}, full size best {}",
            result.achieved_bytes,
            result.width,
            result.height,
            full.achieved_bytes
        );
    }

    #[test]
    fn test_native_webp_quality_reaches_smaller_target() {
        let img = textured_gradient(64, 64);
        let lossless = NativeEncoder.encode(&img, MimeType::Webp, MAX_QUALITY).unwrap();
        let target = (lossless.len() * 9 / 10) as u64;
        let request = CompressionRequest::new(MimeType::Webp, Some(target));
        let result =
            compress_to_target(&NativeEncoder, &img, &request, &Default::default()).unwrap();

        assert_eq!(&result.bytes[8..12], b"WEBP");
        assert!(result.quality < MAX_QUALITY);
        assert!(result.achieved_bytes < lossless.len());
    }
}
