//! Target dimension resolution.
//!
//! Turns a user's size request (pixels, percentages, longest side or a
//! physical size) into concrete output pixel dimensions for a given source.

use serde::{Deserialize, Serialize};

/// Resolution assumed when the request and the source carry none.
pub const DEFAULT_DPI: f64 = 96.0;

const CM_PER_INCH: f64 = 2.54;

/// Unit of a resize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeUnit {
    /// Absolute pixels per axis.
    #[default]
    Pixels,
    /// Percentage of the source dimension.
    Percent,
    /// Target length of the source's longest side, in pixels.
    Longest,
    /// Centimetres, converted through the resolution.
    #[serde(alias = "cm")]
    Centimeters,
    /// Inches, converted through the resolution.
    #[serde(alias = "in")]
    Inches,
}

/// A size request as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySpec {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub unit: ResizeUnit,
    /// Resolution for physical units; falls back to the source's, then 96.
    pub dpi: Option<f64>,
}

impl GeometrySpec {
    pub fn new(width: Option<f64>, height: Option<f64>, unit: ResizeUnit) -> Self {
        Self {
            width,
            height,
            unit,
            dpi: None,
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Resolve against a source of `source_width x source_height`.
    pub fn resolve(&self, source_width: u32, source_height: u32) -> (u32, u32) {
        resolve_target_dims(
            self.width,
            self.height,
            self.unit,
            source_width,
            source_height,
            self.dpi,
        )
    }
}

/// Compute output dimensions for a resize request.
///
/// - `Pixels`: values are used verbatim; a missing axis keeps the source size.
/// - `Percent`: two values scale their own axis; a single value scales both
///   axes uniformly.
/// - `Longest`: the first given value becomes the longest source side and the
///   other side follows the aspect ratio.
/// - `Centimeters`/`Inches`: converted with `dpi` (96 when missing or
///   invalid); a missing axis keeps the source size.
///
/// Every result is rounded and clamped to at least one pixel.
pub fn resolve_target_dims(
    width: Option<f64>,
    height: Option<f64>,
    unit: ResizeUnit,
    source_width: u32,
    source_height: u32,
    dpi: Option<f64>,
) -> (u32, u32) {
    let (sw, sh) = (source_width as f64, source_height as f64);

    let (w, h) = match unit {
        ResizeUnit::Pixels => (width.unwrap_or(sw), height.unwrap_or(sh)),
        ResizeUnit::Percent => match (width, height) {
            (Some(pw), Some(ph)) => (sw * pw / 100.0, sh * ph / 100.0),
            (Some(p), None) | (None, Some(p)) => (sw * p / 100.0, sh * p / 100.0),
            (None, None) => (sw, sh),
        },
        ResizeUnit::Longest => match width.or(height) {
            Some(target) => {
                let longest = sw.max(sh);
                if longest > 0.0 {
                    let ratio = target / longest;
                    (sw * ratio, sh * ratio)
                } else {
                    (target, target)
                }
            }
            None => (sw, sh),
        },
        ResizeUnit::Centimeters | ResizeUnit::Inches => {
            let per_unit = match unit {
                ResizeUnit::Centimeters => effective_dpi(dpi) / CM_PER_INCH,
                _ => effective_dpi(dpi),
            };
            (
                width.map_or(sw, |v| v * per_unit),
                height.map_or(sh, |v| v * per_unit),
            )
        }
    };

    (to_pixels(w), to_pixels(h))
}

/// The resolution to use for physical units.
pub fn effective_dpi(dpi: Option<f64>) -> f64 {
    match dpi {
        Some(d) if d.is_finite() && d > 0.0 => d,
        _ => DEFAULT_DPI,
    }
}

fn to_pixels(value: f64) -> u32 {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= 1.0 {
        rounded.min(u32::MAX as f64) as u32
    } else {
        1
    }
}
