//! WASM bindings for target dimension resolution and output naming.

use pixelfit_core::geometry::{self, ResizeUnit};
use pixelfit_core::naming;
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::IntoDeserializer;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::types::parse_mime;

/// Resolve a resize request to output pixel dimensions.
///
/// `unit` is one of `pixels`, `percent`, `longest`, `centimeters` (`cm`) or
/// `inches` (`in`). Returns `[width, height]`, each at least 1.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const [w, h] = resolve_target_dims(50, undefined, 'percent', 4000, 3000, undefined);
/// // w = 2000, h = 1500
/// ```
#[wasm_bindgen]
pub fn resolve_target_dims(
    width: Option<f64>,
    height: Option<f64>,
    unit: &str,
    source_width: u32,
    source_height: u32,
    dpi: Option<f64>,
) -> Result<Vec<u32>, JsValue> {
    let unit = parse_unit(unit).map_err(|e| JsValue::from_str(&e))?;
    let (w, h) =
        geometry::resolve_target_dims(width, height, unit, source_width, source_height, dpi);
    Ok(vec![w, h])
}

/// Download name for a processed upload, e.g. `photo.png` -> `photo_resized.jpg`.
#[wasm_bindgen]
pub fn output_file_name(original: &str, mime: &str) -> Result<String, JsValue> {
    let mime = parse_mime(mime).map_err(|e| JsValue::from_str(&e))?;
    Ok(naming::output_file_name(original, mime))
}

fn parse_unit(name: &str) -> Result<ResizeUnit, String> {
    let deserializer: StrDeserializer<'_, ValueError> = name.trim().into_deserializer();
    ResizeUnit::deserialize(deserializer).map_err(|e| format!("Invalid resize unit: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("percent"), Ok(ResizeUnit::Percent));
        assert_eq!(parse_unit("cm"), Ok(ResizeUnit::Centimeters));
        assert_eq!(parse_unit("in"), Ok(ResizeUnit::Inches));
        assert_eq!(parse_unit(" longest "), Ok(ResizeUnit::Longest));
        assert!(parse_unit("furlongs").is_err());
    }

    #[test]
    fn test_resolve_percent() {
        let dims = resolve_target_dims(Some(50.0), None, "percent", 200, 100, None).unwrap();
        assert_eq!(dims, vec![100, 50]);
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("holiday.png", "image/jpeg").unwrap(),
            "holiday_resized.jpg"
        );
    }
}
