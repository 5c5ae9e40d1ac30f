//! Output file naming.

use crate::encode::MimeType;

const FALLBACK_BASE: &str = "image";

/// Build the download name `{base}_resized.{ext}` for a processed upload.
///
/// The base is the original name without its directory and last extension.
/// Both `/` and `\` count as separators since browsers report either.
pub fn output_file_name(original: &str, mime: MimeType) -> String {
    let name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim();

    let base = match name.rfind('.') {
        // A leading dot is part of the name, not an extension
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    let base = if base.is_empty() { FALLBACK_BASE } else { base };

    format!("{}_resized.{}", base, mime.extension())
}
