//! Output mime types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EncodeError;

/// An output format the encoder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MimeType {
    #[default]
    #[serde(rename = "image/jpeg", alias = "image/jpg", alias = "jpeg", alias = "jpg")]
    Jpeg,
    #[serde(rename = "image/webp", alias = "webp")]
    Webp,
    #[serde(rename = "image/png", alias = "png")]
    Png,
}

impl MimeType {
    pub fn as_str(self) -> &'static str {
        match self {
            MimeType::Jpeg => "image/jpeg",
            MimeType::Webp => "image/webp",
            MimeType::Png => "image/png",
        }
    }

    /// File extension used when naming the output.
    pub fn extension(self) -> &'static str {
        match self {
            MimeType::Jpeg => "jpg",
            MimeType::Webp => "webp",
            MimeType::Png => "png",
        }
    }

    /// Whether the format trades quality for size. Only lossy formats take
    /// part in target-size search.
    pub fn is_lossy(self) -> bool {
        !matches!(self, MimeType::Png)
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MimeType {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "jpeg" | "jpg" => Ok(MimeType::Jpeg),
            "image/webp" | "webp" => Ok(MimeType::Webp),
            "image/png" | "png" => Ok(MimeType::Png),
            _ => Err(EncodeError::UnsupportedMime(s.to_string())),
        }
    }
}
