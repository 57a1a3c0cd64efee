use std::fmt;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::Canvas;
use crate::error::{PlotsError, PlotsResult};
use crate::render::{render_png, render_svg};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// Subtype used in `data:image/<subtype>;base64,` URIs.
    #[must_use]
    pub fn mime_subtype(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg+xml",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = PlotsError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" | "svg+xml" => Ok(Self::Svg),
            _ => Err(PlotsError::InvalidOption {
                key: "format".to_owned(),
                expected: "\"png\" or \"svg\"",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base64Alphabet {
    /// RFC 4648 standard alphabet with padding.
    #[default]
    Standard,
    /// RFC 4648 URL- and filename-safe alphabet with padding.
    UrlSafe,
}

impl Base64Alphabet {
    #[must_use]
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Standard => general_purpose::STANDARD.encode(bytes),
            Self::UrlSafe => general_purpose::URL_SAFE.encode(bytes),
        }
    }

    pub fn decode(self, text: &str) -> PlotsResult<Vec<u8>> {
        let decoded = match self {
            Self::Standard => general_purpose::STANDARD.decode(text),
            Self::UrlSafe => general_purpose::URL_SAFE.decode(text),
        };
        decoded.map_err(|err| PlotsError::Encode(format!("invalid base64 payload: {err}")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub format: ImageFormat,
    pub alphabet: Base64Alphabet,
}

impl EncodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_alphabet(mut self, alphabet: Base64Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }
}

/// Paints `canvas` through the plotters bitmap (PNG) or SVG backend and
/// returns the image bytes.
pub fn encode_canvas<C: Canvas + ?Sized>(canvas: &C, format: ImageFormat) -> PlotsResult<Vec<u8>> {
    let bytes = match format {
        ImageFormat::Png => render_png(canvas)?,
        ImageFormat::Svg => render_svg(canvas)?,
    };
    let (width, height) = canvas.size();
    debug!(
        format = format.extension(),
        bytes = bytes.len(),
        width,
        height,
        "encoded canvas"
    );
    Ok(bytes)
}

/// `data:image/<subtype>;base64,<payload>`.
#[must_use]
pub fn data_uri(payload: &str, format: ImageFormat) -> String {
    format!("data:image/{};base64,{payload}", format.mime_subtype())
}
