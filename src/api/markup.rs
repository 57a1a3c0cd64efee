use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::api::encoding::{ImageFormat, data_uri};
use crate::error::{PlotsError, PlotsResult};

/// Optional display attributes of an embedded image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImgAttributes {
    pub alt_img: Option<String>,
    pub class_img: Option<String>,
    pub style: Option<String>,
    pub format: ImageFormat,
}

impl ImgAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt_img = Some(alt.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class_img = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }
}

/// Builds a self-closing `<img>` tag around base64 image data.
///
/// Attributes are emitted in the fixed order `src`, `alt`, `class`,
/// `style`; absent or empty ones are left out entirely, the way the
/// `if` guards of the `plots/utils.html` macro drop falsy values.
///
/// # Errors
///
/// [`PlotsError::MissingImageData`] when `data` is `None`.
pub fn render_img(data: Option<&str>, attributes: &ImgAttributes) -> PlotsResult<String> {
    let data = data.ok_or(PlotsError::MissingImageData)?;

    let mut tag = String::with_capacity(data.len() + 64);
    tag.push_str("<img src=\"");
    tag.push_str(&escape_attribute(&data_uri(data, attributes.format)));
    tag.push('"');
    for (name, value) in [
        ("alt", &attributes.alt_img),
        ("class", &attributes.class_img),
        ("style", &attributes.style),
    ] {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            tag.push(' ');
            tag.push_str(name);
            tag.push_str("=\"");
            tag.push_str(&escape_attribute(value));
            tag.push('"');
        }
    }
    tag.push_str("/>");
    Ok(tag)
}

/// Always fails with `message`; registered as the `raise` template global
/// so templates can abort rendering.
pub fn raise_helper(message: &str) -> PlotsResult<()> {
    Err(PlotsError::Raised(message.to_owned()))
}

fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '<', '>', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
