use std::str::FromStr;

use plotters::style::RGBAColor;
use serde::{Deserialize, Serialize};

use crate::error::{PlotsError, PlotsResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

/// Default property cycle (`C0`..`C9`).
pub const COLOR_CYCLE: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Returns the `index`-th color of the default cycle, wrapping around.
    #[must_use]
    pub fn cycle(index: usize) -> Self {
        COLOR_CYCLE[index % COLOR_CYCLE.len()]
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Channels quantized to 8 bits, in `[r, g, b, a]` order.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
            quantize(self.alpha),
        ]
    }

    pub fn validate(self) -> PlotsResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotsError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    fn from_hex(hex: &str) -> Option<Self> {
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
        };
        match hex.len() {
            6 => Some(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(
                Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)
                    .with_alpha(f64::from(channel(6..8)?) / 255.0),
            ),
            _ => None,
        }
    }
}

/// Accepts `#rrggbb`, `#rrggbbaa`, cycle references (`C0`..`C9`) and the
/// single-letter and common CSS color names.
impl FromStr for Color {
    type Err = PlotsError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim();
        let unknown = || PlotsError::InvalidData(format!("unknown color `{input}`"));

        if let Some(hex) = text.strip_prefix('#') {
            return Self::from_hex(hex).ok_or_else(unknown);
        }
        if let Some(index) = text.strip_prefix('C') {
            if let Ok(index) = index.parse::<usize>() {
                return Ok(Self::cycle(index));
            }
        }

        let hex = match text.to_ascii_lowercase().as_str() {
            "b" | "blue" => "0000ff",
            "g" | "green" => "008000",
            "r" | "red" => "ff0000",
            "c" | "cyan" => "00bfbf",
            "m" | "magenta" => "bf00bf",
            "y" | "yellow" => "bfbf00",
            "k" | "black" => "000000",
            "w" | "white" => "ffffff",
            "gray" | "grey" => "808080",
            "lightgray" | "lightgrey" => "d3d3d3",
            "orange" => "ffa500",
            "purple" => "800080",
            "brown" => "a52a2a",
            "pink" => "ffc0cb",
            "navy" => "000080",
            "teal" => "008080",
            _ => return Err(unknown()),
        };
        Self::from_hex(hex).ok_or_else(unknown)
    }
}

impl From<Color> for RGBAColor {
    fn from(color: Color) -> Self {
        let [red, green, blue, _] = color.to_rgba8();
        RGBAColor(red, green, blue, color.alpha.clamp(0.0, 1.0))
    }
}
