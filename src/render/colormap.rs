//! Named sequential colormaps.
//!
//! Each map is a list of evenly spaced sRGB control stops sampled with
//! linear interpolation. Appending `_r` to a name reverses the map.

use crate::error::{PlotsError, PlotsResult};
use crate::render::Color;

/// Built-in colormap names (case-sensitive, without the `_r` suffix).
pub const SUPPORTED_COLORMAPS: &[&str] = &[
    "Greys", "Blues", "Greens", "Reds", "Oranges", "Purples", "viridis", "inferno", "plasma",
    "magma",
];

const GREYS: &[u32] = &[
    0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525, 0x000000,
];
const BLUES: &[u32] = &[
    0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
];
const GREENS: &[u32] = &[
    0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
];
const REDS: &[u32] = &[
    0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
];
const ORANGES: &[u32] = &[
    0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704,
];
const PURPLES: &[u32] = &[
    0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d,
];
const VIRIDIS: &[u32] = &[
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];
const INFERNO: &[u32] = &[
    0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06, 0xf7d13d,
    0xfcffa4,
];
const PLASMA: &[u32] = &[
    0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a, 0xfdca26,
    0xf0f921,
];
const MAGMA: &[u32] = &[
    0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f, 0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d,
    0xfcfdbf,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colormap {
    name: &'static str,
    stops: &'static [u32],
    reversed: bool,
}

impl Colormap {
    /// Resolves a colormap by name, e.g. `"Greys"` or `"viridis_r"`.
    pub fn by_name(name: &str) -> PlotsResult<Self> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let (name, stops) = match base {
            "Greys" => ("Greys", GREYS),
            "Blues" => ("Blues", BLUES),
            "Greens" => ("Greens", GREENS),
            "Reds" => ("Reds", REDS),
            "Oranges" => ("Oranges", ORANGES),
            "Purples" => ("Purples", PURPLES),
            "viridis" => ("viridis", VIRIDIS),
            "inferno" => ("inferno", INFERNO),
            "plasma" => ("plasma", PLASMA),
            "magma" => ("magma", MAGMA),
            _ => return Err(PlotsError::UnknownColormap(name.to_owned())),
        };
        Ok(Self {
            name,
            stops,
            reversed,
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn is_reversed(self) -> bool {
        self.reversed
    }

    /// Samples the map at `t`; values outside `[0, 1]` are clamped and
    /// non-finite values map to the low end.
    #[must_use]
    pub fn sample(self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let t = if self.reversed { 1.0 - t } else { t };

        let last = self.stops.len() - 1;
        let position = t * last as f64;
        let lower = (position.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        let fraction = position - lower as f64;

        let (r0, g0, b0) = channels(self.stops[lower]);
        let (r1, g1, b1) = channels(self.stops[upper]);
        let mix = |a: f64, b: f64| a + (b - a) * fraction;
        Color::rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
    }

    /// Maps `value` from `[vmin, vmax]` onto the map. A degenerate range
    /// maps everything to the middle of the map.
    #[must_use]
    pub fn sample_range(self, value: f64, vmin: f64, vmax: f64) -> Color {
        let span = vmax - vmin;
        if span.abs() <= f64::EPSILON {
            return self.sample(0.5);
        }
        self.sample((value - vmin) / span)
    }
}

fn channels(rgb: u32) -> (f64, f64, f64) {
    let byte = |shift: u32| f64::from((rgb >> shift) & 0xff) / 255.0;
    (byte(16), byte(8), byte(0))
}
