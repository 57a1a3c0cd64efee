//! Drawing support shared by every canvas: colors, colormaps, fonts and the
//! plotters backends that turn a painted canvas into PNG or SVG bytes.

mod backend;
mod color;
mod colormap;
pub mod fonts;

pub use backend::{render_png, render_svg};
pub use color::{COLOR_CYCLE, Color};
pub use colormap::{Colormap, SUPPORTED_COLORMAPS};
