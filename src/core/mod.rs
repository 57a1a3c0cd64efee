pub mod contour;
pub mod scale;
pub mod stats;
pub mod streamline;
pub mod types;

pub use contour::{ContourBand, auto_levels, filled_bands};
pub use scale::{nice_ticks, tick_label};
pub use streamline::streamlines;
pub use types::{Bounds, Viewport};
