//! plots: chart drawing dispatch and inline image embedding for web pages.
//!
//! `Plots` draws chart kinds onto any [`Canvas`] (the built-in [`Figure`]
//! engine by default), filling in host-configured defaults; `get_data`
//! turns a canvas into base64 text and [`render_img`] wraps that text in an
//! `<img>` tag with a data URI.

pub mod api;
pub mod core;
pub mod error;
pub mod figure;
pub mod render;
pub mod telemetry;

pub use api::{
    AppConfig, AxisId, Canvas, DrawOptions, EncodeOptions, HostApp, ImgAttributes, Plots,
    PlotsConfig, StandaloneHost, render_img,
};
pub use error::{PlotsError, PlotsResult};
pub use figure::Figure;
