mod canvas;
mod config;
mod encoding;
mod extension;
mod markup;
mod options;
mod plots;

pub use canvas::{
    AxisId, BarHeights, BarPositions, Canvas, ChartKind, ChartRequest, ContourLevels,
};
pub use config::{
    AppConfig, BAR_HEIGHT, DEFAULT_BAR_HEIGHT, DEFAULT_COLOR_MAP, DEFAULT_STATIC_FOLDER,
    PLOTS_CMAP, PlotsConfig, STATIC_FOLDER,
};
pub use encoding::{Base64Alphabet, EncodeOptions, ImageFormat, data_uri, encode_canvas};
pub use extension::{
    AssetBundle, EXTENSION_NAME, HostApp, RAISE_GLOBAL, StandaloneHost, TemplateGlobal,
    TemplateHelper, UTILS_TEMPLATE, UTILS_TEMPLATE_PATH,
};
pub use markup::{ImgAttributes, raise_helper, render_img};
pub use options::{DrawOptions, OptionValue};
pub use plots::Plots;
