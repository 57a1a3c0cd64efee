use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

pub type PlotsResult<T> = Result<T, PlotsError>;

#[derive(Debug, Error)]
pub enum PlotsError {
    #[error("You must send the data of the image.")]
    MissingImageData,

    #[error("{0}")]
    Raised(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{chart} got an unexpected option `{key}`")]
    UnsupportedOption { chart: &'static str, key: String },

    #[error("option `{key}` must be {expected}")]
    InvalidOption { key: String, expected: &'static str },

    #[error("unknown colormap `{0}`")]
    UnknownColormap(String),

    #[error("axis #{0} does not belong to this figure")]
    UnknownAxis(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("drawing failed: {0}")]
    Render(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("host registration failed: {0}")]
    Host(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotsError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(err.to_string())
    }
}
