//! Chart geometry: turns a `ChartRequest` into artists on one `Axes`.

mod categorical;
mod density;
mod distribution;
mod field;

use tracing::trace;

use crate::api::{ChartRequest, DrawOptions};
use crate::error::{PlotsError, PlotsResult};
use crate::figure::Axes;
use crate::figure::artist::PX_PER_PT;
use crate::render::{Color, Colormap};

const DEFAULT_COLORMAP: &str = "viridis";
const DEFAULT_BINS: usize = 10;

pub(crate) fn draw(axes: &mut Axes, request: ChartRequest) -> PlotsResult<()> {
    trace!(chart = request.kind().as_str(), "building chart geometry");
    match request {
        ChartRequest::Hist { x, options } => distribution::hist(axes, &x, &options),
        ChartRequest::ErrorBar { x, y, options } => distribution::errorbar(axes, &x, &y, &options),
        ChartRequest::Violin {
            dataset,
            positions,
            options,
        } => distribution::violinplot(axes, &dataset, &positions, &options),
        ChartRequest::Event { positions, options } => {
            distribution::eventplot(axes, &positions, &options)
        }
        ChartRequest::Box { dataset, options } => distribution::boxplot(axes, &dataset, &options),
        ChartRequest::Hist2d { x, y, options } => density::hist2d(axes, &x, &y, &options),
        ChartRequest::Hexbin { x, y, options } => density::hexbin(axes, &x, &y, &options),
        ChartRequest::Scatter { x, y, options } => density::scatter(axes, &x, &y, &options),
        ChartRequest::Bar {
            x,
            height,
            options,
        } => categorical::bar(axes, &x, &height, &options),
        ChartRequest::Pie { x, options } => categorical::pie(axes, &x, &options),
        ChartRequest::Quiver {
            x,
            y,
            u,
            v,
            options,
        } => field::quiver(axes, &x, &y, &u, &v, &options),
        ChartRequest::Streamplot {
            x,
            y,
            u,
            v,
            options,
        } => field::streamplot(axes, &x, &y, &u, &v, &options),
        ChartRequest::Contourf {
            x,
            y,
            z,
            levels,
            options,
        } => field::contourf(axes, &x, &y, &z, &levels, &options),
    }
}

/// Resolved look shared by most chart kinds.
#[derive(Debug, Clone, Copy)]
struct Style {
    face: Color,
    edge: Option<Color>,
    /// Pixels.
    line_width: f64,
}

impl Style {
    /// `options.color` or the next cycle color, with `alpha` applied.
    fn resolve(axes: &mut Axes, options: &DrawOptions, default_width_pt: f64) -> PlotsResult<Self> {
        let alpha = alpha(options)?;
        let face = options.color.unwrap_or_else(|| axes.next_color());
        let face = match alpha {
            Some(alpha) => face.with_alpha(alpha),
            None => face,
        };
        let edge = match (options.edge_color, alpha) {
            (Some(edge), Some(alpha)) => Some(edge.with_alpha(alpha)),
            (edge, _) => edge,
        };
        Ok(Self {
            face,
            edge,
            line_width: line_width_px(options, default_width_pt)?,
        })
    }
}

fn alpha(options: &DrawOptions) -> PlotsResult<Option<f64>> {
    match options.alpha {
        Some(alpha) if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) => {
            Err(PlotsError::InvalidOption {
                key: "alpha".to_owned(),
                expected: "a number in [0, 1]",
            })
        }
        alpha => Ok(alpha),
    }
}

fn line_width_px(options: &DrawOptions, default_pt: f64) -> PlotsResult<f64> {
    match options.line_width {
        Some(width) if !width.is_finite() || width < 0.0 => Err(PlotsError::InvalidOption {
            key: "line_width".to_owned(),
            expected: "a finite number >= 0",
        }),
        Some(width) => Ok(width * PX_PER_PT),
        None => Ok(default_pt * PX_PER_PT),
    }
}

fn colormap(options: &DrawOptions) -> PlotsResult<Colormap> {
    Colormap::by_name(options.cmap.as_deref().unwrap_or(DEFAULT_COLORMAP))
}

fn bins(options: &DrawOptions) -> PlotsResult<usize> {
    match options.bins {
        Some(0) => Err(PlotsError::InvalidOption {
            key: "bins".to_owned(),
            expected: "a positive integer",
        }),
        Some(bins) => Ok(bins),
        None => Ok(DEFAULT_BINS),
    }
}

fn ensure_same_length(chart: &str, lengths: &[(&str, usize)]) -> PlotsResult<()> {
    let Some((first_name, first_len)) = lengths.first() else {
        return Ok(());
    };
    match lengths.iter().find(|(_, len)| len != first_len) {
        Some((name, len)) => Err(PlotsError::InvalidData(format!(
            "{chart}: `{name}` has {len} values but `{first_name}` has {first_len}"
        ))),
        None => Ok(()),
    }
}

fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}
