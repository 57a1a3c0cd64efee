use crate::api::DrawOptions;
use crate::core::{Bounds, stats};
use crate::error::{PlotsError, PlotsResult};
use crate::figure::Axes;
use crate::figure::artist::{Artist, PX_PER_PT};
use crate::figure::charts::{Style, alpha, bins, colormap, ensure_same_length, min_max};

const DEFAULT_GRIDSIZE: usize = 100;
/// Marker area in square points.
const DEFAULT_MARKER_SIZE: f64 = 36.0;

pub(super) fn hist2d(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras("hist2d", &["density"])?;
    ensure_same_length("hist2d", &[("x", x.len()), ("y", y.len())])?;
    let density = options.extra_bool("density")?.unwrap_or(false);
    let bins = bins(options)?;
    let cmap = colormap(options)?;
    let alpha = alpha(options)?;

    let mut histogram = stats::histogram2d(x, y, bins);
    if density {
        let total: f64 = histogram.counts.iter().flatten().sum();
        let cell = (histogram.x_edges[1] - histogram.x_edges[0])
            * (histogram.y_edges[1] - histogram.y_edges[0]);
        if total > 0.0 && cell > 0.0 {
            for count in histogram.counts.iter_mut().flatten() {
                *count /= total * cell;
            }
        }
    }
    let (vmin, vmax) = min_max(histogram.counts.iter().flatten().copied()).unwrap_or((0.0, 1.0));

    for (ix, column) in histogram.counts.iter().enumerate() {
        for (iy, count) in column.iter().enumerate() {
            let color = cmap.sample_range(*count, vmin, vmax);
            let color = alpha.map_or(color, |alpha| color.with_alpha(alpha));
            axes.add_artist(Artist::filled_rect(
                histogram.x_edges[ix],
                histogram.y_edges[iy],
                histogram.x_edges[ix + 1],
                histogram.y_edges[iy + 1],
                color,
            ));
        }
    }
    let last = histogram.x_edges.len() - 1;
    axes.stick_to(Bounds::new(
        histogram.x_edges[0],
        histogram.x_edges[last],
        histogram.y_edges[0],
        histogram.y_edges[last],
    ));
    Ok(())
}

pub(super) fn hexbin(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras("hexbin", &["gridsize", "mincnt"])?;
    ensure_same_length("hexbin", &[("x", x.len()), ("y", y.len())])?;
    let gridsize = match options.extra_usize("gridsize")? {
        Some(0) => {
            return Err(PlotsError::InvalidOption {
                key: "gridsize".to_owned(),
                expected: "a positive integer",
            });
        }
        gridsize => gridsize.unwrap_or(DEFAULT_GRIDSIZE),
    };
    let mincnt = options.extra_usize("mincnt")?.unwrap_or(1) as f64;
    let cmap = colormap(options)?;
    let alpha = alpha(options)?;

    let bins = stats::hexbin(x, y, gridsize);
    let cells: Vec<_> = bins
        .cells
        .iter()
        .filter(|(_, count)| *count >= mincnt)
        .collect();
    let (vmin, vmax) = min_max(cells.iter().map(|(_, count)| *count)).unwrap_or((0.0, 1.0));
    for (center, count) in cells {
        let color = cmap.sample_range(*count, vmin, vmax);
        let color = alpha.map_or(color, |alpha| color.with_alpha(alpha));
        axes.add_artist(Artist::filled_polygon(bins.hexagon(*center), color));
    }
    Ok(())
}

pub(super) fn scatter(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras("scatter", &[])?;
    ensure_same_length("scatter", &[("x", x.len()), ("y", y.len())])?;
    let size = options.marker_size.unwrap_or(DEFAULT_MARKER_SIZE);
    if !size.is_finite() || size <= 0.0 {
        return Err(PlotsError::InvalidOption {
            key: "marker_size".to_owned(),
            expected: "a finite number > 0",
        });
    }
    let style = Style::resolve(axes, options, 1.0)?;
    let radius = size.sqrt() / 2.0 * PX_PER_PT;

    for center in x.iter().copied().zip(y.iter().copied()) {
        axes.add_artist(Artist::Marker {
            center,
            radius,
            fill: Some(style.face),
            edge: style.edge,
            line_width: style.line_width,
        });
    }
    Ok(())
}
