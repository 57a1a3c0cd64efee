use crate::api::{ContourLevels, DrawOptions};
use crate::core::{Bounds, auto_levels, filled_bands, streamlines};
use crate::error::{PlotsError, PlotsResult};
use crate::figure::Axes;
use crate::figure::artist::{Artist, PX_PER_PT};
use crate::figure::charts::{Style, alpha, colormap, ensure_same_length, line_width_px, min_max};
use crate::render::Color;

/// Longest default arrow relative to the typical spacing between arrows.
const QUIVER_FILL: f64 = 0.9;
const CONTOUR_SEAM_PX: f64 = 0.5;
const STREAM_ARROW_PT: f64 = 6.0;

pub(super) fn quiver(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    u: &[f64],
    v: &[f64],
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras("quiver", &["scale"])?;
    ensure_same_length(
        "quiver",
        &[("x", x.len()), ("y", y.len()), ("u", u.len()), ("v", v.len())],
    )?;
    let scale = match options.extra_f64("scale")? {
        Some(scale) if !scale.is_finite() || scale <= 0.0 => {
            return Err(PlotsError::InvalidOption {
                key: "scale".to_owned(),
                expected: "a finite number > 0",
            });
        }
        Some(scale) => scale,
        None => auto_scale(x, y, u, v),
    };
    let alpha = alpha(options)?;
    let color = options.color.unwrap_or(Color::BLACK);
    let color = alpha.map_or(color, |alpha| color.with_alpha(alpha));
    let line_width = line_width_px(options, 1.0)?;

    for index in 0..x.len() {
        let tail = (x[index], y[index]);
        let tip = (tail.0 + u[index] / scale, tail.1 + v[index] / scale);
        axes.add_artist(Artist::Arrow {
            tail,
            tip,
            color,
            line_width,
        });
    }
    Ok(())
}

/// Data units per unit of arrow length, chosen so the longest arrow spans
/// most of the typical spacing between arrows.
fn auto_scale(x: &[f64], y: &[f64], u: &[f64], v: &[f64]) -> f64 {
    let longest = u
        .iter()
        .zip(v)
        .map(|(du, dv)| du.hypot(*dv))
        .filter(|m| m.is_finite())
        .fold(0.0, f64::max);
    if longest <= 0.0 {
        return 1.0;
    }
    let span = |values: &[f64]| min_max(values.iter().copied()).map_or(0.0, |(lo, hi)| hi - lo);
    let extent = span(x).max(span(y));
    let extent = if extent > 0.0 { extent } else { 1.0 };
    let spacing = extent / (x.len() as f64).sqrt().max(1.0);
    longest / (QUIVER_FILL * spacing)
}

pub(super) fn streamplot(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    u: &[Vec<f64>],
    v: &[Vec<f64>],
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras("streamplot", &["density"])?;
    let density = options.extra_f64("density")?.unwrap_or(1.0);
    let lines = streamlines(x, y, u, v, density)?;
    let style = Style::resolve(axes, options, 1.5)?;

    for line in lines {
        let middle = line.len() / 2;
        if middle >= 1 {
            let (from, to) = (line[middle - 1], line[middle]);
            axes.add_artist(Artist::ArrowHead {
                at: to,
                direction: (to.0 - from.0, to.1 - from.1),
                color: style.face,
                size: STREAM_ARROW_PT * PX_PER_PT,
            });
        }
        axes.add_artist(Artist::line(line, style.face, style.line_width));
    }
    let extent = grid_extent(x, y);
    axes.update_data_limits(extent);
    axes.stick_to(extent);
    Ok(())
}

pub(super) fn contourf(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    z: &[Vec<f64>],
    levels: &ContourLevels,
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras("contourf", &[])?;
    let levels = match levels {
        ContourLevels::Count(count) => auto_levels(z, *count)?,
        ContourLevels::Explicit(levels) => levels.clone(),
    };
    let bands = filled_bands(x, y, z, &levels)?;
    let cmap = colormap(options)?;
    let alpha = alpha(options)?;
    let (low, high) = (levels[0], levels[levels.len() - 1]);

    for band in bands {
        let middle = (band.lower + band.upper) / 2.0;
        let color = cmap.sample_range(middle, low, high);
        let color = alpha.map_or(color, |alpha| color.with_alpha(alpha));
        for points in band.polygons {
            axes.add_artist(Artist::Polygon {
                points,
                fill: Some(color),
                edge: Some(color),
                line_width: CONTOUR_SEAM_PX,
            });
        }
    }
    let extent = grid_extent(x, y);
    axes.update_data_limits(extent);
    axes.stick_to(extent);
    Ok(())
}

fn grid_extent(x: &[f64], y: &[f64]) -> Bounds {
    let (x_min, x_max) = min_max(x.iter().copied()).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = min_max(y.iter().copied()).unwrap_or((0.0, 1.0));
    Bounds::new(x_min, x_max, y_min, y_max)
}
