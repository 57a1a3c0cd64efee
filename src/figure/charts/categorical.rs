use std::f64::consts::TAU;

use crate::api::{BarHeights, BarPositions, DrawOptions};
use crate::error::{PlotsError, PlotsResult};
use crate::figure::Axes;
use crate::figure::artist::Artist;
use crate::figure::charts::{Style, alpha};

const DEFAULT_BAR_WIDTH: f64 = 0.8;
const PIE_LIMIT: f64 = 1.25;
/// Arc vertices per full turn.
const ARC_RESOLUTION: f64 = 180.0;

pub(super) fn bar(
    axes: &mut Axes,
    x: &BarPositions,
    height: &BarHeights,
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras("bar", &["align", "bottom"])?;
    let count = x.len();
    let heights = height.expand(count).ok_or_else(|| {
        PlotsError::InvalidData(format!("bar: heights do not match {count} bar positions"))
    })?;
    let bottoms = options
        .extra_list("bottom", count)?
        .unwrap_or_else(|| vec![0.0; count]);
    if bottoms.len() != count {
        return Err(PlotsError::InvalidData(format!(
            "bar: `bottom` has {} values for {count} bars",
            bottoms.len()
        )));
    }
    let width = options.width.unwrap_or(DEFAULT_BAR_WIDTH);
    if !width.is_finite() || width <= 0.0 {
        return Err(PlotsError::InvalidOption {
            key: "width".to_owned(),
            expected: "a finite number > 0",
        });
    }
    let centered = match options.extra_text("align")?.unwrap_or("center") {
        "center" => true,
        "edge" => false,
        _ => {
            return Err(PlotsError::InvalidOption {
                key: "align".to_owned(),
                expected: "\"center\" or \"edge\"",
            });
        }
    };
    let style = Style::resolve(axes, options, 1.0)?;

    for ((position, height), bottom) in x.coordinates().into_iter().zip(heights).zip(bottoms) {
        let left = if centered { position - width / 2.0 } else { position };
        axes.add_artist(Artist::Rect {
            x0: left,
            y0: bottom,
            x1: left + width,
            y1: bottom + height,
            fill: Some(style.face),
            edge: style.edge,
            line_width: style.line_width,
        });
    }
    axes.add_sticky_y(0.0);
    Ok(())
}

pub(super) fn pie(axes: &mut Axes, x: &[f64], options: &DrawOptions) -> PlotsResult<()> {
    options.ensure_extras("pie", &["startangle", "counterclock"])?;
    if x.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(PlotsError::InvalidData(
            "pie: wedge sizes must be finite and non-negative".to_owned(),
        ));
    }
    let total: f64 = x.iter().sum();
    if total <= 0.0 {
        return Err(PlotsError::InvalidData(
            "pie: wedge sizes must not sum to zero".to_owned(),
        ));
    }
    let start = options.extra_f64("startangle")?.unwrap_or(0.0).to_radians();
    let direction = if options.extra_bool("counterclock")?.unwrap_or(true) {
        1.0
    } else {
        -1.0
    };
    let alpha = alpha(options)?;

    let mut theta = start;
    for value in x {
        let sweep = direction * TAU * value / total;
        let color = axes.next_color();
        let color = alpha.map_or(color, |alpha| color.with_alpha(alpha));
        if sweep != 0.0 {
            let mut points = vec![(0.0, 0.0)];
            points.extend(arc(theta, theta + sweep));
            let artist = match options.edge_color {
                Some(edge) => Artist::Polygon {
                    points,
                    fill: Some(color),
                    edge: Some(edge),
                    line_width: super::line_width_px(options, 1.0)?,
                },
                None => Artist::filled_polygon(points, color),
            };
            axes.add_artist(artist);
        }
        theta += sweep;
    }

    axes.set_frame_on(false);
    axes.set_aspect_equal(true);
    axes.set_xlim(-PIE_LIMIT, PIE_LIMIT)?;
    axes.set_ylim(-PIE_LIMIT, PIE_LIMIT)?;
    Ok(())
}

/// Unit-circle vertices from `from` to `to` (radians), both ends included.
fn arc(from: f64, to: f64) -> impl Iterator<Item = (f64, f64)> {
    let steps = ((to - from).abs() / TAU * ARC_RESOLUTION).ceil().max(2.0) as usize;
    (0..=steps).map(move |i| {
        let angle = from + (to - from) * i as f64 / steps as f64;
        (angle.cos(), angle.sin())
    })
}
