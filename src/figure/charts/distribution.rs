use crate::api::{DrawOptions, OptionValue};
use crate::core::stats;
use crate::error::{PlotsError, PlotsResult};
use crate::figure::Axes;
use crate::figure::artist::{Artist, PX_PER_PT};
use crate::figure::charts::{Style, bins, ensure_same_length, line_width_px, min_max};
use crate::render::Color;

const KDE_POINTS: usize = 100;
const MARKER_RADIUS_PT: f64 = 3.0;

pub(super) fn hist(axes: &mut Axes, x: &[f64], options: &DrawOptions) -> PlotsResult<()> {
    options.ensure_extras("hist", &["density", "cumulative"])?;
    let density = options.extra_bool("density")?.unwrap_or(false);
    let cumulative = options.extra_bool("cumulative")?.unwrap_or(false);
    let bins = bins(options)?;
    let style = Style::resolve(axes, options, 1.0)?;

    let mut histogram = stats::histogram(x, bins);
    if cumulative {
        histogram.accumulate();
        let total = histogram.counts.last().copied().unwrap_or(0.0);
        if density && total > 0.0 {
            for count in &mut histogram.counts {
                *count /= total;
            }
        }
    } else if density {
        histogram.normalize_density();
    }

    for (count, edge) in histogram.counts.iter().zip(histogram.edges.windows(2)) {
        axes.add_artist(Artist::Rect {
            x0: edge[0],
            y0: 0.0,
            x1: edge[1],
            y1: *count,
            fill: Some(style.face),
            edge: style.edge,
            line_width: style.line_width,
        });
    }
    axes.add_sticky_y(0.0);
    Ok(())
}

pub(super) fn errorbar(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras("errorbar", &["yerr", "xerr", "capsize", "fmt"])?;
    ensure_same_length("errorbar", &[("x", x.len()), ("y", y.len())])?;
    let yerr = error_values(options, "yerr", x.len())?;
    let xerr = error_values(options, "xerr", x.len())?;
    let capsize = match options.extra_f64("capsize")? {
        Some(size) if !size.is_finite() || size < 0.0 => {
            return Err(PlotsError::InvalidOption {
                key: "capsize".to_owned(),
                expected: "a finite number >= 0",
            });
        }
        size => size.unwrap_or(0.0) * PX_PER_PT,
    };
    let (with_line, with_markers) = match options.extra_text("fmt")?.unwrap_or("") {
        "" | "-" => (true, false),
        "o" => (false, true),
        "o-" | "-o" => (true, true),
        "none" => (false, false),
        _ => {
            return Err(PlotsError::InvalidOption {
                key: "fmt".to_owned(),
                expected: "one of \"\", \"-\", \"o\", \"o-\", \"none\"",
            });
        }
    };
    let style = Style::resolve(axes, options, 1.5)?;

    let points: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    for (index, &(px, py)) in points.iter().enumerate() {
        if let Some(errors) = &yerr {
            let (low, high) = ((px, py - errors[index]), (px, py + errors[index]));
            axes.add_artist(Artist::segment(low, high, style.face, style.line_width));
            for at in [low, high] {
                axes.add_artist(cap(at, capsize, false, style));
            }
        }
        if let Some(errors) = &xerr {
            let (low, high) = ((px - errors[index], py), (px + errors[index], py));
            axes.add_artist(Artist::segment(low, high, style.face, style.line_width));
            for at in [low, high] {
                axes.add_artist(cap(at, capsize, true, style));
            }
        }
    }

    if with_line {
        axes.add_artist(Artist::line(points.clone(), style.face, style.line_width));
    } else {
        for point in &points {
            axes.include_point(*point);
        }
    }
    if with_markers {
        for center in points {
            axes.add_artist(Artist::Marker {
                center,
                radius: MARKER_RADIUS_PT * PX_PER_PT,
                fill: Some(style.face),
                edge: None,
                line_width: 0.0,
            });
        }
    }
    Ok(())
}

fn cap(at: (f64, f64), half_length: f64, vertical: bool, style: Style) -> Artist {
    Artist::Tick {
        at,
        half_length,
        vertical,
        color: style.face,
        line_width: style.line_width,
    }
}

/// Symmetric error magnitudes: a scalar for every point or one per point.
fn error_values(options: &DrawOptions, key: &str, len: usize) -> PlotsResult<Option<Vec<f64>>> {
    let Some(values) = options.extra_list(key, len)? else {
        return Ok(None);
    };
    if values.len() != len {
        return Err(PlotsError::InvalidData(format!(
            "errorbar: `{key}` has {} values for {len} points",
            values.len()
        )));
    }
    if values.iter().any(|v| *v < 0.0) {
        return Err(PlotsError::InvalidData(format!(
            "errorbar: `{key}` must not contain negative values"
        )));
    }
    Ok(Some(values))
}

/// Default group positions `1..=n`, or the caller's, which must match.
fn group_positions(chart: &str, given: Option<Vec<f64>>, groups: usize) -> PlotsResult<Vec<f64>> {
    match given {
        None => Ok((1..=groups).map(|i| i as f64).collect()),
        Some(positions) if positions.len() == groups => Ok(positions),
        Some(positions) => Err(PlotsError::InvalidData(format!(
            "{chart}: {} positions for {groups} datasets",
            positions.len()
        ))),
    }
}

fn group_widths(
    chart: &str,
    options: &DrawOptions,
    groups: usize,
    default: f64,
) -> PlotsResult<Vec<f64>> {
    let widths = options
        .extra_list("widths", groups)?
        .unwrap_or_else(|| vec![default; groups]);
    if widths.len() != groups || widths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
        return Err(PlotsError::InvalidData(format!(
            "{chart}: `widths` needs {groups} positive values"
        )));
    }
    Ok(widths)
}

pub(super) fn violinplot(
    axes: &mut Axes,
    dataset: &[Vec<f64>],
    positions: &[f64],
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras(
        "violinplot",
        &["showmeans", "showmedians", "showextrema", "widths"],
    )?;
    let show_means = options.extra_bool("showmeans")?.unwrap_or(false);
    let show_medians = options.extra_bool("showmedians")?.unwrap_or(false);
    let show_extrema = options.extra_bool("showextrema")?.unwrap_or(true);
    let given = (!positions.is_empty()).then(|| positions.to_vec());
    let positions = group_positions("violinplot", given, dataset.len())?;
    let widths = group_widths("violinplot", options, dataset.len(), 0.5)?;
    let style = Style::resolve(axes, options, 1.0)?;
    let body = if options.alpha.is_some() {
        style.face
    } else {
        style.face.with_alpha(0.3)
    };
    let line_color = style.face.with_alpha(1.0);

    for ((values, &position), &width) in dataset.iter().zip(&positions).zip(&widths) {
        let sorted = stats::sorted_finite(values);
        let Some(kde) = stats::kernel_density(&sorted, KDE_POINTS) else {
            return Err(PlotsError::InvalidData(
                "violinplot: every dataset needs at least one finite value".to_owned(),
            ));
        };
        let peak = kde.densities.iter().copied().fold(0.0, f64::max);
        let scale = if peak > 0.0 { width / 2.0 / peak } else { 0.0 };

        let mut outline: Vec<(f64, f64)> = kde
            .coords
            .iter()
            .zip(&kde.densities)
            .map(|(c, d)| (position - d * scale, *c))
            .collect();
        outline.extend(
            kde.coords
                .iter()
                .zip(&kde.densities)
                .rev()
                .map(|(c, d)| (position + d * scale, *c)),
        );
        axes.add_artist(Artist::Polygon {
            points: outline,
            fill: Some(body),
            edge: None,
            line_width: 0.0,
        });

        let half = width / 4.0;
        let bar = |level: f64| {
            Artist::segment(
                (position - half, level),
                (position + half, level),
                line_color,
                style.line_width,
            )
        };
        if show_extrema {
            let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
            axes.add_artist(Artist::segment(
                (position, min),
                (position, max),
                line_color,
                style.line_width,
            ));
            axes.add_artist(bar(min));
            axes.add_artist(bar(max));
        }
        if show_medians {
            axes.add_artist(bar(stats::quantile(&sorted, 0.5)));
        }
        if show_means {
            if let Some(mean) = stats::mean(&sorted) {
                axes.add_artist(bar(mean));
            }
        }
    }
    Ok(())
}

pub(super) fn eventplot(
    axes: &mut Axes,
    positions: &[Vec<f64>],
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras("eventplot", &["lineoffsets", "linelengths", "orientation"])?;
    let groups = positions.len();
    let offsets = match options.extra.get("lineoffsets") {
        Some(OptionValue::List(values)) => per_group("lineoffsets", values, groups)?,
        _ => {
            let step = options.extra_f64("lineoffsets")?.unwrap_or(1.0);
            if groups == 1 {
                vec![step]
            } else {
                (0..groups).map(|i| step * i as f64).collect()
            }
        }
    };
    let lengths = match options.extra.get("linelengths") {
        Some(OptionValue::List(values)) => per_group("linelengths", values, groups)?,
        _ => vec![options.extra_f64("linelengths")?.unwrap_or(1.0); groups],
    };
    let vertical = match options.extra_text("orientation")?.unwrap_or("horizontal") {
        "horizontal" => false,
        "vertical" => true,
        _ => {
            return Err(PlotsError::InvalidOption {
                key: "orientation".to_owned(),
                expected: "\"horizontal\" or \"vertical\"",
            });
        }
    };
    let style = Style::resolve(axes, options, 1.5)?;

    for ((events, &offset), &length) in positions.iter().zip(&offsets).zip(&lengths) {
        let (low, high) = (offset - length / 2.0, offset + length / 2.0);
        for &event in events.iter().filter(|e| e.is_finite()) {
            let (from, to) = if vertical {
                ((low, event), (high, event))
            } else {
                ((event, low), (event, high))
            };
            axes.add_artist(Artist::segment(from, to, style.face, style.line_width));
        }
    }
    Ok(())
}

fn per_group(key: &str, values: &[f64], groups: usize) -> PlotsResult<Vec<f64>> {
    match values.len() {
        len if len == groups => Ok(values.to_vec()),
        1 => Ok(vec![values[0]; groups]),
        len => Err(PlotsError::InvalidData(format!(
            "eventplot: `{key}` has {len} values for {groups} groups"
        ))),
    }
}

pub(super) fn boxplot(
    axes: &mut Axes,
    dataset: &[Vec<f64>],
    options: &DrawOptions,
) -> PlotsResult<()> {
    options.ensure_extras(
        "boxplot",
        &["positions", "widths", "showfliers", "showmeans"],
    )?;
    let show_fliers = options.extra_bool("showfliers")?.unwrap_or(true);
    let show_means = options.extra_bool("showmeans")?.unwrap_or(false);
    let positions = group_positions(
        "boxplot",
        options.extra_list("positions", dataset.len())?,
        dataset.len(),
    )?;
    let default_width = match min_max(positions.iter().copied()) {
        Some((lo, hi)) => (0.15 * (hi - lo)).clamp(0.15, 0.5),
        None => 0.5,
    };
    let widths = group_widths("boxplot", options, dataset.len(), default_width)?;
    let line_width = line_width_px(options, 1.0)?;
    let edge = options.color.unwrap_or(Color::BLACK);
    let median_color = Color::cycle(1);
    let flier_radius = MARKER_RADIUS_PT * PX_PER_PT;

    for ((values, &position), &width) in dataset.iter().zip(&positions).zip(&widths) {
        let Some(summary) = stats::box_summary(values) else {
            continue;
        };
        let half = width / 2.0;
        axes.add_artist(Artist::Rect {
            x0: position - half,
            y0: summary.q1,
            x1: position + half,
            y1: summary.q3,
            fill: None,
            edge: Some(edge),
            line_width,
        });
        for (from, to) in [(summary.q1, summary.whisker_low), (summary.q3, summary.whisker_high)] {
            axes.add_artist(Artist::segment(
                (position, from),
                (position, to),
                edge,
                line_width,
            ));
            axes.add_artist(Artist::segment(
                (position - half / 2.0, to),
                (position + half / 2.0, to),
                edge,
                line_width,
            ));
        }
        axes.add_artist(Artist::segment(
            (position - half, summary.median),
            (position + half, summary.median),
            median_color,
            line_width,
        ));
        if show_fliers {
            for &flier in &summary.fliers {
                axes.add_artist(Artist::Marker {
                    center: (position, flier),
                    radius: flier_radius,
                    fill: None,
                    edge: Some(Color::BLACK),
                    line_width,
                });
            }
        }
        if show_means {
            axes.add_artist(Artist::Marker {
                center: (position, summary.mean),
                radius: flier_radius,
                fill: Some(Color::cycle(2)),
                edge: None,
                line_width: 0.0,
            });
        }
    }
    Ok(())
}
