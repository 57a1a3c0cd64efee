use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::element::{Circle, EmptyElement, PathElement, Polygon, Rectangle};
use plotters::prelude::DrawingBackend;
use plotters::series::LineSeries;
use plotters::style::{Color as _, RGBAColor, ShapeStyle};

use crate::core::Bounds;
use crate::error::PlotsResult;
use crate::render::Color;

/// Pixels per typographic point at the figure's 100 dpi.
pub const PX_PER_PT: f64 = 100.0 / 72.0;

/// Pixel offset from an anchor point.
type Offset = (i32, i32);

/// Chart context of one axes, in data coordinates on both axes.
pub type DataChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Pixels per data unit of a painted axes. `y` is negative since pixel
/// rows grow downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    pub x: f64,
    pub y: f64,
}

impl PixelScale {
    #[must_use]
    pub fn apply(self, (dx, dy): (f64, f64)) -> (f64, f64) {
        (dx * self.x, dy * self.y)
    }
}

/// Drawable element in data coordinates.
///
/// Widths and marker radii are already in pixels; only positions go
/// through the axes transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    Rect {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        fill: Option<Color>,
        edge: Option<Color>,
        line_width: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Option<Color>,
        edge: Option<Color>,
        line_width: f64,
    },
    Line {
        points: Vec<(f64, f64)>,
        color: Color,
        line_width: f64,
    },
    Marker {
        center: (f64, f64),
        radius: f64,
        fill: Option<Color>,
        edge: Option<Color>,
        line_width: f64,
    },
    /// Pixel-length tick centered on a data point (error-bar caps).
    Tick {
        at: (f64, f64),
        half_length: f64,
        vertical: bool,
        color: Color,
        line_width: f64,
    },
    /// Straight arrow whose head is sized in pixels.
    Arrow {
        tail: (f64, f64),
        tip: (f64, f64),
        color: Color,
        line_width: f64,
    },
    /// Head only, pointing along a data-space direction (streamlines).
    ArrowHead {
        at: (f64, f64),
        direction: (f64, f64),
        color: Color,
        size: f64,
    },
}

impl Artist {
    #[must_use]
    pub fn line(points: Vec<(f64, f64)>, color: Color, line_width: f64) -> Self {
        Self::Line {
            points,
            color,
            line_width,
        }
    }

    #[must_use]
    pub fn segment(from: (f64, f64), to: (f64, f64), color: Color, line_width: f64) -> Self {
        Self::line(vec![from, to], color, line_width)
    }

    #[must_use]
    pub fn filled_rect(x0: f64, y0: f64, x1: f64, y1: f64, fill: Color) -> Self {
        Self::Rect {
            x0,
            y0,
            x1,
            y1,
            fill: Some(fill),
            edge: None,
            line_width: 0.0,
        }
    }

    #[must_use]
    pub fn filled_polygon(points: Vec<(f64, f64)>, fill: Color) -> Self {
        Self::Polygon {
            points,
            fill: Some(fill),
            edge: None,
            line_width: 0.0,
        }
    }

    /// Data-space extent, ignoring non-finite coordinates.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Rect { x0, y0, x1, y1, .. } => Bounds::from_points([(*x0, *y0), (*x1, *y1)]),
            Self::Polygon { points, .. } | Self::Line { points, .. } => {
                Bounds::from_points(points.iter().copied())
            }
            Self::Marker { center, .. } => Bounds::from_points([*center]),
            Self::Tick { at, .. } | Self::ArrowHead { at, .. } => Bounds::from_points([*at]),
            Self::Arrow { tail, tip, .. } => Bounds::from_points([*tail, *tip]),
        }
    }

    /// Draws this artist onto `chart`. Non-finite or degenerate artists are
    /// skipped.
    pub fn paint<DB: DrawingBackend>(
        &self,
        chart: &mut DataChart<'_, DB>,
        scale: PixelScale,
    ) -> PlotsResult<()> {
        match self {
            Self::Rect {
                x0,
                y0,
                x1,
                y1,
                fill,
                edge,
                line_width,
            } => {
                let corners = [(*x0, *y0), (*x1, *y1)];
                if !all_finite(&corners) {
                    return Ok(());
                }
                let area = chart.plotting_area();
                if let Some(fill) = fill {
                    area.draw(&Rectangle::new(corners, fill_style(*fill)))?;
                }
                if let Some(edge) = edge.filter(|_| *line_width > 0.0) {
                    area.draw(&Rectangle::new(corners, stroke_style(edge, *line_width)))?;
                }
            }
            Self::Polygon {
                points,
                fill,
                edge,
                line_width,
            } => {
                if points.len() < 3 || !all_finite(points) {
                    return Ok(());
                }
                let area = chart.plotting_area();
                if let Some(fill) = fill {
                    area.draw(&Polygon::new(points.clone(), fill_style(*fill)))?;
                }
                if let Some(edge) = edge.filter(|_| *line_width > 0.0) {
                    let outline = points.iter().chain(points.first()).copied().collect::<Vec<_>>();
                    area.draw(&PathElement::new(outline, stroke_style(edge, *line_width)))?;
                }
            }
            Self::Line {
                points,
                color,
                line_width,
            } => {
                if *line_width <= 0.0 {
                    return Ok(());
                }
                for run in finite_runs(points) {
                    chart.draw_series(LineSeries::new(
                        run.iter().copied(),
                        stroke_style(*color, *line_width),
                    ))?;
                }
            }
            Self::Marker {
                center,
                radius,
                fill,
                edge,
                line_width,
            } => {
                if !all_finite(&[*center]) || *radius <= 0.0 {
                    return Ok(());
                }
                let radius = radius.round().max(1.0) as i32;
                let area = chart.plotting_area();
                if let Some(fill) = fill {
                    area.draw(&Circle::new(*center, radius, fill_style(*fill)))?;
                }
                if let Some(edge) = edge.filter(|_| *line_width > 0.0) {
                    area.draw(&Circle::new(*center, radius, stroke_style(edge, *line_width)))?;
                }
            }
            Self::Tick {
                at,
                half_length,
                vertical,
                color,
                line_width,
            } => {
                if !all_finite(&[*at]) || *half_length <= 0.0 || *line_width <= 0.0 {
                    return Ok(());
                }
                let half = half_length.round() as i32;
                let ends = if *vertical {
                    vec![(0, -half), (0, half)]
                } else {
                    vec![(-half, 0), (half, 0)]
                };
                chart.plotting_area().draw(
                    &(EmptyElement::at(*at)
                        + PathElement::new(ends, stroke_style(*color, *line_width))),
                )?;
            }
            Self::Arrow {
                tail,
                tip,
                color,
                line_width,
            } => {
                if !all_finite(&[*tail, *tip]) {
                    return Ok(());
                }
                let (dx, dy) = scale.apply((tip.0 - tail.0, tip.1 - tail.1));
                let length = dx.hypot(dy);
                if length < 0.5 {
                    return Ok(());
                }
                let unit = (dx / length, dy / length);
                let head_length = (line_width.max(1.0) * 4.5).min(length);
                let area = chart.plotting_area();
                if length > head_length && *line_width > 0.0 {
                    let shaft = vec![
                        offset(-dx, -dy),
                        offset(-unit.0 * head_length, -unit.1 * head_length),
                    ];
                    area.draw(
                        &(EmptyElement::at(*tip)
                            + PathElement::new(shaft, stroke_style(*color, *line_width))),
                    )?;
                }
                area.draw(
                    &(EmptyElement::at(*tip)
                        + Polygon::new(head_points(unit, head_length), fill_style(*color))),
                )?;
            }
            Self::ArrowHead {
                at,
                direction,
                color,
                size,
            } => {
                if !all_finite(&[*at, *direction]) || *size <= 0.0 {
                    return Ok(());
                }
                let (dx, dy) = scale.apply(*direction);
                let length = dx.hypot(dy);
                if length <= f64::EPSILON {
                    return Ok(());
                }
                chart.plotting_area().draw(
                    &(EmptyElement::at(*at)
                        + Polygon::new(
                            head_points((dx / length, dy / length), *size),
                            fill_style(*color),
                        )),
                )?;
            }
        }
        Ok(())
    }
}

fn all_finite(points: &[(f64, f64)]) -> bool {
    points.iter().all(|(x, y)| x.is_finite() && y.is_finite())
}

fn fill_style(color: Color) -> ShapeStyle {
    RGBAColor::from(color).filled()
}

fn stroke_style(color: Color, width: f64) -> ShapeStyle {
    RGBAColor::from(color).stroke_width(width.round().max(1.0) as u32)
}

fn offset(dx: f64, dy: f64) -> Offset {
    (dx.round() as i32, dy.round() as i32)
}

/// Runs of consecutive finite points; non-finite samples break a line.
fn finite_runs(points: &[(f64, f64)]) -> impl Iterator<Item = &[(f64, f64)]> {
    points
        .split(|(x, y)| !x.is_finite() || !y.is_finite())
        .filter(|run| run.len() >= 2)
}

/// Triangle with its tip at the pixel origin, pointing along `unit`.
fn head_points((ux, uy): (f64, f64), length: f64) -> Vec<Offset> {
    let half_width = length * 0.5;
    let base = (-ux * length, -uy * length);
    vec![
        (0, 0),
        offset(base.0 - uy * half_width, base.1 + ux * half_width),
        offset(base.0 + uy * half_width, base.1 - ux * half_width),
    ]
}

#[cfg(test)]
mod tests {
    use super::{Artist, finite_runs, head_points};
    use crate::render::Color;

    #[test]
    fn nan_splits_a_line_into_runs() {
        let points = [
            (0.0, 0.0),
            (0.1, 0.1),
            (f64::NAN, 0.2),
            (0.3, 0.3),
            (0.4, 0.4),
            (0.5, f64::INFINITY),
            (0.6, 0.6),
        ];
        let runs: Vec<_> = finite_runs(&points).collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1], &[(0.3, 0.3), (0.4, 0.4)]);
    }

    #[test]
    fn head_points_back_from_the_tip() {
        let head = head_points((1.0, 0.0), 10.0);
        assert_eq!(head, vec![(0, 0), (-10, 5), (-10, -5)]);
    }

    #[test]
    fn bounds_ignore_non_finite_corners() {
        let rect = Artist::filled_rect(0.0, 1.0, f64::NAN, 3.0, Color::BLACK);
        let bounds = rect.bounds().expect("one finite corner");
        assert_eq!((bounds.x_min, bounds.y_max), (0.0, 1.0));
    }
}
