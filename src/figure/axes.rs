use plotters::chart::{ChartBuilder, LabelAreaPosition};
use plotters::coord::Shift;
use plotters::element::{EmptyElement, PathElement, Rectangle};
use plotters::prelude::{DrawingArea, DrawingBackend};
use plotters::style::{BLACK, Color as _, FontFamily, WHITE};
use tracing::trace;

use crate::core::{Bounds, Viewport, nice_ticks, tick_label};
use crate::error::{PlotsError, PlotsResult};
use crate::figure::artist::{Artist, DataChart, PX_PER_PT, PixelScale};
use crate::render::Color;

const MARGIN: f64 = 0.05;
const TICK_LENGTH_PT: f64 = 3.5;
const PX_PER_TICK: f64 = 70.0;
/// Room outside the axes box for tick labels and the title.
const Y_LABEL_AREA: u32 = 44;
const X_LABEL_AREA: u32 = 24;
const TITLE_AREA: u32 = 30;
/// Smaller axes boxes are drawn without labels or title.
const MIN_LABELLED_PX: f64 = 60.0;

/// One plotting region of a figure.
///
/// `position` is in figure fractions with the origin at the bottom-left,
/// the way subplot parameters are expressed.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    position: Bounds,
    artists: Vec<Artist>,
    data_limits: Option<Bounds>,
    sticky_x: Vec<f64>,
    sticky_y: Vec<f64>,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    frame_on: bool,
    aspect_equal: bool,
    color_index: usize,
    title: Option<String>,
}

/// Pixel box of an axes after aspect adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl AxesBox {
    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

impl Axes {
    #[must_use]
    pub fn new(position: Bounds) -> Self {
        Self {
            position,
            artists: Vec::new(),
            data_limits: None,
            sticky_x: Vec::new(),
            sticky_y: Vec::new(),
            xlim: None,
            ylim: None,
            frame_on: true,
            aspect_equal: false,
            color_index: 0,
            title: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> Bounds {
        self.position
    }

    #[must_use]
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    #[must_use]
    pub fn frame_on(&self) -> bool {
        self.frame_on
    }

    #[must_use]
    pub fn aspect_equal(&self) -> bool {
        self.aspect_equal
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Caption drawn above the axes when a font is available.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn add_artist(&mut self, artist: Artist) {
        if let Some(bounds) = artist.bounds() {
            self.update_data_limits(bounds);
        }
        self.artists.push(artist);
    }

    /// Grows the autoscale region without drawing anything.
    pub fn update_data_limits(&mut self, bounds: Bounds) {
        self.data_limits = Some(match self.data_limits {
            None => bounds,
            Some(current) => current.union(bounds),
        });
    }

    pub fn include_point(&mut self, (x, y): (f64, f64)) {
        if let Some(bounds) = Bounds::from_points([(x, y)]) {
            self.update_data_limits(bounds);
        }
    }

    /// Autoscale margins never push the x view past `value`.
    pub fn add_sticky_x(&mut self, value: f64) {
        self.sticky_x.push(value);
    }

    pub fn add_sticky_y(&mut self, value: f64) {
        self.sticky_y.push(value);
    }

    /// Pins the data region so margins stop at its edges.
    pub fn stick_to(&mut self, bounds: Bounds) {
        self.sticky_x.extend([bounds.x_min, bounds.x_max]);
        self.sticky_y.extend([bounds.y_min, bounds.y_max]);
    }

    pub fn set_xlim(&mut self, left: f64, right: f64) -> PlotsResult<()> {
        self.xlim = Some(checked_limits(left, right, "x")?);
        Ok(())
    }

    pub fn set_ylim(&mut self, bottom: f64, top: f64) -> PlotsResult<()> {
        self.ylim = Some(checked_limits(bottom, top, "y")?);
        Ok(())
    }

    pub fn set_frame_on(&mut self, frame_on: bool) {
        self.frame_on = frame_on;
    }

    pub fn set_aspect_equal(&mut self, aspect_equal: bool) {
        self.aspect_equal = aspect_equal;
    }

    /// Next color of the property cycle.
    pub fn next_color(&mut self) -> Color {
        let color = Color::cycle(self.color_index);
        self.color_index += 1;
        color
    }

    /// Visible data region: explicit limits, else the data extent plus 5%
    /// margins (clamped at sticky edges), else the unit square.
    #[must_use]
    pub fn view_limits(&self) -> Bounds {
        let data = self.data_limits;
        let (x_min, x_max) = self.xlim.unwrap_or_else(|| match data {
            Some(bounds) => autoscale(bounds.x_min, bounds.x_max, &self.sticky_x),
            None => (0.0, 1.0),
        });
        let (y_min, y_max) = self.ylim.unwrap_or_else(|| match data {
            Some(bounds) => autoscale(bounds.y_min, bounds.y_max, &self.sticky_y),
            None => (0.0, 1.0),
        });
        Bounds::new(x_min, x_max, y_min, y_max)
    }

    /// Pixel box inside `viewport`, shrunk around its center when the
    /// aspect is locked.
    #[must_use]
    pub fn pixel_box(&self, viewport: Viewport) -> AxesBox {
        let (width, height) = (f64::from(viewport.width), f64::from(viewport.height));
        let mut bbox = AxesBox {
            left: self.position.x_min * width,
            right: self.position.x_max * width,
            top: (1.0 - self.position.y_max) * height,
            bottom: (1.0 - self.position.y_min) * height,
        };
        if self.aspect_equal {
            let limits = self.view_limits();
            let (data_w, data_h) = (limits.width().abs(), limits.height().abs());
            if data_w > 0.0 && data_h > 0.0 {
                let scale = (bbox.width() / data_w).min(bbox.height() / data_h);
                let (box_w, box_h) = (data_w * scale, data_h * scale);
                let center_x = (bbox.left + bbox.right) / 2.0;
                let center_y = (bbox.top + bbox.bottom) / 2.0;
                bbox = AxesBox {
                    left: center_x - box_w / 2.0,
                    right: center_x + box_w / 2.0,
                    top: center_y - box_h / 2.0,
                    bottom: center_y + box_h / 2.0,
                };
            }
        }
        bbox
    }

    /// Paints background, artists and frame onto the matching region of
    /// `root`. Tick labels and the title need `text`.
    pub fn paint<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        text: bool,
    ) -> PlotsResult<()> {
        let (width, height) = root.dim_in_pixel();
        let bbox = self.pixel_box(Viewport::new(width, height));
        let limits = self.view_limits();
        let roomy = bbox.width() >= MIN_LABELLED_PX && bbox.height() >= MIN_LABELLED_PX;
        let labelled = text && roomy && self.frame_on;
        let title = self.title.as_deref().filter(|_| text && roomy);

        let (y_area, x_area) = if labelled {
            (Y_LABEL_AREA, X_LABEL_AREA)
        } else {
            (0, 0)
        };
        let title_area = if title.is_some() { TITLE_AREA } else { 0 };
        let left = (bbox.left - f64::from(y_area)).max(0.0);
        let top = (bbox.top - f64::from(title_area)).max(0.0);
        let right = bbox.right.min(f64::from(width));
        let bottom = (bbox.bottom + f64::from(x_area)).min(f64::from(height));
        let region = root.clone().shrink(
            (left.round() as u32, top.round() as u32),
            (
                (right - left).round().max(1.0) as u32,
                (bottom - top).round().max(1.0) as u32,
            ),
        );

        let mut builder = ChartBuilder::on(&region);
        builder
            .set_label_area_size(LabelAreaPosition::Left, y_area)
            .set_label_area_size(LabelAreaPosition::Bottom, x_area);
        if let Some(title) = title {
            builder.caption(title, (FontFamily::SansSerif, 16));
        }
        let mut chart = builder.build_cartesian_2d(
            limits.x_min..limits.x_max,
            limits.y_min..limits.y_max,
        )?;

        let (plot_w, plot_h) = chart.plotting_area().dim_in_pixel();
        let scale = PixelScale {
            x: f64::from(plot_w) / limits.width(),
            y: -f64::from(plot_h) / limits.height(),
        };
        trace!(
            artists = self.artists.len(),
            plot_w,
            plot_h,
            labelled,
            "painting axes"
        );

        if self.frame_on {
            chart.plotting_area().fill(&WHITE)?;
        }
        for artist in &self.artists {
            artist.paint(&mut chart, scale)?;
        }
        if self.frame_on {
            self.paint_frame(&mut chart, labelled, (plot_w, plot_h))?;
        }
        Ok(())
    }

    /// Spines on all four sides plus ticks; with `labelled`, the plotters
    /// mesh adds the tick labels on the left and bottom axes.
    fn paint_frame<DB: DrawingBackend>(
        &self,
        chart: &mut DataChart<'_, DB>,
        labelled: bool,
        (plot_w, plot_h): (u32, u32),
    ) -> PlotsResult<()> {
        let limits = self.view_limits();
        let x_ticks = (f64::from(plot_w) / PX_PER_TICK).clamp(3.0, 10.0) as usize;
        let y_ticks = (f64::from(plot_h) / PX_PER_TICK).clamp(3.0, 10.0) as usize;
        let tick = (TICK_LENGTH_PT * PX_PER_PT).round() as i32;

        chart.plotting_area().draw(&Rectangle::new(
            [(limits.x_min, limits.y_min), (limits.x_max, limits.y_max)],
            BLACK.stroke_width(1),
        ))?;

        if labelled {
            let format = |value: &f64| tick_label(*value);
            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(x_ticks)
                .y_labels(y_ticks)
                .x_label_formatter(&format)
                .y_label_formatter(&format)
                .set_tick_mark_size(LabelAreaPosition::Left, tick)
                .set_tick_mark_size(LabelAreaPosition::Bottom, tick)
                .axis_style(BLACK.stroke_width(1))
                .label_style((FontFamily::SansSerif, 12))
                .draw()?;
            return Ok(());
        }

        let area = chart.plotting_area();
        for value in nice_ticks(limits.x_min, limits.x_max, x_ticks) {
            area.draw(
                &(EmptyElement::at((value, limits.y_min))
                    + PathElement::new(vec![(0, 0), (0, -tick)], BLACK.stroke_width(1))),
            )?;
        }
        for value in nice_ticks(limits.y_min, limits.y_max, y_ticks) {
            area.draw(
                &(EmptyElement::at((limits.x_min, value))
                    + PathElement::new(vec![(0, 0), (tick, 0)], BLACK.stroke_width(1))),
            )?;
        }
        Ok(())
    }
}

fn checked_limits(low: f64, high: f64, axis: &str) -> PlotsResult<(f64, f64)> {
    if !low.is_finite() || !high.is_finite() || low == high {
        return Err(PlotsError::InvalidData(format!(
            "{axis} limits must be finite and distinct"
        )));
    }
    Ok((low, high))
}

fn autoscale(min: f64, max: f64, sticky: &[f64]) -> (f64, f64) {
    let (min, max) = if max > min {
        (min, max)
    } else {
        let pad = (min.abs() * MARGIN).max(0.5);
        return (min - pad, max + pad);
    };
    let margin = (max - min) * MARGIN;
    let (mut low, mut high) = (min - margin, max + margin);
    for &edge in sticky {
        if edge <= min && edge > low {
            low = edge;
        }
        if edge >= max && edge < high {
            high = edge;
        }
    }
    (low, high)
}

#[cfg(test)]
mod tests {
    use super::{Axes, autoscale};
    use crate::core::{Bounds, Viewport};

    #[test]
    fn margins_stop_at_sticky_edges() {
        assert_eq!(autoscale(0.0, 10.0, &[0.0]), (0.0, 10.5));
        assert_eq!(autoscale(0.0, 10.0, &[]), (-0.5, 10.5));
    }

    #[test]
    fn equal_aspect_shrinks_the_wider_side() {
        let mut axes = Axes::new(Bounds::new(0.0, 1.0, 0.0, 1.0));
        axes.set_xlim(-1.0, 1.0).expect("xlim");
        axes.set_ylim(-1.0, 1.0).expect("ylim");
        axes.set_aspect_equal(true);
        let bbox = axes.pixel_box(Viewport::new(200, 100));
        assert!((bbox.width() - 100.0).abs() < 1e-9);
        assert!((bbox.left - 50.0).abs() < 1e-9);
    }
}
