//! Built-in plotting engine behind the `Canvas` trait.
//!
//! A `Figure` owns a pixel viewport and a list of `Axes`; chart requests
//! become data-space artists on one axes. Painting lays each axes out as a
//! plotters `ChartBuilder` region and draws its artists as plotters
//! elements, so the same figure renders on the bitmap, SVG or any other
//! `DrawingBackend`.

mod artist;
mod axes;
mod charts;

pub use artist::{Artist, DataChart, PX_PER_PT, PixelScale};
pub use axes::{Axes, AxesBox};

use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend};
use plotters::style::RGBAColor;
use tracing::debug;

use crate::api::{AxisId, Canvas, ChartRequest};
use crate::core::{Bounds, Viewport};
use crate::error::{PlotsError, PlotsResult};
use crate::render::{Color, fonts};

/// Subplot parameters in figure fractions.
const LEFT: f64 = 0.125;
const RIGHT: f64 = 0.9;
const BOTTOM: f64 = 0.11;
const TOP: f64 = 0.88;
const WSPACE: f64 = 0.2;
const HSPACE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    viewport: Viewport,
    facecolor: Color,
    axes: Vec<Axes>,
    current: Option<usize>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    pub const DEFAULT_WIDTH: u32 = 640;
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// 6.4 x 4.8 inches at 100 dpi, white background, no axes yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            facecolor: Color::WHITE,
            axes: Vec::new(),
            current: None,
        }
    }

    pub fn with_size(width: u32, height: u32) -> PlotsResult<Self> {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return Err(PlotsError::InvalidViewport { width, height });
        }
        Ok(Self {
            viewport,
            ..Self::new()
        })
    }

    #[must_use]
    pub fn with_facecolor(mut self, facecolor: Color) -> Self {
        self.facecolor = facecolor;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn axes_count(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn current_axis(&self) -> Option<AxisId> {
        self.current.map(AxisId)
    }

    /// Adds one axes filling the default subplot area and makes it current.
    pub fn add_subplot(&mut self) -> AxisId {
        self.push_axes(Bounds::new(LEFT, RIGHT, BOTTOM, TOP))
    }

    /// Adds a `rows x cols` grid of axes in row-major order, top row first.
    /// The last one becomes current.
    pub fn subplot_grid(&mut self, rows: usize, cols: usize) -> PlotsResult<Vec<AxisId>> {
        if rows == 0 || cols == 0 {
            return Err(PlotsError::InvalidData(format!(
                "subplot grid must be at least 1x1, got {rows}x{cols}"
            )));
        }
        let cell_w = (RIGHT - LEFT) / (cols as f64 + WSPACE * (cols - 1) as f64);
        let cell_h = (TOP - BOTTOM) / (rows as f64 + HSPACE * (rows - 1) as f64);

        let mut ids = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            let top = TOP - row as f64 * cell_h * (1.0 + HSPACE);
            for col in 0..cols {
                let left = LEFT + col as f64 * cell_w * (1.0 + WSPACE);
                ids.push(self.push_axes(Bounds::new(left, left + cell_w, top - cell_h, top)));
            }
        }
        debug!(rows, cols, "added subplot grid");
        Ok(ids)
    }

    pub fn set_current_axis(&mut self, axis: AxisId) -> PlotsResult<()> {
        self.axes(axis)?;
        self.current = Some(axis.0);
        Ok(())
    }

    pub fn axes(&self, axis: AxisId) -> PlotsResult<&Axes> {
        self.axes.get(axis.0).ok_or(PlotsError::UnknownAxis(axis.0))
    }

    pub fn axes_mut(&mut self, axis: AxisId) -> PlotsResult<&mut Axes> {
        self.axes
            .get_mut(axis.0)
            .ok_or(PlotsError::UnknownAxis(axis.0))
    }

    fn push_axes(&mut self, position: Bounds) -> AxisId {
        self.axes.push(Axes::new(position));
        let index = self.axes.len() - 1;
        self.current = Some(index);
        AxisId(index)
    }
}

impl Canvas for Figure {
    fn gca(&mut self) -> AxisId {
        match self.current {
            Some(index) => AxisId(index),
            None => self.add_subplot(),
        }
    }

    fn draw(&mut self, axis: AxisId, request: ChartRequest) -> PlotsResult<()> {
        let axes = self.axes_mut(axis)?;
        charts::draw(axes, request)?;
        self.current = Some(axis.0);
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.viewport.width, self.viewport.height)
    }

    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotsResult<()> {
        root.fill(&RGBAColor::from(self.facecolor))?;
        let text = fonts::text_available();
        for axes in &self.axes {
            axes.paint(root, text)?;
        }
        debug!(axes = self.axes.len(), text, "painted figure");
        Ok(())
    }
}
