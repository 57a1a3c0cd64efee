use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend};
use serde::{Deserialize, Serialize};

use crate::api::DrawOptions;
use crate::error::PlotsResult;

/// Handle to one axis of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(pub(crate) usize);

impl AxisId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Drawing surface the dispatcher delegates to.
///
/// `Figure` is the built-in implementation; hosts can plug in their own
/// surface (or a recorder in tests). Painting goes through any plotters
/// `DrawingBackend`, so a canvas can also be drawn onto a host-owned
/// backend instead of being encoded.
pub trait Canvas {
    /// Current axis, created on demand when the canvas has none.
    fn gca(&mut self) -> AxisId;

    /// Draws one chart onto `axis`.
    fn draw(&mut self, axis: AxisId, request: ChartRequest) -> PlotsResult<()>;

    /// Pixel size of the encoded image.
    fn size(&self) -> (u32, u32);

    /// Paints the whole canvas, background included, onto `root`.
    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotsResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Hist,
    ErrorBar,
    Violin,
    Event,
    Hist2d,
    Hexbin,
    Scatter,
    Bar,
    Pie,
    Box,
    Quiver,
    Streamplot,
    Contourf,
}

impl ChartKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hist => "hist",
            Self::ErrorBar => "errorbar",
            Self::Violin => "violinplot",
            Self::Event => "eventplot",
            Self::Hist2d => "hist2d",
            Self::Hexbin => "hexbin",
            Self::Scatter => "scatter",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Box => "boxplot",
            Self::Quiver => "quiver",
            Self::Streamplot => "streamplot",
            Self::Contourf => "contourf",
        }
    }
}

/// Bar anchors: numeric positions or category labels placed at `0..n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BarPositions {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl BarPositions {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical(labels) => labels.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn coordinates(&self) -> Vec<f64> {
        match self {
            Self::Numeric(values) => values.clone(),
            Self::Categorical(labels) => (0..labels.len()).map(|i| i as f64).collect(),
        }
    }
}

impl From<Vec<f64>> for BarPositions {
    fn from(values: Vec<f64>) -> Self {
        Self::Numeric(values)
    }
}

impl From<&[f64]> for BarPositions {
    fn from(values: &[f64]) -> Self {
        Self::Numeric(values.to_vec())
    }
}

impl From<Vec<String>> for BarPositions {
    fn from(labels: Vec<String>) -> Self {
        Self::Categorical(labels)
    }
}

impl From<&[&str]> for BarPositions {
    fn from(labels: &[&str]) -> Self {
        Self::Categorical(labels.iter().map(|label| (*label).to_owned()).collect())
    }
}

/// Bar heights: one value for every bar, or one per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BarHeights {
    Uniform(f64),
    PerBar(Vec<f64>),
}

impl BarHeights {
    /// Heights expanded to `count` bars; `None` when the lengths disagree.
    #[must_use]
    pub fn expand(&self, count: usize) -> Option<Vec<f64>> {
        match self {
            Self::Uniform(height) => Some(vec![*height; count]),
            Self::PerBar(heights) if heights.len() == count => Some(heights.clone()),
            Self::PerBar(heights) if heights.len() == 1 => Some(vec![heights[0]; count]),
            Self::PerBar(_) => None,
        }
    }
}

impl From<f64> for BarHeights {
    fn from(height: f64) -> Self {
        Self::Uniform(height)
    }
}

impl From<Vec<f64>> for BarHeights {
    fn from(heights: Vec<f64>) -> Self {
        Self::PerBar(heights)
    }
}

impl From<&[f64]> for BarHeights {
    fn from(heights: &[f64]) -> Self {
        Self::PerBar(heights.to_vec())
    }
}

/// Contour levels: a target band count or explicit boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContourLevels {
    Count(usize),
    Explicit(Vec<f64>),
}

impl From<usize> for ContourLevels {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<Vec<f64>> for ContourLevels {
    fn from(levels: Vec<f64>) -> Self {
        Self::Explicit(levels)
    }
}

/// One drawing call, with its data and forwarded options.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartRequest {
    Hist {
        x: Vec<f64>,
        options: DrawOptions,
    },
    ErrorBar {
        x: Vec<f64>,
        y: Vec<f64>,
        options: DrawOptions,
    },
    Violin {
        dataset: Vec<Vec<f64>>,
        positions: Vec<f64>,
        options: DrawOptions,
    },
    Event {
        positions: Vec<Vec<f64>>,
        options: DrawOptions,
    },
    Hist2d {
        x: Vec<f64>,
        y: Vec<f64>,
        options: DrawOptions,
    },
    Hexbin {
        x: Vec<f64>,
        y: Vec<f64>,
        options: DrawOptions,
    },
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
        options: DrawOptions,
    },
    Bar {
        x: BarPositions,
        height: BarHeights,
        options: DrawOptions,
    },
    Pie {
        x: Vec<f64>,
        options: DrawOptions,
    },
    Box {
        dataset: Vec<Vec<f64>>,
        options: DrawOptions,
    },
    Quiver {
        x: Vec<f64>,
        y: Vec<f64>,
        u: Vec<f64>,
        v: Vec<f64>,
        options: DrawOptions,
    },
    Streamplot {
        x: Vec<f64>,
        y: Vec<f64>,
        u: Vec<Vec<f64>>,
        v: Vec<Vec<f64>>,
        options: DrawOptions,
    },
    Contourf {
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<Vec<f64>>,
        levels: ContourLevels,
        options: DrawOptions,
    },
}

impl ChartRequest {
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Hist { .. } => ChartKind::Hist,
            Self::ErrorBar { .. } => ChartKind::ErrorBar,
            Self::Violin { .. } => ChartKind::Violin,
            Self::Event { .. } => ChartKind::Event,
            Self::Hist2d { .. } => ChartKind::Hist2d,
            Self::Hexbin { .. } => ChartKind::Hexbin,
            Self::Scatter { .. } => ChartKind::Scatter,
            Self::Bar { .. } => ChartKind::Bar,
            Self::Pie { .. } => ChartKind::Pie,
            Self::Box { .. } => ChartKind::Box,
            Self::Quiver { .. } => ChartKind::Quiver,
            Self::Streamplot { .. } => ChartKind::Streamplot,
            Self::Contourf { .. } => ChartKind::Contourf,
        }
    }

    #[must_use]
    pub fn options(&self) -> &DrawOptions {
        match self {
            Self::Hist { options, .. }
            | Self::ErrorBar { options, .. }
            | Self::Violin { options, .. }
            | Self::Event { options, .. }
            | Self::Hist2d { options, .. }
            | Self::Hexbin { options, .. }
            | Self::Scatter { options, .. }
            | Self::Bar { options, .. }
            | Self::Pie { options, .. }
            | Self::Box { options, .. }
            | Self::Quiver { options, .. }
            | Self::Streamplot { options, .. }
            | Self::Contourf { options, .. } => options,
        }
    }
}
