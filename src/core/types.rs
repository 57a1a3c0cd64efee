use serde::{Deserialize, Serialize};

/// Pixel size of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned box in data (or figure-fraction) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Smallest box holding every finite point; `None` when there is none.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(None, |acc: Option<Self>, (x, y)| {
                Some(match acc {
                    None => Self::new(x, x, y, y),
                    Some(bounds) => bounds.including(x, y),
                })
            })
    }

    #[must_use]
    pub fn including(self, x: f64, y: f64) -> Self {
        Self::new(
            self.x_min.min(x),
            self.x_max.max(x),
            self.y_min.min(y),
            self.y_max.max(y),
        )
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.x_min.min(other.x_min),
            self.x_max.max(other.x_max),
            self.y_min.min(other.y_min),
            self.y_max.max(other.y_max),
        )
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y_max - self.y_min
    }
}
