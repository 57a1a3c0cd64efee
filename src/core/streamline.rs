//! Streamline tracing over an evenly spaced vector field.
//!
//! Integration runs in normalized domain coordinates (`[0, 1]` on both
//! axes) with unit speed, so line spacing depends only on `density`. An
//! occupancy mask of `30 * density` cells per side stops lines from
//! crowding into cells another line already crossed.

use crate::core::contour::validate_grid;
use crate::error::{PlotsError, PlotsResult};

const BASE_MASK_CELLS: f64 = 30.0;
const MIN_LINE_LENGTH: f64 = 0.08;
const MAX_LINE_LENGTH: f64 = 4.0;
const MAX_STEPS: usize = 4_000;

struct Field<'a> {
    x: &'a [f64],
    y: &'a [f64],
    u: &'a [Vec<f64>],
    v: &'a [Vec<f64>],
}

impl Field<'_> {
    /// Velocity in normalized units at a normalized position, or `None`
    /// outside the domain or where the field is not finite.
    fn velocity(&self, fx: f64, fy: f64) -> Option<(f64, f64)> {
        if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
            return None;
        }
        let columns = self.x.len() - 1;
        let rows = self.y.len() - 1;
        let gx = fx * columns as f64;
        let gy = fy * rows as f64;
        let c0 = (gx.floor() as usize).min(columns - 1);
        let r0 = (gy.floor() as usize).min(rows - 1);
        let (tx, ty) = (gx - c0 as f64, gy - r0 as f64);

        let bilinear = |grid: &[Vec<f64>]| {
            let top = grid[r0][c0] * (1.0 - tx) + grid[r0][c0 + 1] * tx;
            let bottom = grid[r0 + 1][c0] * (1.0 - tx) + grid[r0 + 1][c0 + 1] * tx;
            top * (1.0 - ty) + bottom * ty
        };
        let width = self.x[columns] - self.x[0];
        let height = self.y[rows] - self.y[0];
        let (u, v) = (bilinear(self.u) / width, bilinear(self.v) / height);
        (u.is_finite() && v.is_finite()).then_some((u, v))
    }

    /// Unit-speed direction at a normalized position.
    fn direction(&self, fx: f64, fy: f64) -> Option<(f64, f64)> {
        let (u, v) = self.velocity(fx, fy)?;
        let speed = u.hypot(v);
        (speed > f64::EPSILON).then(|| (u / speed, v / speed))
    }

    fn to_data(&self, fx: f64, fy: f64) -> (f64, f64) {
        let (x0, x1) = (self.x[0], self.x[self.x.len() - 1]);
        let (y0, y1) = (self.y[0], self.y[self.y.len() - 1]);
        (x0 + fx * (x1 - x0), y0 + fy * (y1 - y0))
    }
}

struct Mask {
    size: usize,
    occupied: Vec<bool>,
}

impl Mask {
    fn cell(&self, fx: f64, fy: f64) -> (usize, usize) {
        let last = (self.size - 1) as f64;
        (
            (fx * last).round().clamp(0.0, last) as usize,
            (fy * last).round().clamp(0.0, last) as usize,
        )
    }

    fn index(&self, (column, row): (usize, usize)) -> usize {
        row * self.size + column
    }
}

/// Traces streamlines; `x` and `y` must be increasing and evenly spaced,
/// `u` and `v` are indexed as `[row][column]`. Returned lines are in data
/// coordinates, ordered along the flow.
pub fn streamlines(
    x: &[f64],
    y: &[f64],
    u: &[Vec<f64>],
    v: &[Vec<f64>],
    density: f64,
) -> PlotsResult<Vec<Vec<(f64, f64)>>> {
    validate_grid(x, y, u)?;
    validate_grid(x, y, v)?;
    ensure_evenly_spaced(x, "x")?;
    ensure_evenly_spaced(y, "y")?;
    if !density.is_finite() || density <= 0.0 {
        return Err(PlotsError::InvalidData(
            "streamline density must be finite and > 0".to_owned(),
        ));
    }

    let field = Field { x, y, u, v };
    let size = (BASE_MASK_CELLS * density).round().max(2.0) as usize;
    let mut mask = Mask {
        size,
        occupied: vec![false; size * size],
    };
    let step = 0.5 / (size - 1) as f64;
    let last = (size - 1) as f64;

    let mut lines = Vec::new();
    for row in 0..size {
        for column in 0..size {
            let seed_cell = (column, row);
            if mask.occupied[mask.index(seed_cell)] {
                continue;
            }
            let start = (column as f64 / last, row as f64 / last);
            if field.direction(start.0, start.1).is_none() {
                continue;
            }

            let seed_index = mask.index(seed_cell);
            mask.occupied[seed_index] = true;
            let mut claimed = vec![seed_index];
            let backward = trace(&field, &mut mask, &mut claimed, start, -step);
            let forward = trace(&field, &mut mask, &mut claimed, start, step);

            let mut points: Vec<(f64, f64)> = backward.into_iter().rev().collect();
            points.push(start);
            points.extend(forward);

            if path_length(&points) < MIN_LINE_LENGTH {
                for index in claimed {
                    mask.occupied[index] = false;
                }
                // The seed itself stays claimed so it is not retried.
                mask.occupied[seed_index] = true;
                continue;
            }
            lines.push(
                points
                    .into_iter()
                    .map(|(fx, fy)| field.to_data(fx, fy))
                    .collect(),
            );
        }
    }
    Ok(lines)
}

/// Midpoint (RK2) integration from `start` until the line leaves the
/// domain, stalls, grows too long, or enters a cell claimed by another line.
fn trace(
    field: &Field<'_>,
    mask: &mut Mask,
    claimed: &mut Vec<usize>,
    start: (f64, f64),
    step: f64,
) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let (mut fx, mut fy) = start;
    let mut current_cell = mask.cell(fx, fy);
    let mut length = 0.0;

    for _ in 0..MAX_STEPS {
        let Some((dx1, dy1)) = field.direction(fx, fy) else {
            break;
        };
        let (mx, my) = (fx + 0.5 * step * dx1, fy + 0.5 * step * dy1);
        let Some((dx2, dy2)) = field.direction(mx, my) else {
            break;
        };
        let (nx, ny) = (fx + step * dx2, fy + step * dy2);
        if !(0.0..=1.0).contains(&nx) || !(0.0..=1.0).contains(&ny) {
            break;
        }

        let cell = mask.cell(nx, ny);
        if cell != current_cell {
            let index = mask.index(cell);
            if mask.occupied[index] {
                break;
            }
            mask.occupied[index] = true;
            claimed.push(index);
            current_cell = cell;
        }

        length += step.abs();
        fx = nx;
        fy = ny;
        points.push((fx, fy));
        if length > MAX_LINE_LENGTH {
            break;
        }
    }
    points
}

fn path_length(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1].0 - pair[0].0).hypot(pair[1].1 - pair[0].1))
        .sum()
}

fn ensure_evenly_spaced(values: &[f64], axis: &str) -> PlotsResult<()> {
    let first = values[1] - values[0];
    if !first.is_finite() || first <= 0.0 {
        return Err(PlotsError::InvalidData(format!(
            "streamplot {axis} coordinates must be increasing"
        )));
    }
    let tolerance = first.abs() * 1e-6;
    if values
        .windows(2)
        .any(|pair| ((pair[1] - pair[0]) - first).abs() > tolerance)
    {
        return Err(PlotsError::InvalidData(format!(
            "streamplot {axis} coordinates must be evenly spaced"
        )));
    }
    Ok(())
}
