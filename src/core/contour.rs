//! Filled contour bands over a rectilinear grid.
//!
//! Every grid cell is split into two triangles; the scalar field is linear
//! on each triangle, so a band `lower <= z <= upper` clips each triangle to
//! a convex polygon.

use crate::error::{PlotsError, PlotsResult};

/// Region between two consecutive levels.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourBand {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
    pub polygons: Vec<Vec<(f64, f64)>>,
}

type Vertex = (f64, f64, f64);

/// `z` is indexed as `z[row][column]`, with rows following `y` and columns
/// following `x`. `levels` must be strictly increasing.
pub fn filled_bands(
    x: &[f64],
    y: &[f64],
    z: &[Vec<f64>],
    levels: &[f64],
) -> PlotsResult<Vec<ContourBand>> {
    validate_grid(x, y, z)?;
    if levels.len() < 2 {
        return Err(PlotsError::InvalidData(
            "contour levels need at least two values".to_owned(),
        ));
    }
    if levels.iter().any(|level| !level.is_finite())
        || levels.windows(2).any(|pair| !(pair[0] < pair[1]))
    {
        return Err(PlotsError::InvalidData(
            "contour levels must be finite and increasing".to_owned(),
        ));
    }

    let mut bands: Vec<ContourBand> = levels
        .windows(2)
        .enumerate()
        .map(|(index, pair)| ContourBand {
            index,
            lower: pair[0],
            upper: pair[1],
            polygons: Vec::new(),
        })
        .collect();

    for row in 0..y.len() - 1 {
        for column in 0..x.len() - 1 {
            let corner = |r: usize, c: usize| (x[c], y[r], z[r][c]);
            let cell_area = ((x[column + 1] - x[column]) * (y[row + 1] - y[row])).abs();
            let a = corner(row, column);
            let b = corner(row, column + 1);
            let c = corner(row + 1, column + 1);
            let d = corner(row + 1, column);
            for triangle in [[a, b, c], [a, c, d]] {
                if triangle.iter().any(|vertex| !vertex.2.is_finite()) {
                    continue;
                }
                for band in &mut bands {
                    let clipped = clip(&triangle, band.lower, true);
                    let clipped = clip(&clipped, band.upper, false);
                    let polygon: Vec<(f64, f64)> =
                        clipped.into_iter().map(|(px, py, _)| (px, py)).collect();
                    if polygon.len() >= 3 && polygon_area(&polygon) > f64::EPSILON * cell_area {
                        band.polygons.push(polygon);
                    }
                }
            }
        }
    }

    Ok(bands)
}

/// Evenly spaced levels spanning the finite values of `z`.
pub fn auto_levels(z: &[Vec<f64>], count: usize) -> PlotsResult<Vec<f64>> {
    let (min, max) = z
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or_else(|| PlotsError::InvalidData("contour field has no finite values".to_owned()))?;
    let (min, max) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let count = count.max(1);
    Ok((0..=count)
        .map(|i| min + (max - min) * i as f64 / count as f64)
        .collect())
}

pub fn validate_grid(x: &[f64], y: &[f64], z: &[Vec<f64>]) -> PlotsResult<()> {
    if x.len() < 2 || y.len() < 2 {
        return Err(PlotsError::InvalidData(
            "grid needs at least two coordinates on each axis".to_owned(),
        ));
    }
    if z.len() != y.len() || z.iter().any(|row| row.len() != x.len()) {
        return Err(PlotsError::InvalidData(format!(
            "grid values must have shape ({}, {})",
            y.len(),
            x.len()
        )));
    }
    Ok(())
}

/// Unsigned shoelace area.
#[must_use]
pub fn polygon_area(polygon: &[(f64, f64)]) -> f64 {
    let mut twice = 0.0;
    for (index, (x0, y0)) in polygon.iter().enumerate() {
        let (x1, y1) = polygon[(index + 1) % polygon.len()];
        twice += x0 * y1 - x1 * y0;
    }
    twice.abs() / 2.0
}

/// Keeps the part of `polygon` where `z >= threshold` (`keep_above`) or
/// `z <= threshold`.
fn clip(polygon: &[Vertex], threshold: f64, keep_above: bool) -> Vec<Vertex> {
    let inside = |vertex: &Vertex| {
        if keep_above {
            vertex.2 >= threshold
        } else {
            vertex.2 <= threshold
        }
    };

    let mut output = Vec::with_capacity(polygon.len() + 2);
    for (index, current) in polygon.iter().enumerate() {
        let next = &polygon[(index + 1) % polygon.len()];
        if inside(current) {
            output.push(*current);
        }
        if inside(current) != inside(next) {
            let t = (threshold - current.2) / (next.2 - current.2);
            output.push((
                current.0 + (next.0 - current.0) * t,
                current.1 + (next.1 - current.1) * t,
                threshold,
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{auto_levels, filled_bands, polygon_area};

    fn ramp() -> (Vec<f64>, Vec<f64>, Vec<Vec<f64>>) {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0];
        let z = vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]];
        (x, y, z)
    }

    #[test]
    fn bands_partition_a_linear_ramp() {
        let (x, y, z) = ramp();
        let bands = filled_bands(&x, &y, &z, &[0.0, 0.5, 2.0]).expect("bands");
        assert_eq!(bands.len(), 2);
        let lower: f64 = bands[0].polygons.iter().map(|p| polygon_area(p)).sum();
        let upper: f64 = bands[1].polygons.iter().map(|p| polygon_area(p)).sum();
        assert!((lower - 0.5).abs() < 1e-9);
        assert!((upper - 1.5).abs() < 1e-9);
    }

    #[test]
    fn mismatched_grid_is_rejected() {
        let (x, y, _) = ramp();
        let z = vec![vec![0.0, 1.0], vec![0.0, 1.0]];
        assert!(filled_bands(&x, &y, &z, &[0.0, 1.0]).is_err());
    }

    #[test]
    fn decreasing_levels_are_rejected() {
        let (x, y, z) = ramp();
        assert!(filled_bands(&x, &y, &z, &[1.0, 0.5]).is_err());
    }

    #[test]
    fn non_finite_levels_are_rejected() {
        let (x, y, z) = ramp();
        assert!(filled_bands(&x, &y, &z, &[0.0, 1.0, f64::INFINITY]).is_err());
        assert!(filled_bands(&x, &y, &z, &[f64::NEG_INFINITY, 1.0]).is_err());
        assert!(filled_bands(&x, &y, &z, &[0.0, f64::NAN, 2.0]).is_err());
    }

    #[test]
    fn auto_levels_span_the_field() {
        let (_, _, z) = ramp();
        assert_eq!(auto_levels(&z, 4).expect("levels"), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }
}
