//! Binning and summary statistics behind the statistical chart kinds.
//!
//! Non-finite samples are ignored throughout.

use std::collections::BTreeMap;

use crate::core::Bounds;

/// Equal-width histogram over `[min, max]` of the finite samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<f64>,
}

#[must_use]
pub fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Returns `(min, max)` of the finite samples, widened by 0.5 on each side
/// when every sample is equal.
#[must_use]
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    if min == max {
        Some((min - 0.5, max + 0.5))
    } else {
        Some((min, max))
    }
}

#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (min, max) = value_range(values).unwrap_or((0.0, 1.0));
    let width = (max - min) / bins as f64;
    let edges = (0..=bins).map(|i| min + width * i as f64).collect();

    let mut counts = vec![0.0; bins];
    for value in values.iter().copied().filter(|v| v.is_finite()) {
        counts[bin_index(value, min, width, bins)] += 1.0;
    }
    Histogram { edges, counts }
}

/// Bin index with the last bin closed on the right.
fn bin_index(value: f64, min: f64, width: f64, bins: usize) -> usize {
    let raw = ((value - min) / width).floor();
    if raw < 0.0 {
        0
    } else {
        (raw as usize).min(bins - 1)
    }
}

impl Histogram {
    /// Rescales counts so the histogram integrates to one.
    pub fn normalize_density(&mut self) {
        let total: f64 = self.counts.iter().sum();
        if total <= 0.0 {
            return;
        }
        for (count, edge) in self.counts.iter_mut().zip(self.edges.windows(2)) {
            *count /= total * (edge[1] - edge[0]);
        }
    }

    /// Replaces counts with their running total.
    pub fn accumulate(&mut self) {
        let mut running = 0.0;
        for count in &mut self.counts {
            running += *count;
            *count = running;
        }
    }
}

/// Two-dimensional histogram over the bounding box of `(x, y)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2d {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    /// `counts[ix][iy]`.
    pub counts: Vec<Vec<f64>>,
}

#[must_use]
pub fn histogram2d(x: &[f64], y: &[f64], bins: usize) -> Histogram2d {
    let bins = bins.max(1);
    let pairs: Vec<(f64, f64)> = finite_pairs(x, y).collect();
    let xs: Vec<f64> = pairs.iter().map(|(px, _)| *px).collect();
    let ys: Vec<f64> = pairs.iter().map(|(_, py)| *py).collect();
    let (x_min, x_max) = value_range(&xs).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = value_range(&ys).unwrap_or((0.0, 1.0));
    let x_width = (x_max - x_min) / bins as f64;
    let y_width = (y_max - y_min) / bins as f64;

    let mut counts = vec![vec![0.0; bins]; bins];
    for (px, py) in pairs {
        let ix = bin_index(px, x_min, x_width, bins);
        let iy = bin_index(py, y_min, y_width, bins);
        counts[ix][iy] += 1.0;
    }
    Histogram2d {
        x_edges: (0..=bins).map(|i| x_min + x_width * i as f64).collect(),
        y_edges: (0..=bins).map(|i| y_min + y_width * i as f64).collect(),
        counts,
    }
}

fn finite_pairs<'a>(x: &'a [f64], y: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
    x.iter()
        .copied()
        .zip(y.iter().copied())
        .filter(|(px, py)| px.is_finite() && py.is_finite())
}

/// Percentile with linear interpolation between closest ranks; `q` in `[0, 1]`.
/// `sorted` must be ascending and non-empty.
#[must_use]
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[must_use]
pub fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted = finite(values);
    sorted.sort_by(f64::total_cmp);
    sorted
}

#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Five-number summary plus Tukey whiskers and outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub mean: f64,
    /// Most extreme samples within 1.5 IQR of the box.
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub fliers: Vec<f64>,
}

#[must_use]
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let sorted = sorted_finite(values);
    let mean = mean(&sorted)?;
    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let reach = 1.5 * (q3 - q1);
    let (low_fence, high_fence) = (q1 - reach, q3 + reach);

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or(q1)
        .min(q1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .unwrap_or(q3)
        .max(q3);
    let fliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < whisker_low || *v > whisker_high)
        .collect();

    Some(BoxSummary {
        q1,
        median,
        q3,
        mean,
        whisker_low,
        whisker_high,
        fliers,
    })
}

/// Gaussian kernel density estimate evaluated on `points` evenly spaced
/// samples between the data extremes, with Scott's rule bandwidth.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelDensity {
    pub coords: Vec<f64>,
    pub densities: Vec<f64>,
}

#[must_use]
pub fn kernel_density(values: &[f64], points: usize) -> Option<KernelDensity> {
    let samples = finite(values);
    let n = samples.len();
    let mean = mean(&samples)?;
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });

    let variance = if n > 1 {
        samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };
    let spread = variance.sqrt();
    let bandwidth = if spread > 0.0 {
        spread * (n as f64).powf(-0.2)
    } else {
        // Degenerate sample: a narrow bump keeps the body visible.
        (mean.abs() * 0.05).max(0.05)
    };

    let points = points.max(2);
    let coords: Vec<f64> = if max > min {
        (0..points)
            .map(|i| min + (max - min) * i as f64 / (points - 1) as f64)
            .collect()
    } else {
        (0..points)
            .map(|i| min - bandwidth + 2.0 * bandwidth * i as f64 / (points - 1) as f64)
            .collect()
    };

    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let densities = coords
        .iter()
        .map(|c| {
            norm * samples
                .iter()
                .map(|v| (-0.5 * ((c - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
        })
        .collect();

    Some(KernelDensity { coords, densities })
}

/// Hexagonal binning on two interleaved rectangular lattices.
#[derive(Debug, Clone, PartialEq)]
pub struct HexBins {
    /// Horizontal distance between neighbouring centers of one lattice.
    pub cell_width: f64,
    /// Vertical distance between neighbouring rows of one lattice.
    pub cell_height: f64,
    /// Occupied cells as `(center, count)`, in deterministic order.
    pub cells: Vec<((f64, f64), f64)>,
}

impl HexBins {
    /// Vertices of the hexagon centered at `center`.
    #[must_use]
    pub fn hexagon(&self, center: (f64, f64)) -> Vec<(f64, f64)> {
        let (sx, sy) = (self.cell_width, self.cell_height / 3.0);
        [
            (0.5, -0.5),
            (0.5, 0.5),
            (0.0, 1.0),
            (-0.5, 0.5),
            (-0.5, -0.5),
            (0.0, -1.0),
        ]
        .into_iter()
        .map(|(dx, dy)| (center.0 + dx * sx, center.1 + dy * sy))
        .collect()
    }
}

/// `gridsize` is the number of hexagons across the x extent.
#[must_use]
pub fn hexbin(x: &[f64], y: &[f64], gridsize: usize) -> HexBins {
    let nx = gridsize.max(1) as f64;
    let ny = (nx / 3f64.sqrt()).floor().max(1.0);
    let pairs: Vec<(f64, f64)> = finite_pairs(x, y).collect();
    let bounds = Bounds::from_points(pairs.iter().copied())
        .unwrap_or_else(|| Bounds::new(0.0, 1.0, 0.0, 1.0));
    let (x_min, x_max) = widen(bounds.x_min, bounds.x_max);
    let (y_min, y_max) = widen(bounds.y_min, bounds.y_max);
    let sx = (x_max - x_min) / nx;
    let sy = (y_max - y_min) / ny;

    // Key: (lattice, column, row); lattice 1 is offset by half a cell.
    let mut counts: BTreeMap<(u8, i64, i64), f64> = BTreeMap::new();
    for (px, py) in pairs {
        let ix = (px - x_min) / sx;
        let iy = (py - y_min) / sy;
        let (ix1, iy1) = (ix.round(), iy.round());
        let (ix2, iy2) = (ix.floor(), iy.floor());
        let d1 = (ix - ix1).powi(2) + 3.0 * (iy - iy1).powi(2);
        let d2 = (ix - ix2 - 0.5).powi(2) + 3.0 * (iy - iy2 - 0.5).powi(2);
        let key = if d1 < d2 {
            (0, ix1 as i64, iy1 as i64)
        } else {
            (1, ix2 as i64, iy2 as i64)
        };
        *counts.entry(key).or_insert(0.0) += 1.0;
    }

    let cells = counts
        .into_iter()
        .map(|((lattice, column, row), count)| {
            let offset = if lattice == 0 { 0.0 } else { 0.5 };
            let center = (
                x_min + (column as f64 + offset) * sx,
                y_min + (row as f64 + offset) * sy,
            );
            (center, count)
        })
        .collect();

    HexBins {
        cell_width: sx,
        cell_height: sy,
        cells,
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        (min, max)
    } else {
        (min - 0.1, max + 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::{box_summary, histogram, hexbin, kernel_density, quantile};

    #[test]
    fn histogram_closes_the_last_bin() {
        let hist = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(hist.edges, vec![0.0, 2.0, 4.0]);
        assert_eq!(hist.counts, vec![2.0, 3.0]);
    }

    #[test]
    fn density_integrates_to_one() {
        let mut hist = histogram(&[0.0, 0.5, 1.0, 3.0, 4.0], 4);
        hist.normalize_density();
        let area: f64 = hist
            .counts
            .iter()
            .zip(hist.edges.windows(2))
            .map(|(count, edge)| count * (edge[1] - edge[0]))
            .sum();
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&sorted, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile(&sorted, 0.25) - 1.75).abs() < 1e-12);
    }

    #[test]
    fn box_summary_flags_outliers() {
        let summary = box_summary(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).expect("summary");
        assert_eq!(summary.fliers, vec![100.0]);
        assert!((summary.whisker_high - 5.0).abs() < 1e-12);
        assert!((summary.whisker_low - 1.0).abs() < 1e-12);
    }

    #[test]
    fn kde_is_positive_and_spans_the_data() {
        let kde = kernel_density(&[1.0, 2.0, 2.5, 4.0], 50).expect("kde");
        assert_eq!(kde.coords.len(), 50);
        assert!((kde.coords[0] - 1.0).abs() < 1e-12);
        assert!((kde.coords[49] - 4.0).abs() < 1e-12);
        assert!(kde.densities.iter().all(|d| *d > 0.0));
    }

    #[test]
    fn hexbin_counts_every_sample_once() {
        let x = [0.0, 0.1, 0.2, 5.0, 9.9, 10.0];
        let y = [0.0, 0.1, 0.0, 5.0, 9.8, 10.0];
        let bins = hexbin(&x, &y, 10);
        let total: f64 = bins.cells.iter().map(|(_, count)| count).sum();
        assert!((total - 6.0).abs() < 1e-12);
    }
}
