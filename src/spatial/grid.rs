//! Spatial Grid Module
//! 2D histogram binning, log scaling, and Gaussian smoothing for the heatmap.

use std::str::FromStr;

use crate::data::GeoPoint;

pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;
pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;

/// Boundary handling for the smoothing kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMode {
    /// Repeat the edge cell outwards.
    Nearest,
    /// Mirror the grid at its edges.
    Reflect,
    /// Wrap around (periodic in both axes).
    Wrap,
}

impl FromStr for EdgeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(EdgeMode::Nearest),
            "reflect" => Ok(EdgeMode::Reflect),
            "wrap" => Ok(EdgeMode::Wrap),
            other => Err(format!(
                "unknown edge mode '{other}' (expected nearest, reflect, or wrap)"
            )),
        }
    }
}

/// A bins_x x bins_y histogram over the full world extent. Row 0 is the
/// southernmost latitude band; values are stored row-major.
///
/// Binning always spans the world extent rather than the data extent so the
/// heat layer stays geographically aligned with the basemap.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatGrid {
    bins_x: usize,
    bins_y: usize,
    values: Vec<f64>,
}

impl HeatGrid {
    /// Accumulate points into bins. Coincident points add up; points exactly
    /// on the east or north edge land in the final bin.
    pub fn bin(points: &[GeoPoint], bins_x: usize, bins_y: usize) -> Self {
        assert!(bins_x > 0 && bins_y > 0, "bin counts must be positive");

        let mut values = vec![0.0; bins_x * bins_y];
        for point in points {
            let fx = (point.longitude - LON_MIN) / (LON_MAX - LON_MIN) * bins_x as f64;
            let fy = (point.latitude - LAT_MIN) / (LAT_MAX - LAT_MIN) * bins_y as f64;
            let ix = (fx as usize).min(bins_x - 1);
            let iy = (fy as usize).min(bins_y - 1);
            values[iy * bins_x + ix] += 1.0;
        }

        Self {
            bins_x,
            bins_y,
            values,
        }
    }

    /// Natural-log scale each cell, mapping empty cells (and single counts)
    /// to zero, matching the reference figure's "log frequency" scale.
    pub fn log_scaled(&self) -> Self {
        let values = self
            .values
            .iter()
            .map(|&v| if v > 0.0 { v.ln() } else { 0.0 })
            .collect();
        Self {
            values,
            ..*self
        }
    }

    /// Separable Gaussian blur with the given sigma. A non-positive sigma
    /// returns the grid unchanged.
    pub fn smoothed(&self, sigma: f64, mode: EdgeMode) -> Self {
        if sigma <= 0.0 {
            return self.clone();
        }

        let kernel = gaussian_kernel(sigma);
        let radius = (kernel.len() / 2) as isize;

        // Horizontal pass.
        let mut pass_x = vec![0.0; self.values.len()];
        for iy in 0..self.bins_y {
            for ix in 0..self.bins_x {
                let mut acc = 0.0;
                for (k, w) in kernel.iter().enumerate() {
                    let sx = resolve_index(ix as isize + k as isize - radius, self.bins_x, mode);
                    acc += w * self.values[iy * self.bins_x + sx];
                }
                pass_x[iy * self.bins_x + ix] = acc;
            }
        }

        // Vertical pass.
        let mut values = vec![0.0; self.values.len()];
        for iy in 0..self.bins_y {
            for ix in 0..self.bins_x {
                let mut acc = 0.0;
                for (k, w) in kernel.iter().enumerate() {
                    let sy = resolve_index(iy as isize + k as isize - radius, self.bins_y, mode);
                    acc += w * pass_x[sy * self.bins_x + ix];
                }
                values[iy * self.bins_x + ix] = acc;
            }
        }

        Self {
            values,
            ..*self
        }
    }

    pub fn bins(&self) -> (usize, usize) {
        (self.bins_x, self.bins_y)
    }

    pub fn value(&self, ix: usize, iy: usize) -> f64 {
        self.values[iy * self.bins_x + ix]
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// True when no cell holds any mass (e.g. an empty input CSV); the
    /// renderer then produces a basemap-only figure.
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Geographic bounds of one cell: ((lon0, lon1), (lat0, lat1)).
    pub fn cell_bounds(&self, ix: usize, iy: usize) -> ((f64, f64), (f64, f64)) {
        let dlon = (LON_MAX - LON_MIN) / self.bins_x as f64;
        let dlat = (LAT_MAX - LAT_MIN) / self.bins_y as f64;
        let lon0 = LON_MIN + ix as f64 * dlon;
        let lat0 = LAT_MIN + iy as f64 * dlat;
        ((lon0, lon0 + dlon), (lat0, lat0 + dlat))
    }
}

/// Normalized 1D Gaussian kernel, truncated at 4 sigma.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (sigma * 4.0).ceil().max(1.0) as isize;
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|x| (-(x as f64).powi(2) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

fn resolve_index(i: isize, n: usize, mode: EdgeMode) -> usize {
    let n = n as isize;
    let resolved = match mode {
        EdgeMode::Nearest => i.clamp(0, n - 1),
        EdgeMode::Reflect => {
            let i = i.rem_euclid(2 * n);
            if i >= n {
                2 * n - 1 - i
            } else {
                i
            }
        }
        EdgeMode::Wrap => i.rem_euclid(n),
    };
    resolved as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn empty_input_yields_blank_grid() {
        let grid = HeatGrid::bin(&[], 10, 10);
        assert!(grid.is_blank());
        assert_eq!(grid.max_value(), 0.0);
    }

    #[test]
    fn coincident_points_accumulate() {
        let points = vec![point(10.0, 20.0), point(10.0, 20.0), point(10.0, 20.0)];
        let grid = HeatGrid::bin(&points, 36, 18);
        assert_eq!(grid.max_value(), 3.0);
        assert_eq!(grid.total(), 3.0);
    }

    #[test]
    fn edge_points_land_in_final_bin() {
        let grid = HeatGrid::bin(&[point(90.0, 180.0)], 10, 10);
        assert_eq!(grid.value(9, 9), 1.0);
    }

    #[test]
    fn log_scaling_maps_empty_and_singleton_cells_to_zero() {
        let points = vec![
            point(0.0, 0.0),
            point(45.0, 90.0),
            point(45.0, 90.0),
            point(45.0, 90.0),
        ];
        let grid = HeatGrid::bin(&points, 4, 4).log_scaled();
        assert_eq!(grid.value(2, 2), 0.0); // a single count
        assert!((grid.max_value() - 3.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn smoothing_preserves_mass_away_from_edges() {
        let grid = HeatGrid::bin(&[point(0.0, 0.0)], 21, 21);
        let smoothed = grid.smoothed(1.0, EdgeMode::Nearest);
        assert_eq!(smoothed.bins(), (21, 21));
        assert!((smoothed.total() - 1.0).abs() < 1e-9);
        assert!(smoothed.max_value() < 1.0);
    }

    #[test]
    fn zero_sigma_is_identity() {
        let grid = HeatGrid::bin(&[point(10.0, 10.0)], 8, 8);
        assert_eq!(grid.smoothed(0.0, EdgeMode::Reflect), grid);
    }

    #[test]
    fn reflect_and_wrap_indices() {
        assert_eq!(resolve_index(-1, 4, EdgeMode::Reflect), 0);
        assert_eq!(resolve_index(4, 4, EdgeMode::Reflect), 3);
        assert_eq!(resolve_index(-1, 4, EdgeMode::Wrap), 3);
        assert_eq!(resolve_index(5, 4, EdgeMode::Nearest), 3);
    }
}
