//! Detection of rectilinear lat/lon lattices among scattered inputs.
//!
//! Observations produced by the sampler form a complete lattice. On those,
//! tensor-product kernels are exact at the nodes and much cheaper than a
//! triangulation.

use std::collections::HashMap;

use climate_common::SamplePoint;

use crate::kernels::{axis_position, bilinear_interpolate, cubic_interpolate};
use crate::types::InterpolationMethod;

/// Values on a complete rectilinear lattice, latitude-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RectilinearLattice {
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    values: Vec<f64>,
}

impl RectilinearLattice {
    /// Detect a lattice in the inputs.
    ///
    /// Succeeds only when every `(lat, lon)` combination of the distinct
    /// input latitudes and longitudes appears exactly once, with at least two
    /// of each.
    pub fn detect(points: &[SamplePoint], values: &[f64]) -> Option<Self> {
        let mut latitudes: Vec<f64> = points.iter().map(|p| p.latitude + 0.0).collect();
        let mut longitudes: Vec<f64> = points.iter().map(|p| p.longitude + 0.0).collect();
        sort_dedup(&mut latitudes);
        sort_dedup(&mut longitudes);

        let (ny, nx) = (latitudes.len(), longitudes.len());
        if ny < 2 || nx < 2 || ny * nx != points.len() {
            return None;
        }

        let lat_index: HashMap<u64, usize> = index_by_bits(&latitudes);
        let lon_index: HashMap<u64, usize> = index_by_bits(&longitudes);

        let mut grid = vec![f64::NAN; ny * nx];
        let mut seen = vec![false; ny * nx];
        for (p, &v) in points.iter().zip(values) {
            let row = lat_index[&(p.latitude + 0.0).to_bits()];
            let col = lon_index[&(p.longitude + 0.0).to_bits()];
            let slot = row * nx + col;
            if seen[slot] {
                return None;
            }
            seen[slot] = true;
            grid[slot] = v;
        }

        Some(Self {
            latitudes,
            longitudes,
            values: grid,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.latitudes.len(), self.longitudes.len())
    }

    /// Interpolated value, or `None` outside the lattice bounds.
    pub fn sample(&self, lat: f64, lon: f64, method: InterpolationMethod) -> Option<f64> {
        let y = axis_position(&self.latitudes, lat)?;
        let x = axis_position(&self.longitudes, lon)?;
        let (ny, nx) = self.shape();

        let v = match method {
            InterpolationMethod::Linear => bilinear_interpolate(&self.values, nx, ny, x, y),
            InterpolationMethod::Cubic => cubic_interpolate(&self.values, nx, ny, x, y),
        };
        v.is_finite().then_some(v)
    }
}

fn sort_dedup(axis: &mut Vec<f64>) {
    axis.sort_by(f64::total_cmp);
    axis.dedup();
}

fn index_by_bits(axis: &[f64]) -> HashMap<u64, usize> {
    axis.iter().enumerate().map(|(i, v)| (v.to_bits(), i)).collect()
}
