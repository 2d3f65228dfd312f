//! Resampling of climate grids onto lattices and pixel fields.

use std::time::Instant;

use climate_common::{
    ClimateError, ClimateGrid, ClimateResult, ClimateVariable, InterpolatedGrid, LatLonLattice,
    SamplePoint, ScalarField,
};
use rayon::prelude::*;
use tracing::debug;

use crate::interpolant::Interpolant;
use crate::types::InterpolationMethod;

/// Resamples scattered or coarse observations onto regular targets.
///
/// Output is never undefined: unresolved targets take the mean of the
/// finite inputs for that variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialInterpolator {
    parallel: bool,
}

impl Default for SpatialInterpolator {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl SpatialInterpolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle rayon fan-out. Results are identical either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resample every variable onto a whole-sphere lattice.
    ///
    /// Variables are filled one at a time into the target points. Results
    /// are clamped to each variable's physical range. An empty grid yields
    /// an empty result.
    pub fn interpolate(
        &self,
        grid: &ClimateGrid,
        target_resolution: u32,
        method: InterpolationMethod,
    ) -> ClimateResult<InterpolatedGrid> {
        let lattice = LatLonLattice::new(target_resolution)?;
        if grid.is_empty() {
            debug!(target_resolution, "Empty input grid, skipping interpolation");
            return Ok(InterpolatedGrid::empty(target_resolution));
        }

        let start = Instant::now();
        let sources = grid.points();
        let mut output = InterpolatedGrid::for_lattice(&lattice);
        let targets: Vec<SamplePoint> = output.points.iter().map(|p| p.point).collect();

        for variable in ClimateVariable::ALL {
            let interpolant = Interpolant::new(&sources, &grid.values(variable));
            let resolve = |p: &SamplePoint| {
                let v = interpolant.sample(p.latitude, p.longitude, method);
                if v.is_finite() {
                    variable.clamp_value(v)
                } else {
                    v
                }
            };

            let values: Vec<f64> = if self.parallel {
                targets.par_iter().map(resolve).collect()
            } else {
                targets.iter().map(resolve).collect()
            };

            for (point, value) in output.points.iter_mut().zip(values) {
                point.fill(variable, value);
            }

            debug!(
                variable = %variable,
                inputs = interpolant.inputs(),
                lattice_path = interpolant.is_lattice(),
                "Interpolated variable"
            );
        }

        debug!(
            source_points = grid.len(),
            target_points = output.len(),
            target_resolution,
            method = %method,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Interpolated grid"
        );

        Ok(output)
    }

    /// Resample one variable onto a `width` x `height` pixel field.
    ///
    /// Row 0 is latitude +90 and column 0 longitude -180. An empty grid
    /// yields an all-NaN field of the requested size.
    pub fn interpolate_to_raster(
        &self,
        grid: &ClimateGrid,
        variable: ClimateVariable,
        width: usize,
        height: usize,
        method: InterpolationMethod,
    ) -> ClimateResult<ScalarField> {
        if width == 0 || height == 0 {
            return Err(ClimateError::invalid_parameter(
                "size",
                format!("{}x{} has no pixels", width, height),
            ));
        }

        let mut field = ScalarField::filled(width, height, f64::NAN);
        if grid.is_empty() {
            debug!(width, height, "Empty input grid, returning blank field");
            return Ok(field);
        }

        let start = Instant::now();
        let interpolant = Interpolant::new(&grid.points(), &grid.values(variable));
        let longitudes: Vec<f64> = (0..width).map(|x| field.column_longitude(x)).collect();
        let latitudes: Vec<f64> = (0..height).map(|y| field.row_latitude(y)).collect();

        let fill_row = |(y, row): (usize, &mut [f64])| {
            let lat = latitudes[y];
            for (cell, &lon) in row.iter_mut().zip(&longitudes) {
                *cell = interpolant.sample(lat, lon, method);
            }
        };

        if self.parallel {
            field
                .values
                .par_chunks_mut(width)
                .enumerate()
                .for_each(fill_row);
        } else {
            field.values.chunks_mut(width).enumerate().for_each(fill_row);
        }

        debug!(
            variable = %variable,
            width,
            height,
            method = %method,
            lattice_path = interpolant.is_lattice(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Interpolated raster field"
        );

        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        corner_grid, lattice_grid, linear_field, scattered_grid, uniform_observation,
    };

    #[test]
    fn test_empty_grid_interpolates_to_empty() {
        let result = SpatialInterpolator::new()
            .interpolate(&ClimateGrid::default(), 5, InterpolationMethod::Cubic)
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.resolution, 5);
    }

    #[test]
    fn test_zero_target_resolution_is_rejected() {
        let grid = lattice_grid(30, linear_field);
        assert!(SpatialInterpolator::new()
            .interpolate(&grid, 0, InterpolationMethod::Linear)
            .is_err());
    }

    #[test]
    fn test_every_target_is_filled() {
        let grid = lattice_grid(30, linear_field);
        let result = SpatialInterpolator::new()
            .interpolate(&grid, 10, InterpolationMethod::Cubic)
            .unwrap();
        assert_eq!(result.len(), 19 * 37);
        assert!(result.points.iter().all(|p| p.is_complete()));
    }

    #[test]
    fn test_lattice_linear_is_exact_on_planes() {
        let grid = lattice_grid(30, linear_field);
        let result = SpatialInterpolator::new()
            .interpolate(&grid, 10, InterpolationMethod::Linear)
            .unwrap();
        for p in &result.points {
            let expected = linear_field(p.point.latitude, p.point.longitude);
            let got = p.get(ClimateVariable::Temperature).unwrap();
            assert!((got - expected).abs() < 1e-9, "{:?}", p.point);
        }
    }

    #[test]
    fn test_results_are_clamped() {
        // Humidity collapses to 0..100 even when cubic overshoots
        let grid = lattice_grid(30, |lat, _| if lat > 0.0 { 100.0 } else { 0.0 });
        let result = SpatialInterpolator::new()
            .interpolate(&grid, 5, InterpolationMethod::Cubic)
            .unwrap();
        for p in &result.points {
            let h = p.get(ClimateVariable::Humidity).unwrap();
            assert!((0.0..=100.0).contains(&h));
            assert!(p.get(ClimateVariable::Sunlight).unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_out_of_hull_targets_take_the_mean() {
        // A small triangle near the origin; most of the globe is outside it
        let grid: ClimateGrid = vec![
            uniform_observation(0.0, 0.0, 10.0),
            uniform_observation(0.0, 20.0, 20.0),
            uniform_observation(20.0, 0.0, 60.0),
        ]
        .into_iter()
        .collect();
        let result = SpatialInterpolator::new()
            .interpolate(&grid, 30, InterpolationMethod::Linear)
            .unwrap();
        let far = result
            .points
            .iter()
            .find(|p| p.point.latitude == -60.0 && p.point.longitude == 120.0)
            .unwrap();
        assert_eq!(far.get(ClimateVariable::Temperature), Some(30.0));
    }

    #[test]
    fn test_scattered_linear_is_exact_inside_hull() {
        let mut obs: Vec<_> = scattered_grid(400, 11, linear_field).into_observations();
        obs.extend(corner_grid(0.0).into_observations().into_iter().map(|o| {
            uniform_observation(
                o.point.latitude,
                o.point.longitude,
                linear_field(o.point.latitude, o.point.longitude),
            )
        }));
        let grid: ClimateGrid = obs.into_iter().collect();

        let field = SpatialInterpolator::new()
            .interpolate_to_raster(
                &grid,
                ClimateVariable::Temperature,
                37,
                19,
                InterpolationMethod::Linear,
            )
            .unwrap();
        // Border pixels lie on the hull itself; check the interior
        for y in 1..field.height - 1 {
            for x in 1..field.width - 1 {
                let expected = linear_field(field.row_latitude(y), field.column_longitude(x));
                let got = field.get(x, y).unwrap();
                assert!(
                    (got - expected).abs() < 1e-6,
                    "({}, {}) {} vs {}",
                    x,
                    y,
                    got,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_raster_of_empty_grid_is_nan() {
        let field = SpatialInterpolator::new()
            .interpolate_to_raster(
                &ClimateGrid::default(),
                ClimateVariable::Humidity,
                8,
                4,
                InterpolationMethod::Linear,
            )
            .unwrap();
        assert_eq!(field.values.len(), 32);
        assert!(field.values.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_raster_rejects_zero_size() {
        let grid = lattice_grid(30, linear_field);
        assert!(SpatialInterpolator::new()
            .interpolate_to_raster(
                &grid,
                ClimateVariable::Temperature,
                0,
                10,
                InterpolationMethod::Linear,
            )
            .is_err());
    }

    #[test]
    fn test_raster_orientation() {
        // Warm north, cold south
        let grid = lattice_grid(10, |lat, _| lat);
        let field = SpatialInterpolator::new()
            .interpolate_to_raster(
                &grid,
                ClimateVariable::Temperature,
                4,
                3,
                InterpolationMethod::Linear,
            )
            .unwrap();
        assert_eq!(field.get(0, 0), Some(90.0));
        assert_eq!(field.get(3, 1), Some(0.0));
        assert_eq!(field.get(2, 2), Some(-90.0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid = scattered_grid(200, 3, |lat, lon| (lat * 0.1).sin() + lon * 0.01);
        let render = |interpolator: SpatialInterpolator| {
            interpolator
                .interpolate_to_raster(
                    &grid,
                    ClimateVariable::Temperature,
                    40,
                    20,
                    InterpolationMethod::Cubic,
                )
                .unwrap()
        };
        let parallel = render(SpatialInterpolator::new());
        let sequential = render(SpatialInterpolator::new().with_parallel(false));
        assert_eq!(parallel.values.len(), sequential.values.len());
        for (a, b) in parallel.values.iter().zip(&sequential.values) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
