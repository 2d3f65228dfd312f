//! Whole-sphere lattice sampling of the climate model.

use climate_common::{ClimateError, ClimateGrid, ClimateResult, LatLonLattice};
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

use crate::model::{ClimateFieldModel, ModelClock};
use crate::noise::NoiseSource;

/// Minimum points to benefit from parallel evaluation
const PARALLEL_THRESHOLD: usize = 2048;

/// Sampling options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerOptions {
    /// Fan point evaluation out across the rayon pool
    pub parallel: bool,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Evaluates the model at every node of a lattice.
#[derive(Debug, Clone, Copy)]
pub struct GridSampler<'a, N> {
    model: &'a ClimateFieldModel<N>,
    options: SamplerOptions,
}

impl<'a, N: NoiseSource> GridSampler<'a, N> {
    pub fn new(model: &'a ClimateFieldModel<N>) -> Self {
        Self::with_options(model, SamplerOptions::default())
    }

    pub fn with_options(model: &'a ClimateFieldModel<N>, options: SamplerOptions) -> Self {
        Self { model, options }
    }

    /// Sample the model at `resolution`-degree steps.
    ///
    /// Points are ordered latitude-major from (-90, -180) to (90, 180).
    /// Parallel and sequential sampling produce identical grids.
    pub fn sample(&self, resolution: u32, clock: ModelClock) -> ClimateResult<ClimateGrid> {
        let lattice = LatLonLattice::new(resolution)?;
        if let Some(hour) = clock.hour() {
            if hour > 23 {
                return Err(ClimateError::invalid_parameter(
                    "hour",
                    format!("{} is outside 0-23", hour),
                ));
            }
        }

        let start = Instant::now();
        let points = lattice.points();

        let grid: ClimateGrid = if self.options.parallel && points.len() >= PARALLEL_THRESHOLD {
            points
                .into_par_iter()
                .map(|p| self.model.evaluate(p, clock))
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        } else {
            points
                .into_iter()
                .map(|p| self.model.evaluate(p, clock))
                .collect()
        };

        debug!(
            resolution = resolution,
            points = grid.len(),
            hour = ?clock.hour(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Sampled climate grid"
        );

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{SeededNoise, ZeroNoise};
    use chrono::NaiveDate;
    use climate_common::ClimateVariable;

    #[test]
    fn test_sample_point_count() {
        let model = ClimateFieldModel::new(ZeroNoise);
        let grid = GridSampler::new(&model)
            .sample(10, ModelClock::Snapshot)
            .unwrap();
        assert_eq!(grid.len(), 19 * 37);
    }

    #[test]
    fn test_sample_rejects_zero_resolution() {
        let model = ClimateFieldModel::new(ZeroNoise);
        assert!(GridSampler::new(&model)
            .sample(0, ModelClock::Snapshot)
            .is_err());
    }

    #[test]
    fn test_sample_rejects_bad_hour() {
        let model = ClimateFieldModel::new(ZeroNoise);
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(GridSampler::new(&model)
            .sample(30, ModelClock::hourly(date, 24))
            .is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let model = ClimateFieldModel::new(SeededNoise::new(2024));
        let date = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        let sequential = GridSampler::with_options(&model, SamplerOptions { parallel: false })
            .sample(3, ModelClock::hourly(date, 9))
            .unwrap();
        let parallel = GridSampler::with_options(&model, SamplerOptions { parallel: true })
            .sample(3, ModelClock::hourly(date, 9))
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_hourly_grid_is_timestamped() {
        let model = ClimateFieldModel::new(SeededNoise::new(1));
        let date = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        let grid = GridSampler::new(&model)
            .sample(45, ModelClock::hourly(date, 6))
            .unwrap();
        assert!(grid.iter().all(|o| o.timestamp.is_some()));
        assert!(grid.mean(ClimateVariable::Temperature).is_some());
    }
}
