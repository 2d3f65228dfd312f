//! First-generation sample data generator.
//!
//! A coarse, purely latitudinal field on a fixed 10-degree lattice. It has
//! no seasonal, diurnal or longitudinal structure and ignores the request
//! clock. Kept for demo data and for comparing against the parametric model.

use climate_common::{
    round_to, ClimateGrid, ClimateObservation, ClimateResult, LatLonLattice, SamplePoint,
};
use tracing::debug;

use crate::noise::{NoiseSource, Perturbation};
use crate::source::{keep_valid, ObservationSource, SnapshotRequest};

/// Lattice spacing of the legacy generator, in degrees.
pub const LEGACY_RESOLUTION: u32 = 10;

/// Latitude band treated as tropical for precipitation.
const TROPICAL_BAND: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct LegacySampleModel<N> {
    noise: N,
}

impl<N: NoiseSource> LegacySampleModel<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    pub fn evaluate(&self, point: SamplePoint) -> ClimateObservation {
        let mut noise = self.noise.stream(point, None);
        let lat = point.latitude.abs();

        let temperature = 30.0 - lat * 0.6 + noise.gaussian(5.0);
        let humidity = (70.0 + noise.gaussian(15.0) - lat * 0.3).clamp(20.0, 100.0);
        let wind_speed = noise.exponential(8.0).max(0.0);
        let precipitation = if lat < TROPICAL_BAND {
            noise.exponential(2.0)
        } else {
            noise.exponential(0.5)
        }
        .max(0.0);
        let max_sunlight = 1000.0 * lat.to_radians().cos();
        let sunlight = (max_sunlight * (0.7 + noise.unit_uniform() * 0.3)).max(0.0);

        ClimateObservation {
            point,
            temperature: round_to(temperature, 1),
            humidity: round_to(humidity, 1),
            wind_speed: round_to(wind_speed, 1),
            precipitation: round_to(precipitation, 2),
            sunlight: round_to(sunlight, 1),
            timestamp: None,
        }
    }

    pub fn sample(&self) -> ClimateResult<ClimateGrid> {
        let lattice = LatLonLattice::new(LEGACY_RESOLUTION)?;
        Ok(lattice.points().into_iter().map(|p| self.evaluate(p)).collect())
    }
}

/// The legacy generator as an observation source.
#[derive(Debug, Clone)]
pub struct LegacySampleSource<N> {
    model: LegacySampleModel<N>,
}

impl<N: NoiseSource> LegacySampleSource<N> {
    pub fn new(noise: N) -> Self {
        Self {
            model: LegacySampleModel::new(noise),
        }
    }
}

impl<N: NoiseSource> ObservationSource for LegacySampleSource<N> {
    fn name(&self) -> &'static str {
        "legacy-sample"
    }

    fn observations(&self, request: &SnapshotRequest) -> ClimateResult<ClimateGrid> {
        if request.resolution != LEGACY_RESOLUTION {
            debug!(
                requested = request.resolution,
                used = LEGACY_RESOLUTION,
                "Legacy generator uses a fixed lattice"
            );
        }
        let grid = self.model.sample()?;
        Ok(keep_valid(grid.into_observations(), self.name()))
    }
}
