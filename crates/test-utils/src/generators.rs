//! Generators for synthetic observation sets.
//!
//! Values follow simple closed forms so interpolation and rendering output
//! can be checked against exact expectations.

use climate_common::{ClimateGrid, ClimateObservation, LatLonLattice, SamplePoint};

/// Build an observation whose every variable is derived from `value`.
///
/// Temperature takes the value as-is; humidity is clamped to `[0, 100]`;
/// the non-negative variables are floored at zero.
pub fn uniform_observation(lat: f64, lon: f64, value: f64) -> ClimateObservation {
    ClimateObservation {
        point: SamplePoint::new_unchecked(lat, lon),
        temperature: value,
        humidity: value.clamp(0.0, 100.0),
        wind_speed: value.max(0.0),
        precipitation: value.max(0.0),
        sunlight: value.max(0.0),
        timestamp: None,
    }
}

/// A plane in lat/lon: `10 + 0.1 * lat + 0.05 * lon`.
///
/// Bilinear and barycentric interpolation reproduce it exactly.
pub fn linear_field(lat: f64, lon: f64) -> f64 {
    10.0 + 0.1 * lat + 0.05 * lon
}

/// Observations on a whole-sphere lattice with values from `f(lat, lon)`.
///
/// # Panics
///
/// Panics if `resolution` is zero.
pub fn lattice_grid<F>(resolution: u32, f: F) -> ClimateGrid
where
    F: Fn(f64, f64) -> f64,
{
    let lattice = LatLonLattice::new(resolution).expect("resolution must be positive");
    lattice
        .points()
        .into_iter()
        .map(|p| uniform_observation(p.latitude, p.longitude, f(p.latitude, p.longitude)))
        .collect()
}

/// Deterministic pseudo-random points covering the sphere.
///
/// Uses a 64-bit LCG so tests do not depend on an RNG crate.
pub fn scattered_points(count: usize, seed: u64) -> Vec<SamplePoint> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..count)
        .map(|_| {
            let lat = next() * 180.0 - 90.0;
            let lon = next() * 360.0 - 180.0;
            SamplePoint::new_unchecked(lat, lon)
        })
        .collect()
}

/// Scattered observations with values from `f(lat, lon)`.
pub fn scattered_grid<F>(count: usize, seed: u64, f: F) -> ClimateGrid
where
    F: Fn(f64, f64) -> f64,
{
    scattered_points(count, seed)
        .into_iter()
        .map(|p| uniform_observation(p.latitude, p.longitude, f(p.latitude, p.longitude)))
        .collect()
}

/// Observations at the four corners of the globe plus the origin.
pub fn corner_grid(value: f64) -> ClimateGrid {
    [
        (-90.0, -180.0),
        (-90.0, 180.0),
        (90.0, -180.0),
        (90.0, 180.0),
        (0.0, 0.0),
    ]
    .into_iter()
    .map(|(lat, lon)| uniform_observation(lat, lon, value))
    .collect()
}
