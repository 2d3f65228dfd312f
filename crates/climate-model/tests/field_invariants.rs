//! Invariants of sampled climate grids.

use chrono::NaiveDate;
use climate_common::{ClimateVariable, SamplePoint};
use climate_model::model::{seasonal_angle, solar_elevation, solar_hour_angle};
use climate_model::{
    ClimateFieldModel, GridSampler, ModelClock, SeededNoise, WindField, ZeroNoise,
};

fn may_25() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 25).unwrap()
}

// ============================================================================
// Value ranges
// ============================================================================

#[test]
fn test_snapshot_values_in_range() {
    for seed in [1, 2, 3] {
        let model = ClimateFieldModel::new(SeededNoise::new(seed));
        let grid = GridSampler::new(&model)
            .sample(5, ModelClock::Snapshot)
            .unwrap();
        for obs in grid.iter() {
            assert!(obs.validate().is_ok(), "{:?}", obs);
        }
    }
}

#[test]
fn test_hourly_values_in_range_all_day() {
    let model = ClimateFieldModel::new(SeededNoise::new(17));
    for hour in 0..24 {
        let grid = GridSampler::new(&model)
            .sample(15, ModelClock::hourly(may_25(), hour))
            .unwrap();
        for obs in grid.iter() {
            assert!((0.0..=100.0).contains(&obs.humidity));
            assert!(obs.wind_speed >= 0.0);
            assert!(obs.precipitation >= 0.0);
            assert!(obs.sunlight >= 0.0);
        }
    }
}

// ============================================================================
// Golden values
// ============================================================================

#[test]
fn test_sampler_golden_values_at_origin() {
    let model = ClimateFieldModel::new(ZeroNoise);
    let grid = GridSampler::new(&model)
        .sample(10, ModelClock::Snapshot)
        .unwrap();

    let origin = grid
        .iter()
        .find(|o| o.point.latitude == 0.0 && o.point.longitude == 0.0)
        .expect("origin sampled");

    assert_eq!(origin.temperature, 35.0);
    assert_eq!(origin.humidity, 80.0);
    assert_eq!(origin.wind_speed, 5.0);
    assert_eq!(origin.precipitation, 8.0);
    assert_eq!(origin.sunlight, 480.0);
}

#[test]
fn test_sampler_order_is_latitude_major() {
    let model = ClimateFieldModel::new(ZeroNoise);
    let grid = GridSampler::new(&model)
        .sample(90, ModelClock::Snapshot)
        .unwrap();
    let points: Vec<(f64, f64)> = grid
        .iter()
        .map(|o| (o.point.latitude, o.point.longitude))
        .collect();
    assert_eq!(points[0], (-90.0, -180.0));
    assert_eq!(points[1], (-90.0, -90.0));
    assert_eq!(points[5], (0.0, -180.0));
    assert_eq!(points[14], (90.0, 180.0));
}

// ============================================================================
// Night
// ============================================================================

#[test]
fn test_no_sunlight_below_horizon() {
    let model = ClimateFieldModel::new(SeededNoise::new(5));
    let declination = 23.5 * seasonal_angle(145).sin();
    for hour in [0, 3, 6, 18, 21, 23] {
        let grid = GridSampler::new(&model)
            .sample(10, ModelClock::hourly(may_25(), hour))
            .unwrap();
        for obs in grid.iter() {
            let elevation =
                solar_elevation(obs.point.latitude, declination, solar_hour_angle(hour));
            if elevation <= 0.0 {
                assert_eq!(obs.sunlight, 0.0);
            }
        }
    }
}

#[test]
fn test_daytime_has_sunlight_somewhere() {
    let model = ClimateFieldModel::new(SeededNoise::new(5));
    let grid = GridSampler::new(&model)
        .sample(10, ModelClock::hourly(may_25(), 12))
        .unwrap();
    assert!(grid.values(ClimateVariable::Sunlight).iter().any(|&s| s > 0.0));
}

// ============================================================================
// Wind directions
// ============================================================================

/// Pearson correlation between neighbouring-point directions across seeds.
#[test]
fn test_wind_directions_uncorrelated_between_points() {
    let a = SamplePoint::new_unchecked(10.0, 20.0);
    let b = SamplePoint::new_unchecked(10.0, 30.0);
    let n = 2000;
    let (xs, ys): (Vec<f64>, Vec<f64>) = (0..n)
        .map(|seed| {
            let field = WindField::new(seed);
            (field.direction(a), field.direction(b))
        })
        .unzip();

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;
    let cov: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let var_x: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    let var_y: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();
    let r = cov / (var_x.sqrt() * var_y.sqrt());

    // Noise floor for n = 2000 is about 1/sqrt(n) ~ 0.022
    assert!(r.abs() < 0.1, "correlation {}", r);

    // Roughly uniform: mean near 180
    assert!((mean_x - 180.0).abs() < 10.0);
}

#[test]
fn test_wind_speed_matches_model() {
    let model = ClimateFieldModel::new(SeededNoise::new(8));
    let grid = GridSampler::new(&model)
        .sample(30, ModelClock::Snapshot)
        .unwrap();
    let vectors = WindField::new(8).vectors(&grid);
    assert_eq!(vectors.len(), grid.len());
    for (v, obs) in vectors.iter().zip(grid.iter()) {
        assert_eq!(v.speed, obs.wind_speed);
        assert_eq!((v.lat, v.lon), (obs.point.latitude, obs.point.longitude));
    }
}
