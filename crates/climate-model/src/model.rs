//! Parametric climate field model.
//!
//! Two variants share the same structure:
//!
//! - **Snapshot**: a timeless field. Seasonal term at full strength, sunlight
//!   driven by a longitude-based pseudo-declination.
//! - **Hourly**: seasonal term scaled by the day of year, diurnal terms keyed
//!   to local solar time and sunlight from the true solar elevation.
//!
//! Both are visualization approximations, not physics.

use chrono::NaiveDate;
use climate_common::{
    day_of_year, hour_timestamp, round_to, ClimateObservation, SamplePoint,
};
use std::f64::consts::PI;

use crate::noise::{NoiseSource, Perturbation};

/// Mean length of a year in days, used for the seasonal angle.
const DAYS_PER_YEAR: f64 = 365.25;

/// Degrees of hour angle per hour of time.
const DEGREES_PER_HOUR: f64 = 15.0;

/// Peak clear-sky irradiance (W/m²).
const MAX_IRRADIANCE: f64 = 1000.0;

/// When the model is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelClock {
    /// No date or time: the timeless variant.
    Snapshot,
    /// A given UTC hour (0-23) on a given date.
    Hourly { date: NaiveDate, hour: u32 },
}

impl ModelClock {
    pub fn hourly(date: NaiveDate, hour: u32) -> Self {
        Self::Hourly { date, hour }
    }

    /// Hour of day, if any.
    pub fn hour(&self) -> Option<u32> {
        match self {
            Self::Snapshot => None,
            Self::Hourly { hour, .. } => Some(*hour),
        }
    }

    /// Day of year, if any.
    pub fn day_of_year(&self) -> Option<u32> {
        match self {
            Self::Snapshot => None,
            Self::Hourly { date, .. } => Some(day_of_year(*date)),
        }
    }
}

/// Seasonal angle in radians for a day of year.
pub fn seasonal_angle(day_of_year: u32) -> f64 {
    2.0 * PI * day_of_year as f64 / DAYS_PER_YEAR
}

/// Local solar time in hours `[0, 24)` at a longitude for a UTC hour.
pub fn local_solar_time(hour: u32, lon: f64) -> f64 {
    (hour as f64 + lon / 15.0).rem_euclid(24.0)
}

/// Hour angle from solar noon in degrees.
pub fn solar_hour_angle(hour: u32) -> f64 {
    (hour as f64 - 12.0) * DEGREES_PER_HOUR
}

/// Sine of the solar elevation for a latitude, declination and hour angle
/// (all in degrees). Values at or below zero mean the sun is down.
pub fn solar_elevation(lat: f64, declination: f64, hour_angle: f64) -> f64 {
    let (lat, dec, ha) = (
        lat.to_radians(),
        declination.to_radians(),
        hour_angle.to_radians(),
    );
    lat.sin() * dec.sin() + lat.cos() * dec.cos() * ha.cos()
}

/// Closed-form climate model with injectable noise.
#[derive(Debug, Clone)]
pub struct ClimateFieldModel<N> {
    noise: N,
}

impl<N: NoiseSource> ClimateFieldModel<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    /// Evaluate every variable at a point.
    pub fn evaluate(&self, point: SamplePoint, clock: ModelClock) -> ClimateObservation {
        let mut noise = self.noise.stream(point, clock.hour());
        match clock {
            ModelClock::Snapshot => snapshot(point, &mut noise),
            ModelClock::Hourly { date, hour } => {
                hourly(point, day_of_year(date), hour, &mut noise)
                    .with_timestamp(hour_timestamp(date, hour))
            }
        }
    }
}

fn snapshot<P: Perturbation>(point: SamplePoint, noise: &mut P) -> ClimateObservation {
    let SamplePoint {
        latitude: lat,
        longitude: lon,
    } = point;

    // Temperature: latitude gradient plus a full-strength seasonal term
    let base_temp = 30.0 - lat.abs() * 0.6;
    let seasonal = (lat * 4.0).to_radians().cos();
    let temperature = base_temp + seasonal * 5.0 + noise.gaussian(3.0);

    let coastal = 1.0 + 0.3 * (lon * 2.0).to_radians().sin();
    let humidity =
        (70.0 + noise.gaussian(10.0) - lat.abs() * 0.2 + coastal * 10.0).clamp(20.0, 100.0);

    let wind_speed = (jet_stream_wind(lat, lon) + noise.gaussian(3.0)).max(0.0);

    let precipitation = (monsoon_factor(lat, lon) * 8.0 + noise.exponential(1.0)).max(0.0);

    // Sunlight: pseudo-declination swings with longitude
    let declination = 23.5 * lon.to_radians().sin();
    let max_sunlight = MAX_IRRADIANCE * (lat - declination).abs().to_radians().cos().max(0.0);
    let cloud = 1.0 - (precipitation / 10.0) * 0.5;
    let sunlight = (max_sunlight * cloud * (0.8 + noise.unit_uniform() * 0.2)).max(0.0);

    finish(point, temperature, humidity, wind_speed, precipitation, sunlight)
}

fn hourly<P: Perturbation>(
    point: SamplePoint,
    day_of_year: u32,
    hour: u32,
    noise: &mut P,
) -> ClimateObservation {
    let SamplePoint {
        latitude: lat,
        longitude: lon,
    } = point;
    let season = seasonal_angle(day_of_year);
    let hour_angle = solar_hour_angle(hour);
    let solar_time = local_solar_time(hour, lon);
    let night = !(6.0..=18.0).contains(&solar_time);

    let base_temp = 30.0 - lat.abs() * 0.6;
    let seasonal = (lat * 4.0).to_radians().cos() * season.sin();
    let mut diurnal = 8.0 * (hour_angle + lon / 15.0).to_radians().cos();
    if night {
        diurnal *= 0.7;
    }
    let temperature = base_temp + seasonal * 5.0 + diurnal + noise.gaussian(2.0);

    // Humidity peaks near 06:00 local
    let coastal = 1.0 + 0.3 * (lon * 2.0).to_radians().sin();
    let time_humidity = 10.0 * ((solar_time - 6.0) * DEGREES_PER_HOUR).to_radians().cos();
    let humidity = (70.0 + noise.gaussian(8.0) - lat.abs() * 0.2 + coastal * 8.0 + time_humidity)
        .clamp(20.0, 100.0);

    // Wind peaks in the afternoon
    let diurnal_wind = 3.0 * ((solar_time - 12.0) * DEGREES_PER_HOUR).to_radians().sin();
    let wind_speed = (jet_stream_wind(lat, lon) + diurnal_wind + noise.gaussian(2.0)).max(0.0);

    // Convective pulse around 15:00 local
    let afternoon = (2.0 * ((solar_time - 15.0) * DEGREES_PER_HOUR).to_radians().sin()).max(0.0);
    let precipitation =
        (monsoon_factor(lat, lon) * 6.0 + afternoon + noise.exponential(0.8)).max(0.0);

    let declination = 23.5 * season.sin();
    let elevation = solar_elevation(lat, declination, hour_angle);
    let sunlight = if elevation > 0.0 {
        let max_sunlight = MAX_IRRADIANCE * elevation;
        let cloud = 1.0 - (precipitation / 12.0) * 0.6;
        let atmospheric = 0.7 + 0.3 * elevation;
        (max_sunlight * cloud * atmospheric * (0.85 + noise.unit_uniform() * 0.15)).max(0.0)
    } else {
        0.0
    };

    finish(point, temperature, humidity, wind_speed, precipitation, sunlight)
}

/// Jet stream band: peak wind at a latitude that meanders with longitude.
fn jet_stream_wind(lat: f64, lon: f64) -> f64 {
    let jet_lat = 40.0 + 10.0 * (lon / 2.0).to_radians().sin();
    5.0 + 15.0 * (-((lat - jet_lat) / 10.0).powi(2)).exp()
}

/// ITCZ band strength in `(0, 1]`.
fn monsoon_factor(lat: f64, lon: f64) -> f64 {
    let itcz_lat = 5.0 * (lon / 3.0).to_radians().sin();
    (-((lat - itcz_lat) / 15.0).powi(2)).exp()
}

fn finish(
    point: SamplePoint,
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    precipitation: f64,
    sunlight: f64,
) -> ClimateObservation {
    ClimateObservation {
        point,
        temperature: round_to(temperature, 1),
        humidity: round_to(humidity, 1).clamp(0.0, 100.0),
        wind_speed: round_to(wind_speed, 1).max(0.0),
        precipitation: round_to(precipitation, 2).max(0.0),
        sunlight: round_to(sunlight, 1).max(0.0),
        timestamp: None,
    }
}
