//! Sample points, climate variables and per-point observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClimateError, ClimateResult};

/// A geographic sample location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl SamplePoint {
    /// Create a sample point, rejecting coordinates off the sphere.
    pub fn new(latitude: f64, longitude: f64) -> ClimateResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ClimateError::invalid_parameter(
                "latitude",
                format!("{} is outside [-90, 90]", latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ClimateError::invalid_parameter(
                "longitude",
                format!("{} is outside [-180, 180]", longitude),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a sample point without range checks. Used by lattice generators
    /// whose loop bounds already guarantee the ranges.
    pub fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The five modelled climate variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClimateVariable {
    Temperature,
    Humidity,
    WindSpeed,
    Precipitation,
    Sunlight,
}

impl ClimateVariable {
    /// All variables in canonical order.
    pub const ALL: [ClimateVariable; 5] = [
        ClimateVariable::Temperature,
        ClimateVariable::Humidity,
        ClimateVariable::WindSpeed,
        ClimateVariable::Precipitation,
        ClimateVariable::Sunlight,
    ];

    /// Wire name as used in request paths and JSON keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::WindSpeed => "windSpeed",
            Self::Precipitation => "precipitation",
            Self::Sunlight => "sunlight",
        }
    }

    /// Display unit.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::WindSpeed => "m/s",
            Self::Precipitation => "mm",
            Self::Sunlight => "W/m²",
        }
    }

    /// Clamp a value into the physical range of this variable.
    pub fn clamp_value(&self, value: f64) -> f64 {
        match self {
            Self::Temperature => value,
            Self::Humidity => value.clamp(0.0, 100.0),
            Self::WindSpeed | Self::Precipitation | Self::Sunlight => value.max(0.0),
        }
    }

    /// Whether a value lies inside the physical range of this variable.
    pub fn in_range(&self, value: f64) -> bool {
        value.is_finite()
            && match self {
                Self::Temperature => true,
                Self::Humidity => (0.0..=100.0).contains(&value),
                Self::WindSpeed | Self::Precipitation | Self::Sunlight => value >= 0.0,
            }
    }
}

impl fmt::Display for ClimateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClimateVariable {
    type Err = ClimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "temperature" => Ok(Self::Temperature),
            "humidity" => Ok(Self::Humidity),
            "windspeed" | "wind_speed" => Ok(Self::WindSpeed),
            "precipitation" => Ok(Self::Precipitation),
            "sunlight" => Ok(Self::Sunlight),
            _ => Err(ClimateError::invalid_parameter(
                "variable",
                format!("unknown climate variable '{}'", s),
            )),
        }
    }
}

/// One climate sample at a point, synthetic or externally sourced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateObservation {
    #[serde(flatten)]
    pub point: SamplePoint,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%), within [0, 100]
    pub humidity: f64,
    /// Wind speed (m/s), non-negative
    pub wind_speed: f64,
    /// Precipitation (mm-equivalent), non-negative
    pub precipitation: f64,
    /// Solar irradiance (W/m²), non-negative
    pub sunlight: f64,
    /// Valid time, only set by the hourly model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ClimateObservation {
    /// Value of a single variable.
    pub fn value(&self, variable: ClimateVariable) -> f64 {
        match variable {
            ClimateVariable::Temperature => self.temperature,
            ClimateVariable::Humidity => self.humidity,
            ClimateVariable::WindSpeed => self.wind_speed,
            ClimateVariable::Precipitation => self.precipitation,
            ClimateVariable::Sunlight => self.sunlight,
        }
    }

    /// Attach a valid time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Check the value-range invariants every observation must satisfy,
    /// whatever its origin.
    pub fn validate(&self) -> ClimateResult<()> {
        let SamplePoint {
            latitude,
            longitude,
        } = self.point;
        SamplePoint::new(latitude, longitude)
            .map_err(|e| ClimateError::invalid_observation(latitude, longitude, e.to_string()))?;

        for variable in ClimateVariable::ALL {
            let value = self.value(variable);
            if !variable.in_range(value) {
                return Err(ClimateError::invalid_observation(
                    latitude,
                    longitude,
                    format!("{} = {} is out of range", variable, value),
                ));
            }
        }
        Ok(())
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> ClimateObservation {
        ClimateObservation {
            point: SamplePoint::new_unchecked(10.0, 20.0),
            temperature: 21.5,
            humidity: 64.0,
            wind_speed: 4.2,
            precipitation: 0.35,
            sunlight: 512.0,
            timestamp: None,
        }
    }

    #[test]
    fn test_sample_point_rejects_out_of_range() {
        assert!(SamplePoint::new(91.0, 0.0).is_err());
        assert!(SamplePoint::new(0.0, -180.5).is_err());
        assert!(SamplePoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_variable_parsing() {
        assert_eq!(
            "windSpeed".parse::<ClimateVariable>().unwrap(),
            ClimateVariable::WindSpeed
        );
        assert_eq!(
            "wind_speed".parse::<ClimateVariable>().unwrap(),
            ClimateVariable::WindSpeed
        );
        assert_eq!(
            "Temperature".parse::<ClimateVariable>().unwrap(),
            ClimateVariable::Temperature
        );
        assert!("pressure".parse::<ClimateVariable>().is_err());
    }

    #[test]
    fn test_variable_clamp() {
        assert_eq!(ClimateVariable::Humidity.clamp_value(104.0), 100.0);
        assert_eq!(ClimateVariable::Precipitation.clamp_value(-0.2), 0.0);
        assert_eq!(ClimateVariable::Temperature.clamp_value(-60.0), -60.0);
    }

    #[test]
    fn test_validate_accepts_good_observation() {
        assert!(observation().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_invariant_violations() {
        let mut obs = observation();
        obs.humidity = 101.0;
        assert!(obs.validate().is_err());

        let mut obs = observation();
        obs.sunlight = -1.0;
        assert!(obs.validate().is_err());

        let mut obs = observation();
        obs.temperature = f64::NAN;
        assert!(obs.validate().is_err());
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(observation()).unwrap();
        assert_eq!(json["lat"], 10.0);
        assert_eq!(json["lon"], 20.0);
        assert_eq!(json["windSpeed"], 4.2);
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345, 1), 12.3);
        assert_eq!(round_to(0.126, 2), 0.13);
        assert_eq!(round_to(-3.26, 1), -3.3);
    }
}
