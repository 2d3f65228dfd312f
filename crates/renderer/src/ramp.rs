//! Per-variable color ramps.
//!
//! Each ramp maps a normalized value in `[0, 1]` to RGBA with a fixed alpha
//! of 200. Channel values truncate toward zero. NaN maps to transparent.

use std::str::FromStr;

use climate_common::ClimateVariable;
use serde::{Deserialize, Serialize};

/// Alpha of every computed color.
pub const RAMP_ALPHA: u8 = 200;

/// Transparent "no data" pixel.
pub const NO_DATA: [u8; 4] = [0, 0, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRamp {
    /// Blue → cyan → green → yellow → red over quartiles.
    Temperature,
    /// Blue → white.
    Humidity,
    /// Green → yellow → red.
    WindSpeed,
    /// Light blue → dark blue.
    Precipitation,
    /// Yellow → orange → red.
    Sunlight,
    /// Flat white, for unrecognized variables.
    Neutral,
}

impl ColorRamp {
    pub fn for_variable(variable: ClimateVariable) -> Self {
        match variable {
            ClimateVariable::Temperature => Self::Temperature,
            ClimateVariable::Humidity => Self::Humidity,
            ClimateVariable::WindSpeed => Self::WindSpeed,
            ClimateVariable::Precipitation => Self::Precipitation,
            ClimateVariable::Sunlight => Self::Sunlight,
        }
    }

    /// Ramp for a request variable name. Unknown names get the neutral ramp.
    pub fn for_name(name: &str) -> Self {
        ClimateVariable::from_str(name)
            .map(Self::for_variable)
            .unwrap_or(Self::Neutral)
    }

    /// RGBA color for a normalized value.
    pub fn color(&self, v: f64) -> [u8; 4] {
        if v.is_nan() {
            return NO_DATA;
        }
        let v = v.clamp(0.0, 1.0);

        let (r, g, b) = match self {
            Self::Temperature => {
                if v < 0.25 {
                    (0, channel(v * 4.0 * 255.0), 255)
                } else if v < 0.5 {
                    (0, 255, channel((1.0 - (v - 0.25) * 4.0) * 255.0))
                } else if v < 0.75 {
                    (channel((v - 0.5) * 4.0 * 255.0), 255, 0)
                } else {
                    (255, channel((1.0 - (v - 0.75) * 4.0) * 255.0), 0)
                }
            }
            Self::Humidity => {
                let i = channel(v * 255.0);
                (i, i, 255)
            }
            Self::WindSpeed => {
                if v < 0.5 {
                    (channel(v * 2.0 * 255.0), 255, 0)
                } else {
                    (255, channel((1.0 - (v - 0.5) * 2.0) * 255.0), 0)
                }
            }
            Self::Precipitation => (0, channel((1.0 - v) * 200.0), 100 + channel(v * 155.0)),
            Self::Sunlight => (255, channel((1.0 - v * 0.7) * 255.0), 0),
            Self::Neutral => (255, 255, 255),
        };

        [r, g, b, RAMP_ALPHA]
    }
}

/// Truncate toward zero into a channel byte.
#[inline]
fn channel(x: f64) -> u8 {
    x as u8
}
