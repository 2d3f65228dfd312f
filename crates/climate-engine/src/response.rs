//! Response shapes, serialized with the JSON keys clients expect.

use chrono::{DateTime, SecondsFormat, Utc};
use climate_common::ClimateGrid;
use climate_model::WindVector;
use serde::{Deserialize, Serialize};

/// RFC 3339 with an explicit `+00:00` offset and whole seconds.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// A snapshot grid with its generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridResponse {
    pub data: ClimateGrid,
    pub timestamp: String,
    pub count: usize,
}

impl GridResponse {
    pub fn new(data: ClimateGrid) -> Self {
        Self {
            count: data.len(),
            timestamp: format_timestamp(Utc::now()),
            data,
        }
    }
}

/// A rendered snapshot image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapImage {
    /// `data:image/png;base64,...`
    pub image: String,
    pub width: usize,
    pub height: usize,
    /// Variable name as requested, even when unrecognized.
    pub variable: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindFieldResponse {
    pub wind_data: Vec<WindVector>,
    pub particle_count: u32,
    pub timestamp: String,
}

/// One hour of a daily series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyFrame {
    pub hour: u32,
    /// 12-hour clock label, e.g. `"1:00 PM"`
    pub formatted_time: String,
    pub timestamp: String,
    pub image: String,
}

/// Hourly images for one day, hours 0 to 23 in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlySeries {
    /// The date actually rendered, `YYYY-MM-DD`
    pub date: String,
    pub variable: String,
    pub width: usize,
    pub height: usize,
    pub resolution: u32,
    pub hourly_data: Vec<HourlyFrame>,
    pub total_hours: usize,
}
