//! Request shapes accepted by the engine.
//!
//! Optional fields fall back to the [`EngineConfig`](crate::EngineConfig)
//! defaults. Names follow the query parameters clients already send.

use grid_processor::InterpolationMethod;
use serde::{Deserialize, Serialize};

/// A snapshot grid at a lattice resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRequest {
    pub resolution: Option<u32>,
}

/// A snapshot grid resampled onto a finer (or coarser) lattice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationRequest {
    /// Source lattice step.
    pub resolution: Option<u32>,
    /// Output lattice step.
    pub target_resolution: u32,
    #[serde(default = "default_grid_method")]
    pub method: InterpolationMethod,
}

/// Cubic is the numeric coarse-to-fine default.
fn default_grid_method() -> InterpolationMethod {
    InterpolationMethod::Cubic
}

impl InterpolationRequest {
    pub fn new(target_resolution: u32) -> Self {
        Self {
            resolution: None,
            target_resolution,
            method: default_grid_method(),
        }
    }
}

/// A false-color snapshot image of one variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRequest {
    pub variable: String,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub resolution: Option<u32>,
}

impl HeatmapRequest {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            width: None,
            height: None,
            resolution: None,
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = Some(resolution);
        self
    }
}

/// Wind vectors for particle animation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindFieldRequest {
    pub resolution: Option<u32>,
    /// Echoed back for the animation client; does not change the field.
    pub particles: Option<u32>,
}

/// One false-color image per hour of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySeriesRequest {
    pub variable: String,
    /// `YYYY-MM-DD`; missing or malformed means today.
    pub date: Option<String>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub resolution: Option<u32>,
}

impl DailySeriesRequest {
    pub fn new(variable: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            date: Some(date.into()),
            width: None,
            height: None,
            resolution: None,
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = Some(resolution);
        self
    }
}
