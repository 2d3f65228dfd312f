//! Wind vector field for particle animation.
//!
//! Speeds come from the model; directions are an independent uniform draw
//! per point and carry no physical meaning.

use climate_common::{ClimateGrid, SamplePoint};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::noise::point_rng;

/// Salt separating direction streams from the model's noise streams.
const DIRECTION_SALT: u64 = 0x7769_6e64_5f64_6972;

/// Wind at a point, split into east-west (`u`) and north-south (`v`) parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    pub lat: f64,
    pub lon: f64,
    pub u: f64,
    pub v: f64,
    pub speed: f64,
}

/// Generator of per-point wind directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindField {
    seed: u64,
}

impl WindField {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Direction in degrees `[0, 360)` at a point.
    pub fn direction(&self, point: SamplePoint) -> f64 {
        point_rng(self.seed, point, None, DIRECTION_SALT).gen_range(0.0..360.0)
    }

    /// Vectors for every observation of a grid, in grid order.
    pub fn vectors(&self, grid: &ClimateGrid) -> Vec<WindVector> {
        grid.iter()
            .map(|obs| {
                let direction = self.direction(obs.point).to_radians();
                WindVector {
                    lat: obs.point.latitude,
                    lon: obs.point.longitude,
                    u: obs.wind_speed * direction.cos(),
                    v: obs.wind_speed * direction.sin(),
                    speed: obs.wind_speed,
                }
            })
            .collect()
    }
}
