//! Scalar field to RGBA raster.

use climate_common::ScalarField;
use rayon::prelude::*;

use crate::ramp::ColorRamp;

/// Minimum pixels to benefit from parallel colorization
const PARALLEL_THRESHOLD: usize = 4096;

/// Normalized value of every finite input when the field is flat.
pub const NEUTRAL_LEVEL: f64 = 0.5;

/// RGBA8 image, row 0 at the top (north).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    /// 4 bytes per pixel, row-major
    pub pixels: Vec<u8>,
}

impl Raster {
    /// A fully transparent raster.
    pub fn transparent(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let p = self.pixels.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }
}

/// Linear min/max normalization over the finite values of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub min: f64,
    pub max: f64,
}

impl Normalization {
    /// `None` when the field has no finite values.
    pub fn from_field(field: &ScalarField) -> Option<Self> {
        field
            .finite_min_max()
            .map(|(min, max)| Self { min, max })
    }

    /// Normalized value in `[0, 1]`. NaN stays NaN; a flat field maps to
    /// [`NEUTRAL_LEVEL`].
    pub fn apply(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return NEUTRAL_LEVEL;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Normalize a field and paint it with a ramp.
///
/// Non-finite values become transparent pixels.
pub fn colorize(field: &ScalarField, ramp: ColorRamp) -> Raster {
    let mut raster = Raster::transparent(field.width, field.height);
    let Some(norm) = Normalization::from_field(field) else {
        return raster;
    };

    let paint = |(pixel, &value): (&mut [u8], &f64)| {
        let color = if value.is_finite() {
            ramp.color(norm.apply(value))
        } else {
            crate::ramp::NO_DATA
        };
        pixel.copy_from_slice(&color);
    };

    if field.values.len() >= PARALLEL_THRESHOLD {
        raster
            .pixels
            .par_chunks_mut(4)
            .zip(field.values.par_iter())
            .for_each(paint);
    } else {
        raster
            .pixels
            .chunks_mut(4)
            .zip(field.values.iter())
            .for_each(paint);
    }

    raster
}
