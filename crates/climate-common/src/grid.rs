//! Sample lattices and the grids built on them.

use serde::{Deserialize, Serialize};

use crate::error::{ClimateError, ClimateResult};
use crate::observation::{ClimateObservation, ClimateVariable, SamplePoint};

/// Specification of a whole-sphere lat/lon lattice at an integer degree step.
///
/// Latitudes run from -90 to 90 and longitudes from -180 to 180, both
/// inclusive. The ±180° meridian is sampled twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatLonLattice {
    /// Step between adjacent samples, in whole degrees
    pub resolution: u32,
}

impl LatLonLattice {
    /// Create a lattice specification. The step must be at least one degree.
    pub fn new(resolution: u32) -> ClimateResult<Self> {
        if resolution == 0 {
            return Err(ClimateError::invalid_parameter(
                "resolution",
                "must be at least 1 degree",
            ));
        }
        Ok(Self { resolution })
    }

    /// Latitudes in ascending order.
    pub fn latitudes(&self) -> Vec<f64> {
        (-90i32..=90)
            .step_by(self.resolution as usize)
            .map(f64::from)
            .collect()
    }

    /// Longitudes in ascending order.
    pub fn longitudes(&self) -> Vec<f64> {
        (-180i32..=180)
            .step_by(self.resolution as usize)
            .map(f64::from)
            .collect()
    }

    /// Number of latitude rows.
    pub fn ny(&self) -> usize {
        180 / self.resolution as usize + 1
    }

    /// Number of longitude columns.
    pub fn nx(&self) -> usize {
        360 / self.resolution as usize + 1
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.nx() * self.ny()
    }

    /// A lattice always holds at least the (-90, -180) corner.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All points, latitude-major (outer loop latitude, inner loop longitude).
    pub fn points(&self) -> Vec<SamplePoint> {
        let lons = self.longitudes();
        self.latitudes()
            .into_iter()
            .flat_map(|lat| {
                lons.iter()
                    .map(move |&lon| SamplePoint::new_unchecked(lat, lon))
            })
            .collect()
    }
}

/// An ordered set of observations, one per sample point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClimateGrid {
    observations: Vec<ClimateObservation>,
}

impl ClimateGrid {
    pub fn new(observations: Vec<ClimateObservation>) -> Self {
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClimateObservation> {
        self.observations.iter()
    }

    pub fn observations(&self) -> &[ClimateObservation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<ClimateObservation> {
        self.observations
    }

    /// Sample points in grid order.
    pub fn points(&self) -> Vec<SamplePoint> {
        self.observations.iter().map(|o| o.point).collect()
    }

    /// Values of one variable in grid order.
    pub fn values(&self, variable: ClimateVariable) -> Vec<f64> {
        self.observations.iter().map(|o| o.value(variable)).collect()
    }

    /// Arithmetic mean of the finite values of a variable.
    pub fn mean(&self, variable: ClimateVariable) -> Option<f64> {
        let (sum, count) = self
            .observations
            .iter()
            .map(|o| o.value(variable))
            .filter(|v| v.is_finite())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Minimum and maximum of the finite values of a variable.
    pub fn min_max(&self, variable: ClimateVariable) -> Option<(f64, f64)> {
        self.observations
            .iter()
            .map(|o| o.value(variable))
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}

impl<'a> IntoIterator for &'a ClimateGrid {
    type Item = &'a ClimateObservation;
    type IntoIter = std::slice::Iter<'a, ClimateObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

impl FromIterator<ClimateObservation> for ClimateGrid {
    fn from_iter<T: IntoIterator<Item = ClimateObservation>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A resampled point whose variables are filled one field at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolatedPoint {
    #[serde(flatten)]
    pub point: SamplePoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<f64>,
}

impl InterpolatedPoint {
    pub fn new(point: SamplePoint) -> Self {
        Self {
            point,
            temperature: None,
            humidity: None,
            wind_speed: None,
            precipitation: None,
            sunlight: None,
        }
    }

    fn slot(&mut self, variable: ClimateVariable) -> &mut Option<f64> {
        match variable {
            ClimateVariable::Temperature => &mut self.temperature,
            ClimateVariable::Humidity => &mut self.humidity,
            ClimateVariable::WindSpeed => &mut self.wind_speed,
            ClimateVariable::Precipitation => &mut self.precipitation,
            ClimateVariable::Sunlight => &mut self.sunlight,
        }
    }

    /// Write a variable. Each variable is written at most once; a second
    /// write is ignored and reported as `false`.
    pub fn fill(&mut self, variable: ClimateVariable, value: f64) -> bool {
        let slot = self.slot(variable);
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }

    pub fn get(&self, variable: ClimateVariable) -> Option<f64> {
        match variable {
            ClimateVariable::Temperature => self.temperature,
            ClimateVariable::Humidity => self.humidity,
            ClimateVariable::WindSpeed => self.wind_speed,
            ClimateVariable::Precipitation => self.precipitation,
            ClimateVariable::Sunlight => self.sunlight,
        }
    }

    /// Whether every variable has been written.
    pub fn is_complete(&self) -> bool {
        ClimateVariable::ALL.iter().all(|v| self.get(*v).is_some())
    }
}

/// A climate grid resampled onto a new whole-sphere lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedGrid {
    /// Target lattice step in degrees
    pub resolution: u32,
    pub points: Vec<InterpolatedPoint>,
}

impl InterpolatedGrid {
    /// A grid with no points, returned for degenerate input.
    pub fn empty(resolution: u32) -> Self {
        Self {
            resolution,
            points: Vec::new(),
        }
    }

    /// Unfilled points for every node of a lattice.
    pub fn for_lattice(lattice: &LatLonLattice) -> Self {
        Self {
            resolution: lattice.resolution,
            points: lattice.points().into_iter().map(InterpolatedPoint::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A per-pixel scalar field covering the whole sphere.
///
/// Pixel `(x, y)` sits at longitude `-180 + 360 * x / (width - 1)` and
/// latitude `90 - 180 * y / (height - 1)`; row 0 is the north pole. A
/// single column or row sits at -180° or +90° respectively.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub width: usize,
    pub height: usize,
    /// Row-major values, NaN where there is no data
    pub values: Vec<f64>,
}

impl ScalarField {
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> ClimateResult<Self> {
        if values.len() != width * height {
            return Err(ClimateError::invalid_parameter(
                "values",
                format!(
                    "expected {} values for {}x{}, got {}",
                    width * height,
                    width,
                    height,
                    values.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// A field with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            values: vec![value; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(y * self.width + x).copied()
    }

    /// Longitude of pixel column `x`.
    pub fn column_longitude(&self, x: usize) -> f64 {
        linspace_at(-180.0, 180.0, self.width, x)
    }

    /// Latitude of pixel row `y`.
    pub fn row_latitude(&self, y: usize) -> f64 {
        linspace_at(90.0, -90.0, self.height, y)
    }

    /// Minimum and maximum over the finite values.
    pub fn finite_min_max(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Value `i` of `n` evenly spaced samples from `start` to `end` inclusive.
fn linspace_at(start: f64, end: f64, n: usize, i: usize) -> f64 {
    if n <= 1 {
        return start;
    }
    start + (end - start) * i as f64 / (n - 1) as f64
}
