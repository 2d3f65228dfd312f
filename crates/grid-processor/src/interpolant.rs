//! Single-variable interpolant with mean fallback.

use climate_common::SamplePoint;

use crate::lattice::RectilinearLattice;
use crate::scattered::TriangulatedField;
use crate::types::InterpolationMethod;

#[derive(Debug)]
enum Strategy {
    Lattice(RectilinearLattice),
    Triangulated(TriangulatedField),
    /// Nothing to interpolate from; every query resolves to the mean.
    MeanOnly,
}

/// Interpolates one variable from a set of observations.
///
/// Non-finite inputs are dropped. Queries that cannot be resolved (outside
/// the inputs' hull, or a non-finite result) return the arithmetic mean of
/// the finite inputs, which is NaN when there are none.
#[derive(Debug)]
pub struct Interpolant {
    strategy: Strategy,
    mean: f64,
    inputs: usize,
}

impl Interpolant {
    pub fn new(points: &[SamplePoint], values: &[f64]) -> Self {
        let (points, values): (Vec<SamplePoint>, Vec<f64>) = points
            .iter()
            .zip(values)
            .filter(|(_, v)| v.is_finite())
            .map(|(p, v)| (*p, *v))
            .unzip();

        let mean = if values.is_empty() {
            f64::NAN
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };

        let strategy = if values.is_empty() {
            Strategy::MeanOnly
        } else if let Some(lattice) = RectilinearLattice::detect(&points, &values) {
            Strategy::Lattice(lattice)
        } else {
            TriangulatedField::new(&points, &values)
                .map(Strategy::Triangulated)
                .unwrap_or(Strategy::MeanOnly)
        };

        Self {
            strategy,
            mean,
            inputs: values.len(),
        }
    }

    /// Mean of the finite inputs.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of finite inputs used.
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn is_lattice(&self) -> bool {
        matches!(self.strategy, Strategy::Lattice(_))
    }

    /// Interpolated value, or `None` when unresolved.
    pub fn resolve(&self, lat: f64, lon: f64, method: InterpolationMethod) -> Option<f64> {
        match &self.strategy {
            Strategy::Lattice(lattice) => lattice.sample(lat, lon, method),
            Strategy::Triangulated(field) => field.sample(lat, lon, method),
            Strategy::MeanOnly => None,
        }
    }

    /// Interpolated value with the mean fallback applied.
    pub fn sample(&self, lat: f64, lon: f64, method: InterpolationMethod) -> f64 {
        self.resolve(lat, lon, method).unwrap_or(self.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> SamplePoint {
        SamplePoint::new_unchecked(lat, lon)
    }

    #[test]
    fn test_no_finite_inputs_gives_nan() {
        let interp = Interpolant::new(&[pt(0.0, 0.0)], &[f64::NAN]);
        assert_eq!(interp.inputs(), 0);
        assert!(interp.sample(0.0, 0.0, InterpolationMethod::Linear).is_nan());
    }

    #[test]
    fn test_outside_hull_uses_mean_of_finite_inputs() {
        let points = [pt(0.0, 0.0), pt(0.0, 10.0), pt(10.0, 0.0), pt(50.0, 50.0)];
        let values = [1.0, 2.0, 6.0, f64::NAN];
        let interp = Interpolant::new(&points, &values);
        assert!(!interp.is_lattice());
        assert_eq!(interp.mean(), 3.0);
        assert_eq!(interp.sample(-45.0, 170.0, InterpolationMethod::Cubic), 3.0);
    }

    #[test]
    fn test_lattice_inputs_take_lattice_path() {
        let points = [pt(0.0, 0.0), pt(0.0, 10.0), pt(10.0, 0.0), pt(10.0, 10.0)];
        let interp = Interpolant::new(&points, &[0.0, 1.0, 2.0, 3.0]);
        assert!(interp.is_lattice());
        assert_eq!(interp.sample(5.0, 5.0, InterpolationMethod::Linear), 1.5);
    }

    #[test]
    fn test_non_finite_inputs_dropped_before_lattice_detection() {
        let points = [
            pt(0.0, 0.0),
            pt(0.0, 10.0),
            pt(10.0, 0.0),
            pt(10.0, 10.0),
            pt(5.0, 5.0),
        ];
        let values = [0.0, 1.0, 2.0, 3.0, f64::NAN];
        let interp = Interpolant::new(&points, &values);
        assert!(interp.is_lattice());
        // (5, 5) dropped, leaving a complete 2x2 lattice
        assert_eq!(interp.inputs(), 4);
    }
}
