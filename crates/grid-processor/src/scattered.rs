//! Triangulated interpolation for irregular inputs.

use std::collections::HashSet;

use climate_common::SamplePoint;
use spade::{DelaunayTriangulation, FloatTriangulation, HasPosition, Point2, Triangulation};
use tracing::{debug, warn};

use crate::types::InterpolationMethod;

/// A value attached to a planar (lon, lat) position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    position: Point2<f64>,
    value: f64,
}

impl HasPosition for Sample {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Delaunay triangulation of scattered samples in the lon/lat plane.
///
/// Points outside the convex hull of the inputs are unresolved.
pub struct TriangulatedField {
    triangulation: DelaunayTriangulation<Sample>,
}

impl std::fmt::Debug for TriangulatedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriangulatedField")
            .field("vertices", &self.triangulation.num_vertices())
            .finish()
    }
}

impl TriangulatedField {
    /// Triangulate the inputs. The first of several samples at the same
    /// position wins. Returns `None` when triangulation fails.
    pub fn new(points: &[SamplePoint], values: &[f64]) -> Option<Self> {
        let mut seen = HashSet::with_capacity(points.len());
        let samples: Vec<Sample> = points
            .iter()
            .zip(values)
            .filter(|(p, _)| {
                seen.insert(((p.longitude + 0.0).to_bits(), (p.latitude + 0.0).to_bits()))
            })
            .map(|(p, &value)| Sample {
                position: Point2::new(p.longitude, p.latitude),
                value,
            })
            .collect();

        if samples.len() < points.len() {
            debug!(
                inputs = points.len(),
                unique = samples.len(),
                "Dropped duplicate sample positions"
            );
        }

        match DelaunayTriangulation::bulk_load(samples) {
            Ok(triangulation) => Some(Self { triangulation }),
            Err(e) => {
                warn!(error = ?e, "Triangulation failed");
                None
            }
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.triangulation.num_vertices()
    }

    /// Interpolated value, or `None` outside the convex hull.
    ///
    /// Natural-neighbour interpolation needs at least one face, so degenerate
    /// triangulations (a single vertex or collinear inputs) answer Cubic
    /// queries barycentrically.
    pub fn sample(&self, lat: f64, lon: f64, method: InterpolationMethod) -> Option<f64> {
        let position = Point2::new(lon, lat);
        let degenerate = self.triangulation.num_inner_faces() == 0;
        let v = match method {
            InterpolationMethod::Cubic if !degenerate => self
                .triangulation
                .natural_neighbor()
                .interpolate(|v| v.data().value, position),
            _ => self
                .triangulation
                .barycentric()
                .interpolate(|v| v.data().value, position),
        }?;
        v.is_finite().then_some(v)
    }
}
