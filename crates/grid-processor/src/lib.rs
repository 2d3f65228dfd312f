//! Scattered-data interpolation for climate observations.
//!
//! Resamples a set of observations, regular or not, onto a whole-sphere
//! lattice or a pixel field:
//!
//! - **Lattice inputs** (what the sampler produces) use tensor-product
//!   kernels: bilinear or Catmull-Rom bicubic.
//! - **Scattered inputs** are triangulated: barycentric for linear,
//!   natural-neighbour for smooth interpolation.
//! - **Unresolved targets** fall back to the mean of the finite inputs.
//!
//! # Architecture
//!
//! ```text
//! ClimateGrid
//!      │
//!      ▼
//! Interpolant::new(points, values)      (one per variable)
//!      │
//!      ├─► complete lat/lon lattice?  ──► RectilinearLattice (kernels)
//!      │
//!      └─► otherwise                  ──► TriangulatedField (spade)
//!               │
//!               ▼
//! SpatialInterpolator::interpolate()            → InterpolatedGrid
//! SpatialInterpolator::interpolate_to_raster()  → ScalarField
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{InterpolationMethod, SpatialInterpolator};
//!
//! let field = SpatialInterpolator::new().interpolate_to_raster(
//!     &grid,
//!     ClimateVariable::Temperature,
//!     1024,
//!     512,
//!     InterpolationMethod::Linear,
//! )?;
//! ```

pub mod interpolant;
pub mod interpolator;
pub mod kernels;
pub mod lattice;
pub mod scattered;
pub mod types;

pub use interpolant::Interpolant;
pub use interpolator::SpatialInterpolator;
pub use kernels::{bilinear_interpolate, cubic_interpolate};
pub use lattice::RectilinearLattice;
pub use scattered::TriangulatedField;
pub use types::InterpolationMethod;
