//! Common types and utilities shared across the climate field crates.

pub mod error;
pub mod grid;
pub mod observation;
pub mod time;

pub use error::{ClimateError, ClimateResult};
pub use grid::{ClimateGrid, InterpolatedGrid, InterpolatedPoint, LatLonLattice, ScalarField};
pub use observation::{round_to, ClimateObservation, ClimateVariable, SamplePoint};
pub use time::{day_of_year, hour_label, hour_timestamp, parse_date_or_today, DateRange};
