//! Synthetic climate field generation.
//!
//! A closed-form parametric model produces temperature, humidity, wind,
//! precipitation and sunlight for any point on the sphere, either as a
//! timeless snapshot or for a given hour of a given day:
//!
//! ```text
//! GridSampler::sample(resolution, clock)
//!      │
//!      ├─► LatLonLattice::points()          (-90..=90 × -180..=180)
//!      │
//!      └─► ClimateFieldModel::evaluate()    (per point, rayon fan-out)
//!               │
//!               └─► NoiseSource::stream(lat, lon, hour)
//! ```
//!
//! Seeded noise is drawn from a stream keyed by the point itself, so a grid
//! is identical whether it is sampled sequentially or in parallel.
//! `EntropyNoise` gives unseeded callers fresh perturbations on every sample.

pub mod legacy;
pub mod model;
pub mod noise;
pub mod sampler;
pub mod source;
pub mod wind;

pub use legacy::{LegacySampleModel, LegacySampleSource};
pub use model::{ClimateFieldModel, ModelClock};
pub use noise::{EntropyNoise, NoiseSource, Perturbation, SeededNoise, ZeroNoise};
pub use sampler::{GridSampler, SamplerOptions};
pub use source::{
    DocumentStore, LiveFetchSource, ObservationSource, PersistedQuerySource, SnapshotRequest,
    SyntheticSource, WeatherRecordSource,
};
pub use wind::{WindField, WindVector};
