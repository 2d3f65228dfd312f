//! Observation sources.
//!
//! Every source produces the same [`ClimateObservation`] shape, so the
//! interpolation and rendering stages never know where data came from.
//! Sources that talk to collaborators degrade instead of failing: a point
//! that cannot be fetched is skipped, a store that cannot be queried yields
//! an empty grid.

use chrono::NaiveDate;
use climate_common::{
    ClimateGrid, ClimateObservation, ClimateResult, DateRange, LatLonLattice,
};
use tracing::{debug, info, warn};

use crate::model::{ClimateFieldModel, ModelClock};
use crate::noise::NoiseSource;
use crate::sampler::{GridSampler, SamplerOptions};

/// What to produce: a lattice resolution and a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub resolution: u32,
    pub clock: ModelClock,
}

impl SnapshotRequest {
    pub fn snapshot(resolution: u32) -> Self {
        Self {
            resolution,
            clock: ModelClock::Snapshot,
        }
    }

    pub fn hourly(resolution: u32, date: NaiveDate, hour: u32) -> Self {
        Self {
            resolution,
            clock: ModelClock::hourly(date, hour),
        }
    }

    /// Date the request refers to, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self.clock {
            ModelClock::Snapshot => None,
            ModelClock::Hourly { date, .. } => Some(date),
        }
    }
}

/// A strategy that yields observations for a request.
pub trait ObservationSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn observations(&self, request: &SnapshotRequest) -> ClimateResult<ClimateGrid>;
}

/// The synthetic field model sampled on a lattice.
#[derive(Debug, Clone)]
pub struct SyntheticSource<N> {
    model: ClimateFieldModel<N>,
    options: SamplerOptions,
}

impl<N: NoiseSource> SyntheticSource<N> {
    pub fn new(model: ClimateFieldModel<N>) -> Self {
        Self {
            model,
            options: SamplerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SamplerOptions) -> Self {
        self.options = options;
        self
    }
}

impl<N: NoiseSource> ObservationSource for SyntheticSource<N> {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn observations(&self, request: &SnapshotRequest) -> ClimateResult<ClimateGrid> {
        GridSampler::with_options(&self.model, self.options)
            .sample(request.resolution, request.clock)
    }
}

/// Remote weather-record lookup for a single location.
pub trait WeatherRecordSource: Send + Sync {
    fn fetch_observations(
        &self,
        lat: f64,
        lon: f64,
        range: DateRange,
    ) -> ClimateResult<Vec<ClimateObservation>>;
}

/// Per-point live fetch over a lattice.
#[derive(Debug, Clone)]
pub struct LiveFetchSource<W> {
    fetcher: W,
}

impl<W: WeatherRecordSource> LiveFetchSource<W> {
    pub fn new(fetcher: W) -> Self {
        Self { fetcher }
    }
}

impl<W: WeatherRecordSource> ObservationSource for LiveFetchSource<W> {
    fn name(&self) -> &'static str {
        "live-fetch"
    }

    fn observations(&self, request: &SnapshotRequest) -> ClimateResult<ClimateGrid> {
        let lattice = LatLonLattice::new(request.resolution)?;
        let range = request
            .date()
            .map(DateRange::single)
            .unwrap_or_else(|| DateRange::single(chrono::Utc::now().date_naive()));

        let mut observations = Vec::new();
        let mut failures = 0usize;

        for point in lattice.points() {
            match self
                .fetcher
                .fetch_observations(point.latitude, point.longitude, range)
            {
                Ok(batch) => observations.extend(batch),
                Err(e) => {
                    failures += 1;
                    warn!(
                        lat = point.latitude,
                        lon = point.longitude,
                        error = %e,
                        "Weather record fetch failed, skipping point"
                    );
                }
            }
        }

        info!(
            source = self.name(),
            fetched = observations.len(),
            failed_points = failures,
            "Live fetch complete"
        );

        Ok(keep_valid(observations, self.name()))
    }
}

/// Persisted observation documents keyed by date.
pub trait DocumentStore: Send + Sync {
    fn query(&self, date: Option<NaiveDate>) -> ClimateResult<Vec<ClimateObservation>>;
}

/// Observations read back from a document store.
#[derive(Debug, Clone)]
pub struct PersistedQuerySource<S> {
    store: S,
}

impl<S: DocumentStore> PersistedQuerySource<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: DocumentStore> ObservationSource for PersistedQuerySource<S> {
    fn name(&self) -> &'static str {
        "persisted-query"
    }

    fn observations(&self, request: &SnapshotRequest) -> ClimateResult<ClimateGrid> {
        match self.store.query(request.date()) {
            Ok(docs) => {
                debug!(source = self.name(), documents = docs.len(), "Store query returned");
                Ok(keep_valid(docs, self.name()))
            }
            Err(e) => {
                warn!(
                    source = self.name(),
                    date = ?request.date(),
                    error = %e,
                    "Store query failed, returning empty grid"
                );
                Ok(ClimateGrid::default())
            }
        }
    }
}

/// Drop observations that break the value invariants.
pub(crate) fn keep_valid(observations: Vec<ClimateObservation>, source: &str) -> ClimateGrid {
    observations
        .into_iter()
        .filter(|obs| match obs.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(source = source, error = %e, "Dropping invalid observation");
                false
            }
        })
        .collect()
}
