//! Request-level orchestration for the climate field.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!  request ─────► │       ClimateEngine      │
//!                 └────────────┬─────────────┘
//!                              │ SnapshotRequest
//!                              ▼
//!                    ObservationSource (synthetic | legacy | live | store)
//!                              │ ClimateGrid
//!          ┌───────────────────┼────────────────────┐
//!          ▼                   ▼                    ▼
//!     WindField        SpatialInterpolator    TemporalSeriesBuilder
//!          │                   │               (24 x heatmap path)
//!          │                   ▼
//!          │          colorize ─► encode_data_uri
//!          ▼                   │
//!   WindFieldResponse     HeatmapImage / HourlySeries
//! ```

pub mod config;
pub mod engine;
pub mod heatmap;
pub mod request;
pub mod response;
pub mod series;

pub use config::EngineConfig;
pub use engine::ClimateEngine;
pub use heatmap::{render_heatmap, resolve_variable, HeatmapRenderer};
pub use request::{
    DailySeriesRequest, GridRequest, HeatmapRequest, InterpolationRequest, WindFieldRequest,
};
pub use response::{
    format_timestamp, GridResponse, HeatmapImage, HourlyFrame, HourlySeries, WindFieldResponse,
};
pub use series::{TemporalSeriesBuilder, HOURS_PER_DAY};
