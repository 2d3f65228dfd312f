//! The four request shapes over a pluggable observation source.

use std::sync::Arc;

use chrono::Utc;
use climate_common::{ClimateError, ClimateGrid, ClimateResult, InterpolatedGrid};
use climate_model::{
    ClimateFieldModel, EntropyNoise, ObservationSource, SamplerOptions, SeededNoise,
    SnapshotRequest, SyntheticSource, WindField,
};
use grid_processor::SpatialInterpolator;
use renderer::encode_png;
use tracing::info;

use crate::config::EngineConfig;
use crate::heatmap::HeatmapRenderer;
use crate::request::{
    DailySeriesRequest, GridRequest, HeatmapRequest, InterpolationRequest, WindFieldRequest,
};
use crate::response::{format_timestamp, HeatmapImage, HourlySeries, WindFieldResponse};
use crate::series::TemporalSeriesBuilder;

/// Entry point for grid, heatmap, wind field and daily series requests.
///
/// Every request samples fresh data from the source; nothing is cached
/// between requests. Without a configured seed, wind directions are drawn
/// afresh for every request.
pub struct ClimateEngine {
    source: Arc<dyn ObservationSource>,
    config: EngineConfig,
    interpolator: SpatialInterpolator,
}

impl ClimateEngine {
    /// Build an engine over any observation source.
    pub fn new(source: Arc<dyn ObservationSource>, config: EngineConfig) -> ClimateResult<Self> {
        config
            .validate()
            .map_err(|msg| ClimateError::invalid_parameter("config", msg))?;

        let interpolator = SpatialInterpolator::new().with_parallel(config.parallel);

        info!(
            source = source.name(),
            seed = ?config.seed,
            parallel = config.parallel,
            "Climate engine ready"
        );

        Ok(Self {
            source,
            config,
            interpolator,
        })
    }

    /// Engine over the synthetic model.
    ///
    /// With a seed, the model noise and the wind directions share it and
    /// every response is reproducible. Without one, each request draws
    /// fresh noise.
    pub fn synthetic(config: EngineConfig) -> ClimateResult<Self> {
        let options = SamplerOptions {
            parallel: config.parallel,
        };
        let source: Arc<dyn ObservationSource> = match config.seed {
            Some(seed) => Arc::new(
                SyntheticSource::new(ClimateFieldModel::new(SeededNoise::new(seed)))
                    .with_options(options),
            ),
            None => Arc::new(
                SyntheticSource::new(ClimateFieldModel::new(EntropyNoise)).with_options(options),
            ),
        };
        Self::new(source, config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Snapshot observations on a lattice.
    pub fn grid(&self, request: &GridRequest) -> ClimateResult<ClimateGrid> {
        let resolution = self.resolution(request.resolution, self.config.default_resolution)?;
        let grid = self.snapshot(resolution)?;
        info!(resolution, points = grid.len(), "Grid request");
        Ok(grid)
    }

    /// Snapshot observations resampled onto another lattice.
    pub fn interpolated_grid(
        &self,
        request: &InterpolationRequest,
    ) -> ClimateResult<InterpolatedGrid> {
        let resolution = self.resolution(request.resolution, self.config.default_resolution)?;
        let target = self.resolution(Some(request.target_resolution), resolution)?;
        let grid = self.snapshot(resolution)?;
        let output = self.interpolator.interpolate(&grid, target, request.method)?;
        info!(
            resolution,
            target_resolution = target,
            method = %request.method,
            points = output.len(),
            "Interpolated grid request"
        );
        Ok(output)
    }

    /// False-color snapshot image as a data URI.
    pub fn heatmap(&self, request: &HeatmapRequest) -> ClimateResult<HeatmapImage> {
        let (resolution, width, height) = self.heatmap_params(request)?;
        let grid = self.snapshot(resolution)?;
        let image = self
            .renderer()
            .render(&grid, &request.variable, width, height)?;

        info!(
            variable = %request.variable,
            resolution,
            width,
            height,
            "Heatmap request"
        );

        Ok(HeatmapImage {
            image,
            width,
            height,
            variable: request.variable.clone(),
        })
    }

    /// False-color snapshot image as raw PNG bytes.
    pub fn heatmap_png(&self, request: &HeatmapRequest) -> ClimateResult<Vec<u8>> {
        let (resolution, width, height) = self.heatmap_params(request)?;
        let grid = self.snapshot(resolution)?;
        let raster = self
            .renderer()
            .render_raster(&grid, &request.variable, width, height)?;
        encode_png(&raster)
    }

    /// Wind vectors with model speeds and random directions.
    pub fn wind_field(&self, request: &WindFieldRequest) -> ClimateResult<WindFieldResponse> {
        let resolution = self.resolution(request.resolution, self.config.wind_resolution)?;
        let grid = self.snapshot(resolution)?;
        let wind_data = self.wind().vectors(&grid);

        info!(resolution, vectors = wind_data.len(), "Wind field request");

        Ok(WindFieldResponse {
            wind_data,
            particle_count: request.particles.unwrap_or(self.config.wind_particles),
            timestamp: format_timestamp(Utc::now()),
        })
    }

    /// One image per hour of a day.
    pub fn daily_series(&self, request: &DailySeriesRequest) -> ClimateResult<HourlySeries> {
        let resolution = self.resolution(request.resolution, self.config.default_resolution)?;
        let (width, height) = self.size(request.width, request.height)?;
        let date = request
            .date
            .clone()
            .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());

        TemporalSeriesBuilder::new(self.source.as_ref(), self.renderer())
            .with_parallel(self.config.parallel)
            .build_day(&date, &request.variable, resolution, width, height)
    }

    fn wind(&self) -> WindField {
        WindField::new(self.config.seed.unwrap_or_else(rand::random))
    }

    fn renderer(&self) -> HeatmapRenderer {
        HeatmapRenderer::new(self.interpolator)
    }

    fn snapshot(&self, resolution: u32) -> ClimateResult<ClimateGrid> {
        self.source
            .observations(&SnapshotRequest::snapshot(resolution))
    }

    fn heatmap_params(&self, request: &HeatmapRequest) -> ClimateResult<(u32, usize, usize)> {
        let resolution = self.resolution(request.resolution, self.config.default_resolution)?;
        let (width, height) = self.size(request.width, request.height)?;
        Ok((resolution, width, height))
    }

    fn resolution(&self, requested: Option<u32>, default: u32) -> ClimateResult<u32> {
        match requested.unwrap_or(default) {
            0 => Err(ClimateError::invalid_parameter(
                "resolution",
                "must be at least 1 degree",
            )),
            r => Ok(r),
        }
    }

    fn size(&self, width: Option<usize>, height: Option<usize>) -> ClimateResult<(usize, usize)> {
        let width = width.unwrap_or(self.config.default_width);
        let height = height.unwrap_or(self.config.default_height);

        if width == 0 || width > self.config.max_width {
            return Err(ClimateError::invalid_parameter(
                "width",
                format!("{} is outside 1-{}", width, self.config.max_width),
            ));
        }
        if height == 0 || height > self.config.max_height {
            return Err(ClimateError::invalid_parameter(
                "height",
                format!("{} is outside 1-{}", height, self.config.max_height),
            ));
        }
        Ok((width, height))
    }
}
