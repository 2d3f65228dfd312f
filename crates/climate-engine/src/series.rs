//! Hourly image series for a single day.

use std::time::Instant;

use chrono::NaiveDate;
use climate_common::{hour_label, hour_timestamp, parse_date_or_today, ClimateResult};
use climate_model::{ObservationSource, SnapshotRequest};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::heatmap::HeatmapRenderer;
use crate::response::{format_timestamp, HourlyFrame, HourlySeries};

/// Hours in a series, always rendered 0 to 23.
pub const HOURS_PER_DAY: u32 = 24;

/// Runs sampling, interpolation, colorization and encoding once per hour.
pub struct TemporalSeriesBuilder<'a> {
    source: &'a dyn ObservationSource,
    renderer: HeatmapRenderer,
    parallel: bool,
}

impl<'a> TemporalSeriesBuilder<'a> {
    pub fn new(source: &'a dyn ObservationSource, renderer: HeatmapRenderer) -> Self {
        Self {
            source,
            renderer,
            parallel: true,
        }
    }

    /// Render hours concurrently. Output order is the same either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the 24-frame series for `date` (`YYYY-MM-DD`, today if malformed).
    pub fn build_day(
        &self,
        date: &str,
        variable: &str,
        resolution: u32,
        width: usize,
        height: usize,
    ) -> ClimateResult<HourlySeries> {
        let day = parse_date_or_today(date);
        let start = Instant::now();

        let render = |hour: u32| self.build_frame(day, hour, variable, resolution, width, height);
        let frames: Vec<HourlyFrame> = if self.parallel {
            (0..HOURS_PER_DAY)
                .into_par_iter()
                .map(render)
                .collect::<ClimateResult<_>>()?
        } else {
            (0..HOURS_PER_DAY).map(render).collect::<ClimateResult<_>>()?
        };

        info!(
            date = %day,
            variable,
            resolution,
            width,
            height,
            frames = frames.len(),
            source = self.source.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built daily series"
        );

        Ok(HourlySeries {
            date: day.format("%Y-%m-%d").to_string(),
            variable: variable.to_string(),
            width,
            height,
            resolution,
            total_hours: frames.len(),
            hourly_data: frames,
        })
    }

    fn build_frame(
        &self,
        day: NaiveDate,
        hour: u32,
        variable: &str,
        resolution: u32,
        width: usize,
        height: usize,
    ) -> ClimateResult<HourlyFrame> {
        let grid = self
            .source
            .observations(&SnapshotRequest::hourly(resolution, day, hour))?;
        let image = self.renderer.render(&grid, variable, width, height)?;
        debug!(hour, points = grid.len(), "Rendered hourly frame");

        Ok(HourlyFrame {
            hour,
            formatted_time: hour_label(hour),
            timestamp: format_timestamp(hour_timestamp(day, hour)),
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_common::{ClimateError, ClimateGrid};
    use climate_model::{ClimateFieldModel, SeededNoise, SyntheticSource};
    use renderer::DATA_URI_PREFIX;

    struct BrokenSource;

    impl ObservationSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn observations(&self, _request: &SnapshotRequest) -> ClimateResult<ClimateGrid> {
            Err(ClimateError::invalid_parameter("resolution", "rejected"))
        }
    }

    fn source() -> SyntheticSource<SeededNoise> {
        SyntheticSource::new(ClimateFieldModel::new(SeededNoise::new(5)))
    }

    #[test]
    fn test_hours_in_order() {
        let source = source();
        let series = TemporalSeriesBuilder::new(&source, HeatmapRenderer::default())
            .build_day("2025-05-25", "humidity", 30, 16, 8)
            .unwrap();
        assert_eq!(series.total_hours, 24);
        let hours: Vec<u32> = series.hourly_data.iter().map(|f| f.hour).collect();
        assert_eq!(hours, (0..24).collect::<Vec<_>>());
        assert!(series.hourly_data.iter().all(|f| f.image.starts_with(DATA_URI_PREFIX)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let source = source();
        let par = TemporalSeriesBuilder::new(&source, HeatmapRenderer::default())
            .build_day("2025-01-10", "sunlight", 30, 16, 8)
            .unwrap();
        let seq = TemporalSeriesBuilder::new(&source, HeatmapRenderer::default())
            .with_parallel(false)
            .build_day("2025-01-10", "sunlight", 30, 16, 8)
            .unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn test_malformed_date_falls_back_to_today() {
        let source = source();
        let before = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let series = TemporalSeriesBuilder::new(&source, HeatmapRenderer::default())
            .build_day("25/05/2025", "temperature", 45, 8, 4)
            .unwrap();
        let after = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();

        // Either side of a midnight crossing
        assert!(series.date == before || series.date == after);
        assert_eq!(series.total_hours, 24);
        assert!(series.hourly_data[0].timestamp.starts_with(&series.date));
    }

    #[test]
    fn test_source_error_fails_series() {
        let result = TemporalSeriesBuilder::new(&BrokenSource, HeatmapRenderer::default())
            .build_day("2025-05-25", "temperature", 10, 8, 4);
        assert!(result.is_err());
    }
}
