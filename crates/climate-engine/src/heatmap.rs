//! Grid to false-color image.

use std::str::FromStr;
use std::time::Instant;

use climate_common::{ClimateGrid, ClimateResult, ClimateVariable};
use grid_processor::{InterpolationMethod, SpatialInterpolator};
use renderer::{colorize, encode_data_uri, ColorRamp, Raster};
use tracing::{debug, warn};

/// Pixel-density resampling uses the cheaper linear path.
const RASTER_METHOD: InterpolationMethod = InterpolationMethod::Linear;

/// Variable to sample and ramp to paint it with.
///
/// Unrecognized names still render: temperature values under the flat
/// neutral ramp.
pub fn resolve_variable(name: &str) -> (ClimateVariable, ColorRamp) {
    match ClimateVariable::from_str(name) {
        Ok(variable) => (variable, ColorRamp::for_variable(variable)),
        Err(e) => {
            warn!(variable = name, error = %e, "Unknown variable, using neutral ramp");
            (ClimateVariable::Temperature, ColorRamp::Neutral)
        }
    }
}

/// Shared by the snapshot and hourly paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatmapRenderer {
    interpolator: SpatialInterpolator,
}

impl HeatmapRenderer {
    pub fn new(interpolator: SpatialInterpolator) -> Self {
        Self { interpolator }
    }

    /// Interpolate one variable to `width` x `height` and colorize it.
    pub fn render_raster(
        &self,
        grid: &ClimateGrid,
        variable_name: &str,
        width: usize,
        height: usize,
    ) -> ClimateResult<Raster> {
        let start = Instant::now();
        let (variable, ramp) = resolve_variable(variable_name);

        let field =
            self.interpolator
                .interpolate_to_raster(grid, variable, width, height, RASTER_METHOD)?;
        let raster = colorize(&field, ramp);

        debug!(
            variable = variable_name,
            ramp = ?ramp,
            width,
            height,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered heatmap"
        );
        Ok(raster)
    }

    /// Render and encode as a PNG data URI.
    pub fn render(
        &self,
        grid: &ClimateGrid,
        variable_name: &str,
        width: usize,
        height: usize,
    ) -> ClimateResult<String> {
        let raster = self.render_raster(grid, variable_name, width, height)?;
        encode_data_uri(&raster)
    }
}

/// [`HeatmapRenderer::render`] with default interpolation settings.
pub fn render_heatmap(
    grid: &ClimateGrid,
    variable_name: &str,
    width: usize,
    height: usize,
) -> ClimateResult<String> {
    HeatmapRenderer::default().render(grid, variable_name, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::DATA_URI_PREFIX;
    use test_utils::generators::{lattice_grid, linear_field};

    #[test]
    fn test_resolve_known_and_unknown() {
        assert_eq!(
            resolve_variable("windSpeed"),
            (ClimateVariable::WindSpeed, ColorRamp::WindSpeed)
        );
        assert_eq!(
            resolve_variable("cloudCover"),
            (ClimateVariable::Temperature, ColorRamp::Neutral)
        );
    }

    #[test]
    fn test_render_is_data_uri() {
        let grid = lattice_grid(30, linear_field);
        let uri = render_heatmap(&grid, "temperature", 32, 16).unwrap();
        assert!(uri.starts_with(DATA_URI_PREFIX));
    }

    #[test]
    fn test_unknown_variable_is_white() {
        let grid = lattice_grid(30, linear_field);
        let raster = HeatmapRenderer::default()
            .render_raster(&grid, "cloudCover", 16, 8)
            .unwrap();
        assert!(raster.pixels.chunks(4).all(|p| p == [255, 255, 255, 200]));
    }

    #[test]
    fn test_empty_grid_is_transparent() {
        let raster = HeatmapRenderer::default()
            .render_raster(&ClimateGrid::default(), "humidity", 8, 4)
            .unwrap();
        assert!(raster.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let grid = lattice_grid(30, linear_field);
        assert!(render_heatmap(&grid, "temperature", 0, 16).is_err());
    }
}
