//! Raster to PNG bytes and base64 data URIs.

use base64::{engine::general_purpose::STANDARD, Engine};
use climate_common::ClimateResult;
use std::time::Instant;
use tracing::debug;

use crate::colorize::Raster;
use crate::png::create_png_auto;

/// Prefix of every image string handed to clients.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode a raster as PNG.
pub fn encode_png(raster: &Raster) -> ClimateResult<Vec<u8>> {
    let start = Instant::now();
    let png = create_png_auto(&raster.pixels, raster.width, raster.height)?;
    debug!(
        width = raster.width,
        height = raster.height,
        bytes = png.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Encoded PNG"
    );
    Ok(png)
}

/// Encode a raster as a `data:image/png;base64,` URI.
pub fn encode_data_uri(raster: &Raster) -> ClimateResult<String> {
    let png = encode_png(raster)?;
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + png.len() * 4 / 3 + 4);
    uri.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(&png, &mut uri);
    Ok(uri)
}
