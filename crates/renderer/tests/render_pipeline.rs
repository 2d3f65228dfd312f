//! End-to-end tests for colorizing and encoding climate fields.
//!
//! Covers:
//! - Indexed vs RGBA format selection
//! - Lossless decode of encoded rasters
//! - Transparency of missing values through the whole pipeline

use climate_common::ScalarField;
use renderer::png::{create_png, create_png_auto};
use renderer::{colorize, encode_data_uri, encode_png, ColorRamp, Raster, DATA_URI_PREFIX};

// ============================================================================
// Helper functions
// ============================================================================

/// Temperature-like field: warm equator, cold poles, a wave along longitude.
fn temperature_field(width: usize, height: usize) -> ScalarField {
    let mut values = Vec::with_capacity(width * height);
    for y in 0..height {
        let lat = 90.0 - 180.0 * y as f64 / (height - 1).max(1) as f64;
        for x in 0..width {
            let lon = -180.0 + 360.0 * x as f64 / (width - 1).max(1) as f64;
            values.push(30.0 - lat.abs() * 0.6 + 5.0 * (lon.to_radians() * 2.0).sin());
        }
    }
    ScalarField::new(width, height, values).unwrap()
}

/// Raster whose pixels are all distinct, forcing RGBA output.
fn many_color_raster(width: usize, height: usize) -> Raster {
    let pixels = (0..width * height)
        .flat_map(|i| [(i % 256) as u8, (i / 256 % 256) as u8, 7, 200])
        .collect();
    Raster {
        width,
        height,
        pixels,
    }
}

/// PNG color type byte from the IHDR chunk.
fn color_type(png: &[u8]) -> u8 {
    png[25]
}

fn decode(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

// ============================================================================
// Format selection
// ============================================================================

#[test]
fn test_few_colors_use_indexed_png() {
    let field = ScalarField::new(4, 2, vec![0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
    let raster = colorize(&field, ColorRamp::Temperature);
    let png = encode_png(&raster).unwrap();
    assert_eq!(color_type(&png), 3);
    assert_eq!(decode(&png).as_raw(), &raster.pixels);
}

#[test]
fn test_many_colors_fall_back_to_rgba() {
    let raster = many_color_raster(32, 32);
    let png = create_png_auto(&raster.pixels, 32, 32).unwrap();
    assert_eq!(color_type(&png), 6);
    assert_eq!(decode(&png).as_raw(), &raster.pixels);
}

#[test]
fn test_rgba_and_indexed_decode_identically() {
    let raster = colorize(&temperature_field(64, 32), ColorRamp::Temperature);
    let forced_rgba = create_png(&raster.pixels, 64, 32).unwrap();
    let auto = create_png_auto(&raster.pixels, 64, 32).unwrap();
    assert_eq!(decode(&forced_rgba).as_raw(), decode(&auto).as_raw());
}

#[test]
fn test_large_raster_roundtrip() {
    // Above the parallel palette threshold
    let raster = colorize(&temperature_field(256, 128), ColorRamp::Sunlight);
    let png = encode_png(&raster).unwrap();
    let decoded = decode(&png);
    assert_eq!((decoded.width(), decoded.height()), (256, 128));
    assert_eq!(decoded.as_raw(), &raster.pixels);
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_every_ramp_encodes() {
    let field = temperature_field(32, 16);
    for ramp in [
        ColorRamp::Temperature,
        ColorRamp::Humidity,
        ColorRamp::WindSpeed,
        ColorRamp::Precipitation,
        ColorRamp::Sunlight,
        ColorRamp::Neutral,
    ] {
        let uri = encode_data_uri(&colorize(&field, ramp)).unwrap();
        assert!(uri.starts_with(DATA_URI_PREFIX), "{:?}", ramp);
    }
}

#[test]
fn test_missing_values_stay_transparent() {
    let mut field = temperature_field(16, 8);
    field.values[0] = f64::NAN;
    field.values[17] = f64::INFINITY;

    let decoded = decode(&encode_png(&colorize(&field, ColorRamp::Humidity)).unwrap());
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(decoded.get_pixel(1, 1).0, [0, 0, 0, 0]);
    assert_eq!(decoded.get_pixel(2, 2).0[3], 200);
}

#[test]
fn test_neutral_ramp_is_flat_white() {
    let decoded = decode(&encode_png(&colorize(&temperature_field(8, 4), ColorRamp::Neutral)).unwrap());
    assert!(decoded.pixels().all(|p| p.0 == [255, 255, 255, 200]));
}

#[test]
fn test_single_pixel() {
    let field = ScalarField::new(1, 1, vec![12.5]).unwrap();
    let decoded = decode(&encode_png(&colorize(&field, ColorRamp::Temperature)).unwrap());
    // Flat field sits at the ramp midpoint
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 255, 0, 200]);
}
