//! PNG encoding for RGBA pixel buffers.
//!
//! Two encodings are available:
//! - **Indexed PNG (color type 3)**: used when the image has ≤256 unique
//!   colors. Ramps with few distinct levels land here.
//! - **RGBA PNG (color type 6)**: fallback for images with more colors.
//!
//! `create_png_auto` picks between them; `create_png` always writes RGBA.

use climate_common::{ClimateError, ClimateResult};
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;

/// PNG file signature
const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

/// PNG color types used here
const COLOR_TYPE_INDEXED: u8 = 3;
const COLOR_TYPE_RGBA: u8 = 6;

type Palette = Vec<(u8, u8, u8, u8)>;

/// Encode RGBA pixels, choosing indexed output when the colors fit.
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> ClimateResult<Vec<u8>> {
    check_dimensions(pixels.len(), width, height, 4)?;

    let palette_result = if width * height >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette_result {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices),
        None => create_png(pixels, width, height),
    }
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

#[inline(always)]
fn unpack_color(packed: u32) -> (u8, u8, u8, u8) {
    let [r, g, b, a] = packed.to_le_bytes();
    (r, g, b, a)
}

/// Sequential palette extraction for small images.
///
/// Returns `None` as soon as a 257th color appears.
fn extract_palette_sequential(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for px in pixels.chunks_exact(4) {
        let packed = pack_color(px[0], px[1], px[2], px[3]);
        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push((px[0], px[1], px[2], px[3]));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Parallel palette extraction for larger images.
///
/// Chunks collect their colors independently; the merged set decides
/// whether indexing is possible, then pixels are mapped in parallel.
/// Palette order follows chunk order, so output is deterministic.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let chunk_size = (pixels.len() / 4 / rayon::current_num_threads()).max(256) * 4;

    let chunk_colors: Vec<Vec<u32>> = pixels
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut seen: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            let mut ordered = Vec::new();
            for px in chunk.chunks_exact(4) {
                let packed = pack_color(px[0], px[1], px[2], px[3]);
                if seen.insert(packed, ()).is_none() {
                    ordered.push(packed);
                    // Early exit: this chunk alone overflows the palette
                    if ordered.len() > MAX_PALETTE_SIZE {
                        break;
                    }
                }
            }
            ordered
        })
        .collect();

    let mut global: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    for packed in chunk_colors.into_iter().flatten() {
        if global.contains_key(&packed) {
            continue;
        }
        if palette.len() >= MAX_PALETTE_SIZE {
            return None;
        }
        global.insert(packed, palette.len() as u8);
        palette.push(unpack_color(packed));
    }

    let indices: Vec<u8> = pixels
        .par_chunks_exact(4)
        .map(|px| {
            global
                .get(&pack_color(px[0], px[1], px[2], px[3]))
                .copied()
                .unwrap_or(0)
        })
        .collect();

    Some((palette, indices))
}

/// Create an indexed PNG (color type 3) from a palette and per-pixel indices.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> ClimateResult<Vec<u8>> {
    check_dimensions(indices.len(), width, height, 1)?;
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(ClimateError::encoding(format!(
            "palette has {} entries, expected 1-{}",
            palette.len(),
            MAX_PALETTE_SIZE
        )));
    }

    let mut png = Vec::new();
    write_header(&mut png, width, height, COLOR_TYPE_INDEXED);

    let plte: Vec<u8> = palette.iter().flat_map(|&(r, g, b, _)| [r, g, b]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS only when some entry is not opaque
    if palette.iter().any(|&(_, _, _, a)| a < 255) {
        let trns: Vec<u8> = palette.iter().map(|&(_, _, _, a)| a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width, height, 1)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create an RGBA PNG (color type 6).
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> ClimateResult<Vec<u8>> {
    check_dimensions(pixels.len(), width, height, 4)?;

    let mut png = Vec::new();
    write_header(&mut png, width, height, COLOR_TYPE_RGBA);

    let idat = deflate_scanlines(pixels, width, height, 4)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn check_dimensions(len: usize, width: usize, height: usize, bytes_per_pixel: usize) -> ClimateResult<()> {
    if width == 0 || height == 0 {
        return Err(ClimateError::encoding(format!(
            "cannot encode a {}x{} image",
            width, height
        )));
    }
    if width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(ClimateError::encoding("image dimensions exceed PNG limits"));
    }
    let expected = width * height * bytes_per_pixel;
    if len != expected {
        return Err(ClimateError::encoding(format!(
            "buffer holds {} bytes, {}x{} needs {}",
            len, width, height, expected
        )));
    }
    Ok(())
}

/// Signature plus IHDR for an 8-bit image.
fn write_header(png: &mut Vec<u8>, width: usize, height: usize, color_type: u8) {
    png.extend_from_slice(&SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(png, b"IHDR", &ihdr);
}

/// Write a PNG chunk: length, type, data, CRC over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Zlib-compress rows, each prefixed with filter type 0 (none).
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> ClimateResult<Vec<u8>> {
    let row_len = width * bytes_per_pixel;
    let mut uncompressed = Vec::with_capacity(height * (1 + row_len));
    for row in data.chunks_exact(row_len).take(height) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&uncompressed)
        .and_then(|_| encoder.finish())
        .map_err(|e| ClimateError::encoding(format!("IDAT compression failed: {}", e)))
}
