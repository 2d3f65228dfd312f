//! Interpolation kernels on a row-major value grid.
//!
//! Coordinates are fractional indices: `x` along a row, `y` down columns.

/// Bilinear interpolation.
///
/// Smoothly interpolates between the four nearest grid points.
pub fn bilinear_interpolate(data: &[f64], width: usize, height: usize, x: f64, y: f64) -> f64 {
    if width == 0 || height == 0 || x < 0.0 || y < 0.0 {
        return f64::NAN;
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;

    if x0 >= width || y0 >= height {
        return f64::NAN;
    }

    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let xf = x - x0 as f64;
    let yf = y - y0 as f64;

    let v00 = data[y0 * width + x0];
    let v10 = data[y0 * width + x1];
    let v01 = data[y1 * width + x0];
    let v11 = data[y1 * width + x1];

    // If any corner is NaN, return NaN
    if v00.is_nan() || v10.is_nan() || v01.is_nan() || v11.is_nan() {
        return f64::NAN;
    }

    let top = v00 * (1.0 - xf) + v10 * xf;
    let bottom = v01 * (1.0 - xf) + v11 * xf;
    top * (1.0 - yf) + bottom * yf
}

/// Bicubic interpolation.
///
/// Uses the 16 surrounding points, with edge samples repeated at the
/// borders. Falls back to bilinear when a neighbour is NaN.
pub fn cubic_interpolate(data: &[f64], width: usize, height: usize, x: f64, y: f64) -> f64 {
    if width == 0 || height == 0 || x < 0.0 || y < 0.0 {
        return f64::NAN;
    }

    let xi = x.floor() as i64;
    let yi = y.floor() as i64;

    if xi >= width as i64 || yi >= height as i64 {
        return f64::NAN;
    }

    let xf = x - xi as f64;
    let yf = y - yi as f64;

    let mut values = [[0.0f64; 4]; 4];

    for j in 0..4 {
        for i in 0..4 {
            let px = (xi + i as i64 - 1).clamp(0, width as i64 - 1) as usize;
            let py = (yi + j as i64 - 1).clamp(0, height as i64 - 1) as usize;
            let v = data[py * width + px];
            if v.is_nan() {
                return bilinear_interpolate(data, width, height, x, y);
            }
            values[j][i] = v;
        }
    }

    let mut row_values = [0.0f64; 4];
    for (j, row) in values.iter().enumerate() {
        row_values[j] = cubic_1d(row[0], row[1], row[2], row[3], xf);
    }

    cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf)
}

/// 1D cubic interpolation using Catmull-Rom spline.
fn cubic_1d(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}

/// Fractional index of `value` on an ascending axis.
///
/// Returns `None` outside `[axis[0], axis[last]]`. Spacing need not be
/// uniform; the fraction is linear within the bracketing interval.
pub fn axis_position(axis: &[f64], value: f64) -> Option<f64> {
    let (&first, &last) = (axis.first()?, axis.last()?);
    if !(first..=last).contains(&value) {
        return None;
    }
    if axis.len() == 1 {
        return Some(0.0);
    }

    let upper = axis.partition_point(|&a| a <= value);
    let i = upper.saturating_sub(1).min(axis.len() - 2);
    let span = axis[i + 1] - axis[i];
    Some(i as f64 + (value - axis[i]) / span)
}
