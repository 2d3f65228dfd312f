//! Test helpers shared by the climate crates.
//!
//! - `assert_approx_eq!` and `assert_all_finite!` (NaN never passes)
//! - [`generators`]: observation grids with closed-form values
//! - [`fixtures`]: reference date, image sizes, variable names
//!
//! Pull it in as a dev-dependency with a path to `crates/test-utils`.

pub mod fixtures;
pub mod generators;

pub use generators::*;

/// Assert `|left - right| <= epsilon`, comparing as `f64`.
///
/// ```ignore
/// assert_approx_eq!(30.0001, 30.0, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (l, r, eps) = ($left as f64, $right as f64, $epsilon as f64);
        // Written so a NaN on either side fails
        if !((l - r).abs() <= eps) {
            panic!(
                "assertion failed: {:?} is not within {:?} of {:?}",
                l, eps, r
            );
        }
    }};
}

/// Assert every element of a slice is finite.
#[macro_export]
macro_rules! assert_all_finite {
    ($values:expr) => {{
        for (i, v) in $values.iter().enumerate() {
            if !v.is_finite() {
                panic!("assertion failed: value at index {} is {:?}", i, v);
            }
        }
    }};
}
