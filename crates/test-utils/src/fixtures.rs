//! Common fixtures for climate tests.

/// Reference day used across the hourly tests (day of year 145).
pub const REFERENCE_DATE_STR: &str = "2025-05-25";

/// Image sizes for rendering tests.
pub mod sizes {
    /// Small enough to keep a 24-frame series fast.
    pub const TINY: (usize, usize) = (64, 32);

    /// Degenerate single pixel.
    pub const SINGLE_PIXEL: (usize, usize) = (1, 1);
}

/// Variable names accepted on the request surface, plus one unknown.
pub const VARIABLE_NAMES: [&str; 5] = [
    "temperature",
    "humidity",
    "windSpeed",
    "precipitation",
    "sunlight",
];

pub const UNKNOWN_VARIABLE: &str = "cloudCover";
