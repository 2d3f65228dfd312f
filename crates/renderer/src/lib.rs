//! False-color rendering for climate fields.
//!
//! - Per-variable color ramps over a normalized `[0, 1]` value
//! - Min/max normalization with a neutral fallback for flat fields
//! - PNG encoding (indexed or RGBA) and base64 data URIs

pub mod colorize;
pub mod encode;
pub mod png;
pub mod ramp;

pub use colorize::{colorize, Normalization, Raster};
pub use encode::{encode_data_uri, encode_png, DATA_URI_PREFIX};
pub use ramp::{ColorRamp, NO_DATA};
