//! Error types for the climate field engine.

use thiserror::Error;

/// Result type alias using ClimateError.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Primary error type for grid synthesis, interpolation and rendering.
///
/// Degenerate inputs (unknown variable names, malformed dates, empty grids,
/// zero-variance fields) are handled by degrading the output and never reach
/// this type. Only conditions with no valid output surface here.
#[derive(Debug, Error)]
pub enum ClimateError {
    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Data Errors ===
    #[error("Invalid observation at ({lat}, {lon}): {message}")]
    InvalidObservation { lat: f64, lon: f64, message: String },

    // === Rendering Errors ===
    #[error("Raster encoding failed: {0}")]
    Encoding(String),

    // === Collaborator Errors ===
    #[error("Upstream data source unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClimateError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidObservation error.
    pub fn invalid_observation(lat: f64, lon: f64, message: impl Into<String>) -> Self {
        Self::InvalidObservation {
            lat,
            lon,
            message: message.into(),
        }
    }

    /// Create an Encoding error.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Create an UpstreamUnavailable error.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }

    /// Whether the caller supplied bad input (as opposed to a server-side failure).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClimateError::InvalidParameter { .. } | ClimateError::InvalidObservation { .. }
        )
    }
}

impl From<std::io::Error> for ClimateError {
    fn from(err: std::io::Error) -> Self {
        ClimateError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ClimateError {
    fn from(err: serde_json::Error) -> Self {
        ClimateError::Internal(format!("JSON error: {}", err))
    }
}
