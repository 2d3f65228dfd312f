//! Core types for the interpolation layer.

use serde::{Deserialize, Serialize};

/// Interpolation method for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Piecewise linear (bilinear on lattices, barycentric on triangles).
    #[default]
    Linear,
    /// Smooth (Catmull-Rom on lattices, natural neighbour on triangles).
    Cubic,
}

impl InterpolationMethod {
    /// Parse from string (case-insensitive). Unknown names fall back to linear.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cubic" | "bicubic" => Self::Cubic,
            _ => Self::Linear,
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Cubic => write!(f, "cubic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_method_from_str() {
        assert_eq!(InterpolationMethod::from_str("linear"), InterpolationMethod::Linear);
        assert_eq!(InterpolationMethod::from_str("BILINEAR"), InterpolationMethod::Linear);
        assert_eq!(InterpolationMethod::from_str("cubic"), InterpolationMethod::Cubic);
        assert_eq!(InterpolationMethod::from_str("Bicubic"), InterpolationMethod::Cubic);
        assert_eq!(InterpolationMethod::from_str("invalid"), InterpolationMethod::Linear);
    }

    #[test]
    fn test_interpolation_method_display_round_trips() {
        for method in [InterpolationMethod::Linear, InterpolationMethod::Cubic] {
            assert_eq!(InterpolationMethod::from_str(&method.to_string()), method);
        }
    }

    #[test]
    fn test_interpolation_method_serde() {
        let json = serde_json::to_string(&InterpolationMethod::Cubic).unwrap();
        assert_eq!(json, "\"cubic\"");
    }
}
