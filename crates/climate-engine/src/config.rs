//! Configuration for the climate engine.

use serde::{Deserialize, Serialize};

/// Request defaults and limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Lattice step in degrees for grid, heatmap and series requests.
    pub default_resolution: u32,

    /// Raster width when a request does not name one.
    pub default_width: usize,

    /// Raster height when a request does not name one.
    pub default_height: usize,

    /// Lattice step in degrees for wind field requests.
    pub wind_resolution: u32,

    /// Particle count echoed to animation clients.
    pub wind_particles: u32,

    /// Noise seed. `None` draws fresh noise on every request.
    pub seed: Option<u64>,

    /// Fan work out across the rayon pool.
    pub parallel: bool,

    /// Largest raster width a request may ask for.
    pub max_width: usize,

    /// Largest raster height a request may ask for.
    pub max_height: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_resolution: 5,
            default_width: 1024,
            default_height: 512,
            wind_resolution: 10,
            wind_particles: 1000,
            seed: None,
            parallel: true,
            max_width: 4096,
            max_height: 2048,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CLIMATE_DEFAULT_RESOLUTION") {
            if let Ok(res) = val.parse() {
                config.default_resolution = res;
            }
        }

        if let Ok(val) = std::env::var("CLIMATE_DEFAULT_WIDTH") {
            if let Ok(width) = val.parse() {
                config.default_width = width;
            }
        }

        if let Ok(val) = std::env::var("CLIMATE_DEFAULT_HEIGHT") {
            if let Ok(height) = val.parse() {
                config.default_height = height;
            }
        }

        if let Ok(val) = std::env::var("CLIMATE_WIND_RESOLUTION") {
            if let Ok(res) = val.parse() {
                config.wind_resolution = res;
            }
        }

        if let Ok(val) = std::env::var("CLIMATE_WIND_PARTICLES") {
            if let Ok(count) = val.parse() {
                config.wind_particles = count;
            }
        }

        if let Ok(val) = std::env::var("CLIMATE_SEED") {
            config.seed = val.parse().ok();
        }

        if let Ok(val) = std::env::var("CLIMATE_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("CLIMATE_MAX_WIDTH") {
            if let Ok(width) = val.parse() {
                config.max_width = width;
            }
        }

        if let Ok(val) = std::env::var("CLIMATE_MAX_HEIGHT") {
            if let Ok(height) = val.parse() {
                config.max_height = height;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_resolution == 0 {
            return Err("default_resolution must be > 0".to_string());
        }

        if self.wind_resolution == 0 {
            return Err("wind_resolution must be > 0".to_string());
        }

        if self.max_width == 0 || self.max_height == 0 {
            return Err("max_width and max_height must be > 0".to_string());
        }

        if self.default_width == 0 || self.default_width > self.max_width {
            return Err(format!("default_width must be 1-{}", self.max_width));
        }

        if self.default_height == 0 || self.default_height > self.max_height {
            return Err(format!("default_height must be 1-{}", self.max_height));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_resolution, 5);
        assert_eq!((config.default_width, config.default_height), (1024, 512));
        assert_eq!(config.wind_resolution, 10);
    }

    #[test]
    fn test_validate_rejects_zero_resolution() {
        let config = EngineConfig {
            default_resolution: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_default_over_limit() {
        let config = EngineConfig {
            default_width: 8192,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("default_width"));
    }
}
