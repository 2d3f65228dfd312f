//! Injectable stochastic perturbation for the climate model.
//!
//! Every sample point gets its own random stream, seeded from the global
//! seed and the point's `(lat, lon, hour)`. Streams share no state, so the
//! result of a grid does not depend on evaluation order or thread count.

use climate_common::SamplePoint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, Normal};

/// Salt separating the model's noise streams from other per-point streams.
pub const MODEL_SALT: u64 = 0x6d6f_6465_6c5f_6e7a;

/// A stream of random perturbations for a single point.
pub trait Perturbation {
    /// Zero-mean normal draw.
    fn gaussian(&mut self, std_dev: f64) -> f64;

    /// Exponential draw with the given mean.
    fn exponential(&mut self, mean: f64) -> f64;

    /// Uniform draw in `[0, 1)`.
    fn unit_uniform(&mut self) -> f64;
}

/// Factory of per-point perturbation streams.
pub trait NoiseSource: Send + Sync {
    type Stream: Perturbation;

    fn stream(&self, point: SamplePoint, hour: Option<u32>) -> Self::Stream;
}

/// Reproducible noise keyed by a global seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededNoise {
    seed: u64,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl NoiseSource for SeededNoise {
    type Stream = SeededStream;

    fn stream(&self, point: SamplePoint, hour: Option<u32>) -> SeededStream {
        SeededStream {
            rng: point_rng(self.seed, point, hour, MODEL_SALT),
        }
    }
}

/// Unseeded noise: every stream starts from fresh entropy, so no two
/// requests share perturbations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntropyNoise;

impl NoiseSource for EntropyNoise {
    type Stream = SeededStream;

    fn stream(&self, _point: SamplePoint, _hour: Option<u32>) -> SeededStream {
        SeededStream {
            rng: ChaCha8Rng::seed_from_u64(rand::random()),
        }
    }
}

/// ChaCha8-backed perturbation stream.
#[derive(Debug, Clone)]
pub struct SeededStream {
    rng: ChaCha8Rng,
}

impl Perturbation for SeededStream {
    fn gaussian(&mut self, std_dev: f64) -> f64 {
        if std_dev <= 0.0 {
            return 0.0;
        }
        match Normal::new(0.0, std_dev) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => 0.0,
        }
    }

    fn exponential(&mut self, mean: f64) -> f64 {
        if mean <= 0.0 {
            return 0.0;
        }
        match Exp::new(1.0 / mean) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => 0.0,
        }
    }

    fn unit_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Noise forced to zero. Every draw is 0, which leaves only the closed-form
/// terms of the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    type Stream = ZeroNoise;

    fn stream(&self, _point: SamplePoint, _hour: Option<u32>) -> ZeroNoise {
        ZeroNoise
    }
}

impl Perturbation for ZeroNoise {
    fn gaussian(&mut self, _std_dev: f64) -> f64 {
        0.0
    }

    fn exponential(&mut self, _mean: f64) -> f64 {
        0.0
    }

    fn unit_uniform(&mut self) -> f64 {
        0.0
    }
}

/// Build the random generator for one point.
pub fn point_rng(seed: u64, point: SamplePoint, hour: Option<u32>, salt: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(point_seed(seed, point, hour, salt))
}

/// Derive a per-point seed from the global seed, the point and the hour.
///
/// `-0.0` and `0.0` hash identically.
pub fn point_seed(seed: u64, point: SamplePoint, hour: Option<u32>, salt: u64) -> u64 {
    let lat_bits = (point.latitude + 0.0).to_bits();
    let lon_bits = (point.longitude + 0.0).to_bits();
    let hour_bits = hour.map_or(u64::MAX, u64::from);

    let mut h = splitmix64(seed ^ salt);
    h = splitmix64(h ^ lat_bits);
    h = splitmix64(h ^ lon_bits);
    splitmix64(h ^ hour_bits)
}

#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
