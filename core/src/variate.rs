use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::{ConfigError, ConfigResult};

/// Seeded stream of exponential(rate) variates.
///
/// Samples by inverse transform over a uniform [0, 1) stream:
/// `-ln(1 - U) / rate`. The underlying ChaCha8 generator is portable, so a
/// given seed yields the same sequence on every platform.
#[derive(Debug, Clone)]
pub struct ExpVariate {
    rng: ChaCha8Rng,
    rate: f64,
}

impl ExpVariate {
    pub fn new(seed: u64, rate: f64) -> ConfigResult<Self> {
        check_rate(rate)?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            rate,
        })
    }

    pub fn sample(&mut self) -> f64 {
        let u: f64 = self.rng.gen();
        -(1.0 - u).ln() / self.rate
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Iterator for ExpVariate {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.sample())
    }
}

pub fn check_rate(rate: f64) -> ConfigResult<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { rate })
    }
}
