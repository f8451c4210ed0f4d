//! Seedable random source shared by every generator of a system

use glam::Vec4;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct ParticleRng {
    inner: SmallRng,
}

impl ParticleRng {
    /// Deterministic stream for a given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Returns a float in the closed range [min, max].
    ///
    /// Reversed bounds are swapped; equal bounds return `min`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if min == max {
            return min;
        }
        let (lo, hi) = if min < max { (min, max) } else { (max, min) };
        self.inner.random_range(lo..=hi)
    }

    /// `f64` variant of [`ParticleRng::range`] for angle sampling
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        if min == max {
            return min;
        }
        let (lo, hi) = if min < max { (min, max) } else { (max, min) };
        self.inner.random_range(lo..=hi)
    }

    /// Draws each channel independently between the matching channels of `min` and `max`
    pub fn range_vec4(&mut self, min: Vec4, max: Vec4) -> Vec4 {
        Vec4::new(
            self.range(min.x, max.x),
            self.range(min.y, max.y),
            self.range(min.z, max.z),
            self.range(min.w, max.w),
        )
    }
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
