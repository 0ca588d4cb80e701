//! Random sources for entity construction
//!
//! Every stochastic parameter (cone direction, speed, apex jitter, palette
//! pick) is drawn once at construction through a [`RandomSource`], so tests can
//! inject a deterministic one.

use utsav_core::Vec3;

/// Source of uniform floats in [0, 1)
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform index in [0, len); `len` must be non-zero
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Pick one element, or `None` for an empty slice
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        items.get(i)
    }

    /// Returns a unit direction within `max_polar` radians of +Y.
    ///
    /// The polar angle is sampled so directions are uniform over the spherical
    /// cap; `max_polar >= PI` covers the whole sphere.
    fn cone_up(&mut self, max_polar: f32) -> Vec3 {
        if max_polar <= 0.0 {
            return Vec3::UP;
        }
        let cos_max = max_polar.min(std::f32::consts::PI).cos();
        let cos_theta = self.range(cos_max, 1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let azimuth = self.range(0.0, std::f32::consts::TAU);
        Vec3::new(
            sin_theta * azimuth.cos(),
            cos_theta,
            sin_theta * azimuth.sin(),
        )
    }
}

/// Lightweight xorshift32 PRNG
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the system clock, for interactive sessions
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for ParticleRng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits keep the result strictly below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Replays a fixed list of values, cycling when exhausted
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 0.999_999)
    }
}

/// Wall-clock derived seed for unseeded sessions
pub fn entropy_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(0xDEAD_BEEF)
}
