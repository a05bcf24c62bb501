//! Injectable random source for particle generation.

use motes_core::math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source used for font choice, palette choice, depth, initial
/// positions and chaos scatter.
///
/// Every fresh generation pass looks different in production
/// ([`ParticleRng::from_os_rng`]); tests pin a seed with
/// [`ParticleRng::from_seed`] to get identical geometry on every run.
#[derive(Debug, Clone)]
pub struct ParticleRng {
    inner: StdRng,
}

impl ParticleRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Uniform value in `0.0..1.0`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Uniform value in `0.0..max`.
    #[inline]
    pub fn up_to(&mut self, max: f32) -> f32 {
        self.unit() * max
    }

    /// Uniform value in `-extent/2..extent/2`.
    #[inline]
    pub fn centered(&mut self, extent: f32) -> f32 {
        (self.unit() - 0.5) * extent
    }

    /// Point in an axis-aligned cube of side `extent` centered at the origin.
    pub fn in_cube(&mut self, extent: f32) -> Vec3 {
        let x = self.centered(extent);
        let y = self.centered(extent);
        let z = self.centered(extent);
        Vec3::new(x, y, z)
    }

    /// Uniform index into a collection of `len` items, `None` when empty.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.random_range(0..len))
    }
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::from_os_rng()
    }
}
