//! Spawn context: the random source and screen bounds handed to every
//! piece of code that creates particles.
//!
//! Nothing in the engine reaches for a global RNG. The [`Simulation`](crate::Simulation)
//! owns one `SpawnContext` and lends it to the registry, spawners and
//! emitters each frame, so seeding it makes a whole run repeatable:
//!
//! ```ignore
//! let mut ctx = SpawnContext::seeded(Bounds::from_size(800.0, 600.0), 7);
//! let angle = ctx.random_angle();
//! let spot = ctx.random_in_bounds();
//! ```

use crate::body::Bounds;
use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random helpers plus the screen rectangle new particles are placed in.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    /// Screen rectangle.
    pub bounds: Bounds,
    rng: SmallRng,
}

impl SpawnContext {
    /// Context seeded from OS entropy.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Context with a fixed seed. Two contexts with the same seed produce
    /// the same sequence.
    pub fn seeded(bounds: Bounds, seed: u64) -> Self {
        Self {
            bounds,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn with_seed(bounds: Bounds, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(bounds, seed),
            None => Self::new(bounds),
        }
    }

    // ========== Random primitives ==========

    /// Random f64 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Random f64 in `[min, max]`. Reversed bounds are swapped.
    pub fn random_range(&mut self, min: f64, max: f64) -> f64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }

    /// `true` with probability `p`. Out-of-range and NaN inputs are clamped
    /// (NaN counts as 0).
    pub fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            return false;
        }
        self.rng.gen_bool(p.min(1.0))
    }

    /// Pick one element of a non-empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..items.len());
        items.get(index)
    }

    // ========== Geometry helpers ==========

    /// Heading in `[0, 360)` degrees.
    pub fn random_angle(&mut self) -> f64 {
        self.rng.gen_range(0.0..360.0)
    }

    /// Random point inside the screen bounds.
    pub fn random_in_bounds(&mut self) -> DVec2 {
        let Bounds { min, max } = self.bounds;
        DVec2::new(
            self.random_range(min.x, max.x),
            self.random_range(min.y, max.y),
        )
    }

    /// Heading in degrees pointing from the screen centre towards `position`.
    pub fn outward_angle(&self, position: DVec2) -> f64 {
        let offset = position - self.bounds.center();
        offset.y.atan2(offset.x).to_degrees()
    }

    /// Brightness drawn from `[min, max]`.
    pub fn random_brightness(&mut self, min: u8, max: u8) -> u8 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }
}
