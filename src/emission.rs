//! Spawn policies: shedding a trail while alive, bursting on death.
//!
//! Both policies create [`ParticleKind::Debris`] children carrying a
//! [`Lifecycle::debris`] that has been made [`sterile`](Lifecycle::sterile),
//! so children never trail or burst themselves.
//!
//! # Trail trial
//!
//! Each tick a living parent runs one Bernoulli trial with success
//! probability `1 - exp(-rate * dt)`, the chance that a Poisson process
//! with `rate` events per second fires at least once in `dt`. At most one
//! child is created per tick.

use crate::decay::MIN_SIZE;
use crate::lifecycle::Lifecycle;
use crate::particle::{Particle, ParticleKind};
use crate::spawn::SpawnContext;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Continuous emission while a particle is alive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trail {
    /// Expected children per second. 0 disables the trail.
    pub rate: f64,
}

impl Trail {
    pub fn new(rate: f64) -> Self {
        Self { rate: rate.max(0.0) }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.rate > 0.0
    }

    /// Chance that the trail fires during a tick of `dt` seconds.
    pub fn probability(&self, dt: f64) -> f64 {
        if !self.is_enabled() || dt <= 0.0 {
            return 0.0;
        }
        1.0 - (-self.rate * dt).exp()
    }

    /// Run this tick's trial.
    pub fn trial(&self, dt: f64, ctx: &mut SpawnContext) -> bool {
        ctx.chance(self.probability(dt))
    }

    /// Build one trail child for `parent`.
    ///
    /// The child heads backwards relative to the parent, with angular
    /// jitter of ±5° per unit of parent size, at roughly half the parent's
    /// speed and a third of its size. Returns `None` when the drawn size is
    /// below the minimum, since such a child would die before being seen.
    pub fn child(parent: &Particle, ctx: &mut SpawnContext) -> Option<Particle> {
        let jitter = parent.size().floor() * 5.0;
        let angle = parent.body().angle() + ctx.random_range(180.0 - jitter, 180.0 + jitter);
        let speed = (parent.body().speed() / 2.0 - 10.0 + ctx.random() * 20.0).max(0.0);
        let size = parent.size() / 3.0 - 1.0 + ctx.random() * 2.0;

        if size < MIN_SIZE {
            return None;
        }

        let lifecycle = Lifecycle::debris().twinkle(parent.lifecycle().twinkle).sterile();
        Some(
            Particle::from_polar(ParticleKind::Debris, parent.position(), speed, angle, size, lifecycle)
                .with_color(parent.color()),
        )
    }
}

/// Emission on destruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Burst {
    /// Children created when the parent dies. 0 disables the burst.
    pub count: u32,
    /// Slowest child speed, px/s.
    pub speed_min: f64,
    /// Fastest child speed, px/s.
    pub speed_max: f64,
}

impl Burst {
    /// Burst of `count` children at 100-200 px/s.
    pub fn new(count: u32) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Set the child speed range.
    pub fn speed(mut self, range: RangeInclusive<f64>) -> Self {
        self.speed_min = *range.start();
        self.speed_max = *range.end();
        self
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.count > 0
    }

    /// Child size for a parent that was created at `original_size`:
    /// uniform in `[1, original_size / 3]`, or exactly 1 for parents
    /// smaller than 3.
    pub fn child_size(original_size: f64, ctx: &mut SpawnContext) -> f64 {
        if original_size < 3.0 {
            MIN_SIZE
        } else {
            ctx.random_range(MIN_SIZE, original_size / 3.0)
        }
    }

    /// Push exactly `count` children into `out`, spread in every direction
    /// from the parent's last position.
    pub fn spawn(&self, parent: &Particle, ctx: &mut SpawnContext, out: &mut Vec<Particle>) {
        out.reserve(self.count as usize);
        for _ in 0..self.count {
            let angle = ctx.random_angle();
            let size = Self::child_size(parent.original_size(), ctx);
            let speed = ctx.random_range(self.speed_min, self.speed_max);

            out.push(
                Particle::from_polar(
                    ParticleKind::Debris,
                    parent.position(),
                    speed,
                    angle,
                    size,
                    Lifecycle::debris().sterile(),
                )
                .with_color(parent.color()),
            );
        }
    }
}

impl Default for Burst {
    fn default() -> Self {
        Self {
            count: 0,
            speed_min: 100.0,
            speed_max: 200.0,
        }
    }
}
