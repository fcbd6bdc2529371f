//! Particles: a kinematic body plus size, lifecycle and looks.
//!
//! # Update order
//!
//! One call to [`Particle::update`] with `dt > 0` does, in order:
//!
//! 1. trail trial, possibly pushing one child
//! 2. size decay (erosion only if the trail fired); death below size 1
//! 3. linear speed loss, stalling the body at zero
//! 4. gravity
//! 5. movement
//! 6. twinkle
//! 7. wall bounce or off-screen culling
//!
//! A particle that dies in step 2 stops there, so its burst fires from
//! the position it had at the start of the tick. `dt == 0` changes nothing.

use crate::body::Body;
use crate::decay::is_below_minimum;
use crate::emission::Trail;
use crate::lifecycle::{Boundary, DeathCause, LifeState, Lifecycle};
use crate::spawn::SpawnContext;
use crate::visuals::{Drawable, ParticleShape, TWINKLE_BRIGHTNESS, WHITE};
use glam::{DVec2, Vec4};
use serde::{Deserialize, Serialize};

/// Category names used by the built-in variants.
pub mod category {
    pub const STARS: &str = "stars";
    pub const DEBRIS: &str = "debris";
    pub const SPARKS: &str = "sparks";
}

/// Which kind of particle this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Star,
    Debris,
    Spark,
}

impl ParticleKind {
    /// Registry category children of this kind are filed under.
    pub fn category(&self) -> &'static str {
        match self {
            ParticleKind::Star => category::STARS,
            ParticleKind::Debris => category::DEBRIS,
            ParticleKind::Spark => category::SPARKS,
        }
    }

    pub fn default_shape(&self) -> ParticleShape {
        match self {
            ParticleKind::Star => ParticleShape::Star,
            ParticleKind::Debris | ParticleKind::Spark => ParticleShape::Square,
        }
    }
}

/// A simulated particle.
#[derive(Debug, Clone)]
pub struct Particle {
    kind: ParticleKind,
    body: Body,
    size: f64,
    original_size: f64,
    lifecycle: Lifecycle,
    shape: ParticleShape,
    color: Vec4,
    brightness: u8,
    state: LifeState,
    death: Option<DeathCause>,
    revision: u32,
}

impl Particle {
    pub fn new(kind: ParticleKind, body: Body, size: f64, lifecycle: Lifecycle) -> Self {
        Self {
            kind,
            body,
            size,
            original_size: size,
            lifecycle,
            shape: kind.default_shape(),
            color: WHITE,
            brightness: u8::MAX,
            state: LifeState::Spawning,
            death: None,
            revision: 0,
        }
    }

    /// Particle moving at `speed` px/s along `angle` degrees.
    pub fn from_polar(
        kind: ParticleKind,
        position: DVec2,
        speed: f64,
        angle: f64,
        size: f64,
        lifecycle: Lifecycle,
    ) -> Self {
        Self::new(kind, Body::from_polar(position, speed, angle), size, lifecycle)
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn with_shape(mut self, shape: ParticleShape) -> Self {
        self.shape = shape;
        self
    }

    // ========== Accessors ==========

    #[inline]
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.body.position
    }

    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Size at creation. Never changes.
    #[inline]
    pub fn original_size(&self) -> f64 {
        self.original_size
    }

    /// Mass proxy used for population bookkeeping: `size²`.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.size * self.size
    }

    #[inline]
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Expected trail children per second.
    #[inline]
    pub fn spawn_rate(&self) -> f64 {
        self.lifecycle.trail.rate
    }

    /// Children created on destruction.
    #[inline]
    pub fn burst_count(&self) -> u32 {
        self.lifecycle.burst.count
    }

    #[inline]
    pub fn color(&self) -> Vec4 {
        self.color
    }

    #[inline]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    #[inline]
    pub fn state(&self) -> LifeState {
        self.state
    }

    #[inline]
    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !matches!(self.state, LifeState::Bursting | LifeState::Dead)
    }

    /// Incremented each time `floor(size)` changes.
    #[inline]
    pub fn revision(&self) -> u32 {
        self.revision
    }

    // ========== Simulation ==========

    /// Advance this particle by `dt` seconds, pushing any children into `out`.
    pub fn update(&mut self, dt: f64, ctx: &mut SpawnContext, out: &mut Vec<Particle>) {
        if dt == 0.0 || !self.is_alive() {
            return;
        }
        if self.state == LifeState::Spawning {
            self.state = LifeState::Alive;
        }

        let emitted = self.lifecycle.trail.trial(dt, ctx);
        if emitted {
            if let Some(child) = Trail::child(self, ctx) {
                out.push(child);
            }
        }

        let mut size = self.size;
        self.lifecycle.decay.apply(&mut size, dt, emitted);
        self.set_size(size);
        if is_below_minimum(self.size) {
            self.destroy(DeathCause::Shrunk, ctx, out);
            return;
        }

        let loss = self.lifecycle.decay.speed_loss(dt);
        if loss > 0.0 && !self.body.is_stalled() {
            let speed = self.body.speed() - loss;
            if speed <= 0.0 {
                self.body.stall();
            } else {
                self.body.set_speed(speed);
            }
        }

        if self.lifecycle.gravity != 0.0 {
            self.body
                .accelerate(DVec2::new(0.0, self.lifecycle.gravity * dt));
        }

        self.body.advance(dt);

        if self.lifecycle.twinkle {
            let (lo, hi) = TWINKLE_BRIGHTNESS;
            self.brightness = ctx.random_brightness(lo, hi);
        }

        match self.lifecycle.boundary {
            Boundary::Reflect => {
                self.body.reflect_bounds(&ctx.bounds, self.size);
            }
            Boundary::Cull => {
                if self.body.outside(&ctx.bounds, self.size / 2.0) {
                    self.destroy(DeathCause::OffScreen, ctx, out);
                }
            }
            Boundary::Ignore => {}
        }
    }

    /// Destroy the particle, firing its burst into `out`.
    ///
    /// Returns `false` (and does nothing) if it was already destroyed.
    pub fn destroy(&mut self, cause: DeathCause, ctx: &mut SpawnContext, out: &mut Vec<Particle>) -> bool {
        if !self.is_alive() {
            return false;
        }

        self.state = LifeState::Bursting;
        if self.lifecycle.burst.is_enabled() {
            let burst = self.lifecycle.burst.clone();
            burst.spawn(self, ctx, out);
        }
        self.state = LifeState::Dead;
        self.death = Some(cause);
        true
    }

    /// Mark as merged into another particle. No burst fires: the mass has
    /// already been handed to the survivor.
    pub(crate) fn absorb(&mut self) {
        if self.is_alive() {
            self.state = LifeState::Dead;
            self.death = Some(DeathCause::Absorbed);
        }
    }

    pub(crate) fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Change the size, bumping the revision on integer crossings.
    pub(crate) fn set_size(&mut self, size: f64) {
        if size.floor() != self.size.floor() {
            self.revision = self.revision.wrapping_add(1);
        }
        self.size = size;
    }

    /// Renderer-facing snapshot.
    pub fn drawable(&self) -> Drawable {
        Drawable {
            position: self.body.position.as_vec2().to_array(),
            size: self.size as f32,
            brightness: self.brightness as f32 / 255.0,
            color: self.color.to_array(),
            shape: self.shape as u32,
            revision: self.revision,
        }
    }
}
