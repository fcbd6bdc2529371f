//! Particle lifecycle configuration.
//!
//! A [`Lifecycle`] bundles everything that makes one particle variant behave
//! differently from another: how it decays, whether it sheds a trail,
//! whether it bursts on death, gravity, and what happens at the screen edge.
//!
//! # State machine
//!
//! ```text
//! Spawning ──first update──▶ Alive ──destroy()──▶ Bursting ──▶ Dead
//! ```
//!
//! `Bursting` only exists while the burst children are being created;
//! a particle leaves `Alive` exactly once, so a second destruction request
//! in the same tick is ignored and cannot fire the burst twice.
//!
//! # Presets
//!
//! ```ignore
//! Lifecycle::falling_star()   // trail + burst, erodes as it sheds debris
//! Lifecycle::drifting_star()  // no decay, culled once off-screen
//! Lifecycle::debris()         // shrinks and slows at 3 px/s
//! Lifecycle::spark()          // debris with gravity
//! ```

use crate::decay::Decay;
use crate::emission::{Burst, Trail};
use serde::{Deserialize, Serialize};

/// Downward acceleration applied to firework sparks, px/s².
///
/// 9.81 m/s² at 75 px per metre.
pub const SPARK_GRAVITY: f64 = 9.81 * 75.0;

/// Size and speed lost per second by debris and sparks.
pub const DEBRIS_DECAY_RATE: f64 = 3.0;

/// Where a particle is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    /// Created, not yet updated.
    #[default]
    Spawning,
    /// Being simulated.
    Alive,
    /// Destruction in progress; burst children are being created.
    Bursting,
    /// Finished. Removed from the registry at the end of the pass.
    Dead,
}

/// Why a particle died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Size dropped below the minimum.
    Shrunk,
    /// Left the screen (culling variants only).
    OffScreen,
    /// Merged into a larger particle by a collision.
    Absorbed,
}

/// What happens when a particle reaches the screen edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Elastic, axis-aligned bounce.
    #[default]
    Reflect,
    /// Destroy once the centre is more than half the size past the edge.
    Cull,
    /// Keep going.
    Ignore,
}

/// Per-variant behaviour of a particle.
///
/// # Example
///
/// ```ignore
/// Lifecycle::new()
///     .decay(Decay::Linear { rate: 3.0 })
///     .gravity(SPARK_GRAVITY)
///     .boundary(Boundary::Reflect)
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lifecycle {
    /// How size shrinks over time.
    pub decay: Decay,
    /// Continuous emission while alive.
    pub trail: Trail,
    /// Emission on destruction.
    pub burst: Burst,
    /// Downward acceleration in px/s² (0 disables).
    pub gravity: f64,
    /// Edge behaviour.
    pub boundary: Boundary,
    /// Re-randomise brightness every tick.
    pub twinkle: bool,
}

impl Lifecycle {
    /// A particle that just moves and bounces.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // PRESETS
    // =========================================================================

    /// Falling star: sheds about ten debris particles a second, losing a
    /// little size each time, and explodes into twenty when it finally
    /// shrinks away.
    pub fn falling_star() -> Self {
        Self {
            decay: Decay::Erosion { step: 0.01 },
            trail: Trail::new(10.0),
            burst: Burst::new(20),
            ..Default::default()
        }
    }

    /// Star-field star: never decays, removed when it drifts off-screen.
    pub fn drifting_star() -> Self {
        Self {
            boundary: Boundary::Cull,
            ..Default::default()
        }
    }

    /// Debris: shrinks and slows at [`DEBRIS_DECAY_RATE`], bounces off walls.
    pub fn debris() -> Self {
        Self {
            decay: Decay::Linear {
                rate: DEBRIS_DECAY_RATE,
            },
            ..Default::default()
        }
    }

    /// Firework spark: debris that also falls under [`SPARK_GRAVITY`].
    pub fn spark() -> Self {
        Self {
            gravity: SPARK_GRAVITY,
            ..Self::debris()
        }
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    pub fn decay(mut self, decay: Decay) -> Self {
        self.decay = decay;
        self
    }

    /// Set the trail rate in expected children per second.
    pub fn trail(mut self, rate: f64) -> Self {
        self.trail = Trail::new(rate);
        self
    }

    pub fn burst(mut self, burst: Burst) -> Self {
        self.burst = burst;
        self
    }

    pub fn gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn twinkle(mut self, twinkle: bool) -> Self {
        self.twinkle = twinkle;
        self
    }

    /// Strip every spawn behaviour. Burst and trail children get this so
    /// explosions cannot cascade.
    pub fn sterile(mut self) -> Self {
        self.trail = Trail::default();
        self.burst = Burst::default();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falling_star_preset() {
        let l = Lifecycle::falling_star();
        assert_eq!(l.trail.rate, 10.0);
        assert_eq!(l.burst.count, 20);
        assert_eq!(l.decay, Decay::Erosion { step: 0.01 });
        assert_eq!(l.boundary, Boundary::Reflect);
    }

    #[test]
    fn test_spark_is_debris_with_gravity() {
        let spark = Lifecycle::spark();
        let debris = Lifecycle::debris();
        assert_eq!(spark.decay, debris.decay);
        assert_eq!(spark.gravity, SPARK_GRAVITY);
        assert_eq!(debris.gravity, 0.0);
    }

    #[test]
    fn test_sterile_clears_spawning() {
        let l = Lifecycle::falling_star().sterile();
        assert_eq!(l.trail.rate, 0.0);
        assert_eq!(l.burst.count, 0);
        // Decay is untouched.
        assert!(l.decay.is_active());
    }

    #[test]
    fn test_builder_chain() {
        let l = Lifecycle::new()
            .decay(Decay::Linear { rate: 2.0 })
            .trail(4.0)
            .burst(Burst::new(3))
            .gravity(10.0)
            .boundary(Boundary::Cull)
            .twinkle(true);

        assert_eq!(l.trail.rate, 4.0);
        assert_eq!(l.burst.count, 3);
        assert_eq!(l.gravity, 10.0);
        assert_eq!(l.boundary, Boundary::Cull);
        assert!(l.twinkle);
    }

    #[test]
    fn test_lifecycle_from_json() {
        let l: Lifecycle =
            serde_json::from_str(r#"{"decay":{"kind":"linear","rate":3.0},"gravity":5.0}"#).unwrap();
        assert_eq!(l.decay, Decay::Linear { rate: 3.0 });
        assert_eq!(l.gravity, 5.0);
        assert_eq!(l.burst.count, 0);
    }
}
