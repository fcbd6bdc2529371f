//! Size decay policies.
//!
//! | Policy | Shrinks when | Used by |
//! |--------|--------------|---------|
//! | [`Decay::None`] | never | drifting star field |
//! | [`Decay::Linear`] | every tick, `rate * dt` | debris, firework sparks |
//! | [`Decay::Erosion`] | only on ticks where the trail emitted | falling stars |
//!
//! Linear decay also bleeds speed at the same rate; see
//! [`Decay::speed_loss`].

use serde::{Deserialize, Serialize};

/// Particles smaller than this are destroyed.
pub const MIN_SIZE: f64 = 1.0;

/// How a particle loses size over time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decay {
    /// Size never changes.
    #[default]
    None,
    /// Size and speed both drop by `rate` units per second.
    Linear { rate: f64 },
    /// Size drops by `step` each time the particle sheds a trail child.
    Erosion { step: f64 },
}

impl Decay {
    /// Shrink `size` for a tick of `dt` seconds and return how much was removed.
    ///
    /// `emitted` tells erosion whether the trail fired this tick.
    pub fn apply(&self, size: &mut f64, dt: f64, emitted: bool) -> f64 {
        let amount = match *self {
            Decay::None => 0.0,
            Decay::Linear { rate } => rate * dt,
            Decay::Erosion { step } if emitted => step,
            Decay::Erosion { .. } => 0.0,
        };
        *size -= amount;
        amount
    }

    /// Speed to remove this tick. Only linear decay slows a particle down.
    pub fn speed_loss(&self, dt: f64) -> f64 {
        match *self {
            Decay::Linear { rate } => rate * dt,
            _ => 0.0,
        }
    }

    /// Whether this policy ever changes size.
    pub fn is_active(&self) -> bool {
        match *self {
            Decay::None => false,
            Decay::Linear { rate } => rate > 0.0,
            Decay::Erosion { step } => step > 0.0,
        }
    }
}

/// Whether a particle of this size must be destroyed.
#[inline]
pub fn is_below_minimum(size: f64) -> bool {
    size < MIN_SIZE
}
