//! Kinematic bodies and the rectangles they live in.
//!
//! A [`Body`] carries a position, a velocity and a heading angle in degrees.
//! The velocity vector is the source of truth for motion; the heading is
//! kept alongside because spawn policies aim children relative to it, and
//! it is re-derived from the velocity whenever a wall reflection flips an
//! axis.
//!
//! Screen coordinates are used throughout: `x` grows to the right and `y`
//! grows downward, so a positive `vy` moves a body towards the bottom edge.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Top-left corner.
    pub min: DVec2,
    /// Bottom-right corner.
    pub max: DVec2,
}

impl Bounds {
    /// Rectangle from the origin to `(width, height)`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min: DVec2::ZERO,
            max: DVec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Whether `point` lies inside the rectangle grown by `margin` on every side.
    pub fn contains_with_margin(&self, point: DVec2, margin: f64) -> bool {
        point.x >= self.min.x - margin
            && point.x <= self.max.x + margin
            && point.y >= self.min.y - margin
            && point.y <= self.max.y + margin
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_size(800.0, 600.0)
    }
}

/// Heading in degrees of a velocity vector.
#[inline]
pub fn heading_degrees(velocity: DVec2) -> f64 {
    velocity.y.atan2(velocity.x).to_degrees()
}

/// Unit vector for a heading in degrees.
#[inline]
pub fn direction_from_degrees(angle: f64) -> DVec2 {
    let radians = angle.to_radians();
    DVec2::new(radians.cos(), radians.sin())
}

/// Point mass moving at constant velocity between updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Centre of the body.
    pub position: DVec2,
    velocity: DVec2,
    /// Heading in degrees.
    angle: f64,
    /// Set once a decaying body has run out of speed; it never moves again.
    stalled: bool,
}

impl Body {
    /// Create a body from a velocity vector. The heading is derived from it.
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Self {
            position,
            velocity,
            angle: heading_degrees(velocity),
            stalled: false,
        }
    }

    /// Create a body from speed and heading.
    pub fn from_polar(position: DVec2, speed: f64, angle_degrees: f64) -> Self {
        Self {
            position,
            velocity: direction_from_degrees(angle_degrees) * speed,
            angle: angle_degrees,
            stalled: false,
        }
    }

    /// A body that never moves.
    pub fn fixed(position: DVec2) -> Self {
        Self::from_polar(position, 0.0, 0.0)
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Heading in degrees.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    #[inline]
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Whether `advance` would change the position.
    #[inline]
    pub fn is_moving(&self) -> bool {
        !self.stalled && self.velocity != DVec2::ZERO
    }

    /// Point the body along `angle_degrees`, keeping its speed.
    pub fn set_angle(&mut self, angle_degrees: f64) {
        let speed = self.speed();
        self.angle = angle_degrees;
        self.velocity = direction_from_degrees(angle_degrees) * speed;
    }

    /// Change the speed, keeping the direction of travel.
    ///
    /// A zero velocity has no direction, so the stored heading is used.
    pub fn set_speed(&mut self, speed: f64) {
        let speed = speed.max(0.0);
        let direction = self
            .velocity
            .try_normalize()
            .unwrap_or_else(|| direction_from_degrees(self.angle));
        self.velocity = direction * speed;
    }

    /// Add `delta` to the velocity. Stalled bodies ignore it.
    pub fn accelerate(&mut self, delta: DVec2) {
        if !self.stalled {
            self.velocity += delta;
        }
    }

    /// Bring the body to a permanent halt.
    pub fn stall(&mut self) {
        self.velocity = DVec2::ZERO;
        self.stalled = true;
    }

    /// Move by `velocity * dt`. A zero `dt` is a no-op.
    pub fn advance(&mut self, dt: f64) {
        if dt == 0.0 || !self.is_moving() {
            return;
        }
        self.position += self.velocity * dt;
    }

    /// Bounce off the walls of `bounds`.
    ///
    /// Each axis is handled on its own: a component is negated when the
    /// `size`-wide box around the body has crossed that edge and the
    /// component still points outward. Returns `true` if anything flipped,
    /// in which case the heading has been recomputed from the new velocity.
    pub fn reflect_bounds(&mut self, bounds: &Bounds, size: f64) -> bool {
        if !self.is_moving() {
            return false;
        }

        let half = size * 0.5;
        let lo = self.position - DVec2::splat(half);
        let hi = self.position + DVec2::splat(half);
        let mut flipped = false;

        if (lo.x < bounds.min.x && self.velocity.x < 0.0)
            || (hi.x > bounds.max.x && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
            flipped = true;
        }

        if (lo.y < bounds.min.y && self.velocity.y < 0.0)
            || (hi.y > bounds.max.y && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
            flipped = true;
        }

        if flipped {
            self.angle = heading_degrees(self.velocity);
        }
        flipped
    }

    /// Whether the centre has left `bounds` by more than `margin`.
    pub fn outside(&self, bounds: &Bounds, margin: f64) -> bool {
        !bounds.contains_with_margin(self.position, margin)
    }

    /// Replace the velocity, re-deriving the heading.
    pub(crate) fn set_velocity(&mut self, velocity: DVec2) {
        if self.stalled {
            return;
        }
        self.velocity = velocity;
        if velocity != DVec2::ZERO {
            self.angle = heading_degrees(velocity);
        }
    }
}
