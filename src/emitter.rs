//! Particle emitters for user-aimed spark streams.
//!
//! An emitter has no body of its own: it sits at a fixed point and emits
//! one [`ParticleKind::Spark`] every tick along its base angle, give or take
//! a random spread, at a speed drawn from a configurable range.
//!
//! Emitters are usually created from a drag gesture, see
//! [`Emitter::aimed`] and [`Input`](crate::input::Input):
//!
//! ```ignore
//! // Drag from the bottom of the screen towards the top-right.
//! let emitter = Emitter::aimed(DVec2::new(400.0, 550.0), DVec2::new(450.0, 450.0));
//! sim.launch(emitter);
//! ```

use crate::lifecycle::Lifecycle;
use crate::particle::{Particle, ParticleKind};
use crate::spawn::SpawnContext;
use crate::visuals::{firework_colors, Drawable, ParticleShape, WHITE};
use glam::{DVec2, Vec4};

/// Side length of the marker drawn at an emitter's origin.
pub const MARKER_SIZE: f64 = 5.0;

/// Default half-width of the emission cone, in degrees.
pub const DEFAULT_SPREAD: f64 = 30.0;

/// Continuous source of sparks.
///
/// # Example
///
/// ```ignore
/// Emitter::new(DVec2::new(400.0, 580.0), -90.0)
///     .spread(15.0)
///     .speed(200.0..=400.0)
///     .size(1.0..=3.0)
/// ```
#[derive(Clone, Debug)]
pub struct Emitter {
    /// Where sparks appear.
    pub position: DVec2,
    /// Base heading in degrees.
    pub angle: f64,
    /// Half-width of the cone around `angle`, in degrees.
    pub spread: f64,
    /// Slowest spark, px/s.
    pub speed_min: f64,
    /// Fastest spark, px/s.
    pub speed_max: f64,
    /// Smallest spark.
    pub size_min: f64,
    /// Largest spark.
    pub size_max: f64,
    /// Colours sparks are picked from; white when empty.
    pub palette: Vec<Vec4>,
    /// Behaviour of emitted sparks.
    pub lifecycle: Lifecycle,
}

impl Emitter {
    /// Emitter at `position` pointing along `angle` degrees, with
    /// 100-500 px/s sparks of size 1-5 in the firework palette.
    pub fn new(position: DVec2, angle: f64) -> Self {
        Self {
            position,
            angle,
            spread: DEFAULT_SPREAD,
            speed_min: 100.0,
            speed_max: 500.0,
            size_min: 1.0,
            size_max: 5.0,
            palette: firework_colors(),
            lifecycle: Lifecycle::spark(),
        }
    }

    /// Emitter aimed by a drag from `start` to `end`.
    ///
    /// Sparks fly along the drag direction. The longer the drag, the faster
    /// they go: the top speed is ten times the whole-pixel drag length and
    /// the slowest is a fifth of that.
    pub fn aimed(start: DVec2, end: DVec2) -> Self {
        let delta = end - start;
        let max_speed = delta.length().floor() * 10.0;
        let angle = delta.y.atan2(delta.x).to_degrees();

        Self::new(start, angle).speed((max_speed / 5.0).floor()..=max_speed)
    }

    pub fn spread(mut self, degrees: f64) -> Self {
        self.spread = degrees.abs();
        self
    }

    pub fn speed(mut self, range: std::ops::RangeInclusive<f64>) -> Self {
        self.speed_min = *range.start();
        self.speed_max = *range.end();
        self
    }

    pub fn size(mut self, range: std::ops::RangeInclusive<f64>) -> Self {
        self.size_min = *range.start();
        self.size_max = *range.end();
        self
    }

    pub fn palette(mut self, colors: Vec<Vec4>) -> Self {
        self.palette = colors;
        self
    }

    pub fn lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Emit this tick's spark into `out`. Nothing happens when `dt == 0`.
    pub fn emit(&self, dt: f64, ctx: &mut SpawnContext, out: &mut Vec<Particle>) {
        if dt == 0.0 {
            return;
        }

        let speed = ctx.random_range(self.speed_min, self.speed_max);
        let size = ctx.random_range(self.size_min, self.size_max);
        let angle = self.angle + ctx.random_range(-self.spread, self.spread);
        let color = ctx.choose(&self.palette).copied().unwrap_or(WHITE);

        out.push(
            Particle::from_polar(
                ParticleKind::Spark,
                self.position,
                speed,
                angle,
                size,
                self.lifecycle.clone(),
            )
            .with_color(color),
        );
    }

    /// Marker for the emitter's origin.
    pub fn drawable(&self) -> Drawable {
        Drawable {
            position: self.position.as_vec2().to_array(),
            size: MARKER_SIZE as f32,
            brightness: 1.0,
            color: WHITE.to_array(),
            shape: ParticleShape::Marker as u32,
            revision: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Bounds;

    #[test]
    fn test_aimed_from_drag() {
        let e = Emitter::aimed(DVec2::new(100.0, 100.0), DVec2::new(100.0, 50.0));
        assert!((e.angle - -90.0).abs() < 1e-9);
        assert_eq!(e.speed_max, 500.0);
        assert_eq!(e.speed_min, 100.0);
        assert_eq!(e.position, DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_emit_one_per_tick() {
        let mut ctx = SpawnContext::seeded(Bounds::default(), 4);
        let e = Emitter::new(DVec2::new(400.0, 500.0), -90.0);
        let mut out = Vec::new();

        e.emit(0.0, &mut ctx, &mut out);
        assert!(out.is_empty());

        for _ in 0..10 {
            e.emit(1.0 / 60.0, &mut ctx, &mut out);
        }
        assert_eq!(out.len(), 10);

        for spark in &out {
            assert_eq!(spark.kind(), ParticleKind::Spark);
            assert_eq!(spark.position(), e.position);
            let offset = spark.body().angle() - e.angle;
            assert!(offset.abs() <= DEFAULT_SPREAD + 1e-9);
            let speed = spark.body().speed();
            assert!(speed >= 100.0 - 1e-9 && speed <= 500.0 + 1e-9);
            assert!(spark.size() >= 1.0 && spark.size() <= 5.0);
        }
    }

    #[test]
    fn test_empty_palette_emits_white() {
        let mut ctx = SpawnContext::seeded(Bounds::default(), 4);
        let e = Emitter::new(DVec2::ZERO, 0.0).palette(Vec::new());
        let mut out = Vec::new();
        e.emit(0.1, &mut ctx, &mut out);
        assert_eq!(out[0].color(), WHITE);
    }
}
