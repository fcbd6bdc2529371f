//! Spawners that keep a category populated.
//!
//! A [`MassFloor`] watches one registry category and, whenever its total
//! mass (Σ size²) has dropped below the floor, creates stars from a
//! [`StarTemplate`] until it is back above. The last star created can push
//! the total past the floor by at most its own mass.
//!
//! ```ignore
//! let mut floor = MassFloor::new("stars", 2500.0, StarTemplate::hyperdrive());
//! let created = floor.ensure_minimum_mass(&mut registry, &mut ctx);
//! ```

use crate::lifecycle::Lifecycle;
use crate::particle::{Particle, ParticleKind};
use crate::registry::Registry;
use crate::spawn::SpawnContext;
use crate::visuals::ParticleShape;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a new star's speed is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedRule {
    /// `factor * size`, so bigger stars look closer.
    Proportional { factor: f64 },
    /// Uniform in `[min, max]`.
    Uniform { min: f64, max: f64 },
}

/// How a new star's heading is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    /// Uniform in `[0, 360)`.
    #[default]
    Random,
    /// Away from the screen centre.
    Outward,
}

/// Recipe for the stars a spawner creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarTemplate {
    pub size_min: f64,
    pub size_max: f64,
    pub speed: SpeedRule,
    #[serde(default)]
    pub heading: Heading,
    #[serde(default)]
    pub lifecycle: Lifecycle,
    #[serde(default = "default_shape")]
    pub shape: ParticleShape,
}

fn default_shape() -> ParticleShape {
    ParticleShape::Star
}

impl StarTemplate {
    /// Sizes 5-20 at 100-200 px/s in any direction, trailing and bursting.
    pub fn falling_star() -> Self {
        Self {
            size_min: 5.0,
            size_max: 20.0,
            speed: SpeedRule::Uniform { min: 100.0, max: 200.0 },
            heading: Heading::Random,
            lifecycle: Lifecycle::falling_star(),
            shape: ParticleShape::Star,
        }
    }

    /// Sizes 1-7 flying away from the centre at `20 * size` px/s, culled
    /// once they leave the screen.
    pub fn hyperdrive() -> Self {
        Self {
            size_min: 1.0,
            size_max: 7.0,
            speed: SpeedRule::Proportional { factor: 20.0 },
            heading: Heading::Outward,
            lifecycle: Lifecycle::drifting_star(),
            shape: ParticleShape::Star,
        }
    }

    /// Build one star at a random spot inside the bounds.
    pub fn spawn(&self, ctx: &mut SpawnContext) -> Particle {
        let position = ctx.random_in_bounds();
        let size = ctx.random_range(self.size_min, self.size_max).max(1.0);
        let speed = match self.speed {
            SpeedRule::Proportional { factor } => factor * size,
            SpeedRule::Uniform { min, max } => ctx.random_range(min, max),
        };
        let angle = match self.heading {
            Heading::Random => ctx.random_angle(),
            Heading::Outward => ctx.outward_angle(position),
        };

        Particle::from_polar(ParticleKind::Star, position, speed, angle, size, self.lifecycle.clone())
            .with_shape(self.shape)
    }
}

/// Keeps `total_mass(category) >= floor`.
#[derive(Debug, Clone)]
pub struct MassFloor {
    category: String,
    floor: f64,
    template: StarTemplate,
}

impl MassFloor {
    /// Default floor used by the star-field scenario.
    pub const DEFAULT_FLOOR: f64 = 2500.0;

    /// A negative or non-finite floor is treated as 0.
    pub fn new(category: impl Into<String>, floor: f64, template: StarTemplate) -> Self {
        let floor = if floor.is_finite() { floor.max(0.0) } else { 0.0 };
        Self {
            category: category.into(),
            floor,
            template,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn template(&self) -> &StarTemplate {
        &self.template
    }

    /// Create stars until the category is back at or above the floor.
    /// Returns how many were created.
    pub fn ensure_minimum_mass(&self, registry: &mut Registry, ctx: &mut SpawnContext) -> usize {
        let mut mass = registry.total_mass(&self.category);
        let mut created = 0;

        while mass < self.floor {
            let star = self.template.spawn(ctx);
            mass += star.mass();
            registry.insert(&self.category, star);
            created += 1;
        }

        if created > 0 {
            debug!(category = %self.category, created, mass, "topped up mass floor");
        }
        created
    }
}
