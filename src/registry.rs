//! Population registry: every live particle, grouped by category.
//!
//! The registry exclusively owns its particles. Nothing outside holds a
//! reference across frames; renderers read [`Drawable`] snapshots and
//! diagnostics read counts.
//!
//! # Update pass
//!
//! [`Registry::update`] walks every category in name order and updates each
//! particle. Children created along the way (trail debris, burst debris) are
//! queued and filed under their kind's category once the walk is over, so
//! they are first simulated on the next frame. Dead particles are dropped
//! at the end of the same pass that killed them.

use crate::collision::{self, CollisionReport};
use crate::particle::Particle;
use crate::spawn::SpawnContext;
use crate::visuals::Drawable;
use std::collections::BTreeMap;
use tracing::debug;

/// What an update pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Children created by trails and bursts.
    pub spawned: usize,
    /// Particles removed.
    pub destroyed: usize,
}

/// Category name → particles, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    categories: BTreeMap<String, Vec<Particle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a particle to `category`, creating the category if needed.
    pub fn insert(&mut self, category: &str, particle: Particle) {
        match self.categories.get_mut(category) {
            Some(particles) => particles.push(particle),
            None => {
                self.categories.insert(category.to_owned(), vec![particle]);
            }
        }
    }

    /// Add a particle under its kind's default category.
    pub fn insert_by_kind(&mut self, particle: Particle) {
        let category = particle.kind().category();
        self.insert(category, particle);
    }

    /// Particles in `category`; empty if it doesn't exist.
    pub fn category(&self, category: &str) -> &[Particle] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Category names, sorted.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Every particle, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.categories.values().flatten()
    }

    pub fn len(&self, category: &str) -> usize {
        self.category(category).len()
    }

    pub fn total_len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Population per category.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.categories
            .iter()
            .map(|(name, particles)| (name.clone(), particles.len()))
            .collect()
    }

    /// Σ size² over `category`.
    pub fn total_mass(&self, category: &str) -> f64 {
        self.category(category).iter().map(Particle::mass).sum()
    }

    /// Renderer snapshots of every particle.
    pub fn drawables(&self) -> impl Iterator<Item = Drawable> + '_ {
        self.iter().map(Particle::drawable)
    }

    /// Advance every particle by `dt`, file new children and drop the dead.
    pub fn update(&mut self, dt: f64, ctx: &mut SpawnContext) -> UpdateReport {
        if dt == 0.0 {
            return UpdateReport::default();
        }

        let mut pending = Vec::new();
        for particles in self.categories.values_mut() {
            for particle in particles.iter_mut() {
                particle.update(dt, ctx, &mut pending);
            }
        }

        let destroyed = self.remove_dead();
        let spawned = pending.len();
        for child in pending {
            self.insert_by_kind(child);
        }

        if destroyed > 0 || spawned > 0 {
            debug!(spawned, destroyed, "registry update");
        }

        UpdateReport { spawned, destroyed }
    }

    /// Drop every dead particle. Returns how many were removed.
    pub fn remove_dead(&mut self) -> usize {
        let mut removed = 0;
        for particles in self.categories.values_mut() {
            let before = particles.len();
            particles.retain(Particle::is_alive);
            removed += before - particles.len();
        }
        removed
    }

    /// Run a collision pass over `category`, then drop absorbed particles.
    pub fn resolve_collisions(&mut self, category: &str) -> CollisionReport {
        let Some(particles) = self.categories.get_mut(category) else {
            return CollisionReport::default();
        };

        let report = collision::resolve(particles);
        if report.merges > 0 {
            particles.retain(Particle::is_alive);
            debug!(category, merges = report.merges, "merged particles");
        }
        report
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.categories.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Bounds;
    use crate::emission::Burst;
    use crate::lifecycle::Lifecycle;
    use crate::particle::{category, ParticleKind};
    use glam::DVec2;

    fn still(size: f64) -> Particle {
        Particle::from_polar(ParticleKind::Star, DVec2::new(400.0, 300.0), 0.0, 0.0, size, Lifecycle::new())
    }

    #[test]
    fn test_total_mass() {
        let mut registry = Registry::new();
        for size in [3.0, 4.0, 5.0] {
            registry.insert(category::STARS, still(size));
        }
        assert_eq!(registry.total_mass(category::STARS), 50.0);
        assert_eq!(registry.total_mass("missing"), 0.0);
    }

    #[test]
    fn test_counts_and_lengths() {
        let mut registry = Registry::new();
        registry.insert("a", still(2.0));
        registry.insert("a", still(2.0));
        registry.insert("b", still(2.0));

        assert_eq!(registry.len("a"), 2);
        assert_eq!(registry.total_len(), 3);
        assert_eq!(registry.counts().get("b"), Some(&1));
        assert_eq!(registry.category_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.drawables().count(), 3);
    }

    #[test]
    fn test_update_zero_dt_is_noop() {
        let mut ctx = SpawnContext::seeded(Bounds::default(), 1);
        let mut registry = Registry::new();
        registry.insert(category::STARS, still(0.5));

        assert_eq!(registry.update(0.0, &mut ctx), UpdateReport::default());
        assert_eq!(registry.total_len(), 1);
    }

    #[test]
    fn test_burst_children_filed_as_debris() {
        let mut ctx = SpawnContext::seeded(Bounds::default(), 2);
        let mut registry = Registry::new();
        let doomed = Particle::from_polar(
            ParticleKind::Star,
            DVec2::new(400.0, 300.0),
            0.0,
            0.0,
            1.01,
            Lifecycle::new().decay(crate::decay::Decay::Linear { rate: 1.0 }).burst(Burst::new(6)),
        );
        registry.insert(category::STARS, doomed);

        let report = registry.update(0.1, &mut ctx);

        assert_eq!(report, UpdateReport { spawned: 6, destroyed: 1 });
        assert_eq!(registry.len(category::STARS), 0);
        assert_eq!(registry.len(category::DEBRIS), 6);
        assert!(registry.category(category::DEBRIS).iter().all(|p| p.burst_count() == 0));
    }

    #[test]
    fn test_resolve_collisions_removes_absorbed() {
        let mut registry = Registry::new();
        registry.insert(
            category::STARS,
            Particle::from_polar(ParticleKind::Star, DVec2::new(100.0, 100.0), 10.0, 0.0, 6.0, Lifecycle::new()),
        );
        registry.insert(
            category::STARS,
            Particle::from_polar(ParticleKind::Star, DVec2::new(104.0, 100.0), 10.0, 180.0, 3.0, Lifecycle::new()),
        );

        let report = registry.resolve_collisions(category::STARS);
        assert_eq!(report.merges, 1);
        assert_eq!(registry.len(category::STARS), 1);
        assert!((registry.total_mass(category::STARS) - 45.0).abs() < 1e-9);
    }
}
