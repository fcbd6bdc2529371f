//! Simulation builder and frame driver entry point

use crate::body::Bounds;
use crate::collision::CollisionReport;
use crate::config::{sized, Scenario, SimulationConfig};
use crate::emitter::Emitter;
use crate::error::ConfigError;
use crate::overlay::Diagnostics;
use crate::particle::{category, Particle};
use crate::registry::Registry;
use crate::spawn::SpawnContext;
use crate::spawner::{MassFloor, StarTemplate};
use crate::time::FrameStats;
use crate::visuals::Drawable;
use tracing::{debug, trace};

/// What one call to [`Simulation::update`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Stars created by mass floors, before and after the update pass.
    pub topped_up: usize,
    /// Trail and burst children.
    pub spawned: usize,
    /// Sparks created by emitters.
    pub emitted: usize,
    /// Particles removed, including ones absorbed by merges.
    pub destroyed: usize,
    pub collisions: CollisionReport,
}

/// A particle simulation.
///
/// Use method chaining to configure, then call [`update`](Self::update)
/// once per frame.
///
/// ```ignore
/// let mut sim = Simulation::new(Bounds::from_size(800.0, 600.0))
///     .with_mass_floor(MassFloor::new("stars", 2500.0, StarTemplate::hyperdrive()));
///
/// loop {
///     let dt = clock.tick();
///     sim.update(dt);
///     renderer.draw(sim.drawables());
/// }
/// ```
///
/// Each frame with `dt > 0` runs, in order:
///
/// 1. mass floors top up their categories
/// 2. every particle updates; children are filed after the pass
/// 3. dead particles are removed
/// 4. collisions, for categories that have them enabled
/// 5. emitters emit one spark each
/// 6. mass floors top up again
/// 7. frame statistics record `dt`
///
/// `update(0.0)` changes nothing at all.
#[derive(Debug)]
pub struct Simulation {
    registry: Registry,
    spawners: Vec<MassFloor>,
    emitters: Vec<Emitter>,
    collisions: Vec<String>,
    ctx: SpawnContext,
    stats: FrameStats,
}

impl Simulation {
    /// Empty simulation with an entropy-seeded RNG.
    pub fn new(bounds: Bounds) -> Self {
        Self::with_context(SpawnContext::new(bounds))
    }

    /// Empty simulation whose random draws are repeatable.
    pub fn seeded(bounds: Bounds, seed: u64) -> Self {
        Self::with_context(SpawnContext::seeded(bounds, seed))
    }

    fn with_context(ctx: SpawnContext) -> Self {
        Self {
            registry: Registry::new(),
            spawners: Vec::new(),
            emitters: Vec::new(),
            collisions: Vec::new(),
            ctx,
            stats: FrameStats::new(),
        }
    }

    /// Build the simulation a configuration describes.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ctx = SpawnContext::with_seed(config.bounds(), config.seed);
        let mut sim = Self::with_context(ctx);

        match &config.scenario {
            Scenario::FallingStars {
                initial_stars,
                mass_floor,
                star_size,
            } => {
                let template = sized(StarTemplate::falling_star(), *star_size);
                sim = sim.with_population(category::STARS, &template, *initial_stars);
                if let Some(floor) = mass_floor {
                    sim = sim.with_mass_floor(MassFloor::new(category::STARS, *floor, template));
                }
            }
            Scenario::Hyperdrive { mass_floor, star_size } => {
                let template = sized(StarTemplate::hyperdrive(), *star_size);
                sim = sim.with_mass_floor(MassFloor::new(category::STARS, *mass_floor, template));
            }
            Scenario::Firework { launches } => {
                for launch in launches {
                    sim = sim.with_emitter(Emitter::aimed(launch.from, launch.to));
                }
            }
        }

        if config.collisions {
            sim = sim.with_collisions(category::STARS);
        }

        debug!(
            scenario = config.scenario.name(),
            particles = sim.registry.total_len(),
            emitters = sim.emitters.len(),
            "simulation built"
        );
        Ok(sim)
    }

    // ========== Builder ==========

    /// Add a mass floor and top its category up straight away, so the floor
    /// already holds before the first frame.
    pub fn with_mass_floor(mut self, floor: MassFloor) -> Self {
        floor.ensure_minimum_mass(&mut self.registry, &mut self.ctx);
        self.spawners.push(floor);
        self
    }

    /// Seed `category` with `count` stars built from `template`.
    pub fn with_population(mut self, category: &str, template: &StarTemplate, count: usize) -> Self {
        for _ in 0..count {
            let star = template.spawn(&mut self.ctx);
            self.registry.insert(category, star);
        }
        self
    }

    pub fn with_emitter(mut self, emitter: Emitter) -> Self {
        self.launch(emitter);
        self
    }

    /// Resolve collisions among the particles of `category` every frame.
    pub fn with_collisions(mut self, category: &str) -> Self {
        if !self.collisions.iter().any(|c| c == category) {
            self.collisions.push(category.to_owned());
        }
        self
    }

    // ========== Runtime ==========

    /// Add an emitter while running, e.g. at the end of a drag gesture.
    pub fn launch(&mut self, emitter: Emitter) {
        debug!(
            x = emitter.position.x,
            y = emitter.position.y,
            angle = emitter.angle,
            "emitter launched"
        );
        self.emitters.push(emitter);
    }

    /// Remove every emitter.
    pub fn clear_emitters(&mut self) {
        self.emitters.clear();
    }

    /// Create one star from `template` with the simulation's own RNG, e.g.
    /// on a key press in the falling-stars scene.
    pub fn spawn_star(&mut self, category: &str, template: &StarTemplate) {
        let star = template.spawn(&mut self.ctx);
        debug!(category, size = star.size(), "star spawned");
        self.registry.insert(category, star);
    }

    /// Add a single particle to `category`.
    pub fn insert(&mut self, category: &str, particle: Particle) {
        self.registry.insert(category, particle);
    }

    /// Advance the whole simulation by `dt` seconds.
    pub fn update(&mut self, dt: f64) -> FrameReport {
        let mut report = FrameReport::default();
        if dt == 0.0 {
            return report;
        }

        report.topped_up += self.top_up();

        let pass = self.registry.update(dt, &mut self.ctx);
        report.spawned = pass.spawned;
        report.destroyed = pass.destroyed;

        for name in &self.collisions {
            let before = self.registry.len(name);
            let collisions = self.registry.resolve_collisions(name);
            report.destroyed += before - self.registry.len(name);
            report.collisions.collisions += collisions.collisions;
            report.collisions.merges += collisions.merges;
        }

        let mut sparks = Vec::with_capacity(self.emitters.len());
        for emitter in &self.emitters {
            emitter.emit(dt, &mut self.ctx, &mut sparks);
        }
        report.emitted = sparks.len();
        for spark in sparks {
            self.registry.insert(category::SPARKS, spark);
        }

        report.topped_up += self.top_up();
        self.stats.record(dt);

        trace!(
            frame = self.stats.frames(),
            dt,
            particles = self.registry.total_len(),
            ?report,
            "frame"
        );
        report
    }

    fn top_up(&mut self) -> usize {
        let Self {
            spawners,
            registry,
            ctx,
            ..
        } = self;
        spawners
            .iter()
            .map(|floor| floor.ensure_minimum_mass(registry, ctx))
            .sum()
    }

    // ========== Queries ==========

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn spawners(&self) -> &[MassFloor] {
        &self.spawners
    }

    pub fn bounds(&self) -> Bounds {
        self.ctx.bounds
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Snapshot of every particle plus a marker per emitter.
    pub fn drawables(&self) -> Vec<Drawable> {
        self.registry
            .drawables()
            .chain(self.emitters.iter().map(Emitter::drawable))
            .collect()
    }

    /// Counts and frame rates for the overlay. `all` counts particles and
    /// emitters together.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut counts = self.registry.counts();
        counts.insert("emitters".to_owned(), self.emitters.len());
        counts.insert("all".to_owned(), self.registry.total_len() + self.emitters.len());

        Diagnostics {
            frame: self.stats.frames(),
            fps_60: self.stats.fps_60(),
            fps_120: self.stats.fps_120(),
            fps_600: self.stats.fps_600(),
            counts,
        }
    }
}
