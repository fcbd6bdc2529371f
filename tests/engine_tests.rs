//! Integration tests for the frame-level behaviour of the engine.
//!
//! These drive a [`Simulation`] through its public API only, the way a
//! frontend would, and check the population and lifecycle guarantees.

use starfall::prelude::*;
use starfall::DeathCause;

const DT: f64 = 1.0 / 60.0;

fn screen() -> Bounds {
    Bounds::from_size(800.0, 600.0)
}

fn snapshot(sim: &Simulation) -> Vec<(DVec2, f64, DVec2)> {
    sim.registry()
        .iter()
        .map(|p| (p.position(), p.size(), p.body().velocity()))
        .collect()
}

// ============================================================================
// Mass floor
// ============================================================================

#[test]
fn test_mass_floor_holds_every_frame() {
    let mut sim = Simulation::seeded(screen(), 10)
        .with_mass_floor(MassFloor::new(category::STARS, 2500.0, StarTemplate::hyperdrive()));

    for _ in 0..600 {
        sim.update(DT);
        assert!(sim.registry().total_mass(category::STARS) >= 2500.0);
    }
}

#[test]
fn test_hyperdrive_overshoot_bounded() {
    let mut sim = Simulation::seeded(screen(), 11)
        .with_mass_floor(MassFloor::new(category::STARS, 2500.0, StarTemplate::hyperdrive()));

    // Largest star is size 7.
    let bound = 2500.0 + 49.0;
    assert!(sim.registry().total_mass(category::STARS) < bound);

    let mut topped_up = 0;
    for _ in 0..600 {
        topped_up += sim.update(DT).topped_up;
        assert!(sim.registry().total_mass(category::STARS) < bound);
    }
    // Stars fly off-screen and get replaced.
    assert!(topped_up > 0);
}

#[test]
fn test_total_mass_of_sizes() {
    let mut registry = Registry::new();
    for size in [3.0, 4.0, 5.0] {
        registry.insert(
            category::STARS,
            Particle::from_polar(ParticleKind::Star, DVec2::new(50.0, 50.0), 0.0, 0.0, size, Lifecycle::new()),
        );
    }
    assert_eq!(registry.total_mass(category::STARS), 50.0);
}

// ============================================================================
// Zero dt
// ============================================================================

#[test]
fn test_zero_dt_changes_nothing() {
    let mut sim = Simulation::seeded(screen(), 12)
        .with_population(category::STARS, &StarTemplate::falling_star(), 5)
        .with_mass_floor(MassFloor::new("field", 500.0, StarTemplate::hyperdrive()))
        .with_emitter(Emitter::new(DVec2::new(400.0, 580.0), -90.0));

    // Let children appear so every kind is present.
    for _ in 0..30 {
        sim.update(DT);
    }

    let before = snapshot(&sim);
    let counts = sim.registry().counts();

    let report = sim.update(0.0);

    assert_eq!(report, FrameReport::default());
    assert_eq!(snapshot(&sim), before);
    assert_eq!(sim.registry().counts(), counts);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_reflection_at_left_edge() {
    let mut sim = Simulation::seeded(screen(), 13);
    sim.insert(
        category::STARS,
        Particle::new(
            ParticleKind::Star,
            Body::new(DVec2::new(1.0, 300.0), DVec2::new(-50.0, 0.0)),
            4.0,
            Lifecycle::new(),
        ),
    );

    sim.update(DT);

    let star = &sim.registry().category(category::STARS)[0];
    let v = star.body().velocity();
    assert_eq!(v.x, 50.0);
    assert_eq!(star.body().angle(), v.y.atan2(v.x).to_degrees());
}

#[test]
fn test_corner_flips_both_axes() {
    let mut sim = Simulation::seeded(screen(), 14);
    sim.insert(
        category::STARS,
        Particle::new(
            ParticleKind::Star,
            Body::new(DVec2::new(799.0, 599.0), DVec2::new(30.0, 40.0)),
            4.0,
            Lifecycle::new(),
        ),
    );

    sim.update(DT);

    let v = sim.registry().category(category::STARS)[0].body().velocity();
    assert_eq!(v, DVec2::new(-30.0, -40.0));
}

#[test]
fn test_culled_star_leaves_registry() {
    let mut sim = Simulation::seeded(screen(), 15);
    sim.insert(
        category::STARS,
        Particle::from_polar(ParticleKind::Star, DVec2::new(799.0, 300.0), 600.0, 0.0, 2.0, Lifecycle::drifting_star()),
    );

    sim.update(DT);
    assert!(sim.registry().category(category::STARS).is_empty());
}

// ============================================================================
// Decay and bursts
// ============================================================================

#[test]
fn test_linear_decay_is_exact_until_death() {
    let mut sim = Simulation::seeded(screen(), 16);
    sim.insert(
        category::DEBRIS,
        Particle::from_polar(
            ParticleKind::Debris,
            DVec2::new(400.0, 300.0),
            20.0,
            45.0,
            2.0,
            Lifecycle::debris(),
        ),
    );

    let dt = 0.1;
    for n in 1..=3 {
        sim.update(dt);
        let debris = sim.registry().category(category::DEBRIS);
        assert_eq!(debris.len(), 1, "alive after tick {n}");
        assert!((debris[0].size() - (2.0 - 3.0 * dt * n as f64)).abs() < 1e-9);
    }

    let report = sim.update(dt);
    assert_eq!(report.destroyed, 1);
    assert!(sim.registry().category(category::DEBRIS).is_empty());
}

#[test]
fn test_burst_adds_exactly_count_children() {
    let mut sim = Simulation::seeded(screen(), 17);
    let lifecycle = Lifecycle::new()
        .decay(Decay::Linear { rate: 3.0 })
        .burst(Burst::new(12));
    sim.insert(
        category::STARS,
        Particle::from_polar(ParticleKind::Star, DVec2::new(400.0, 300.0), 0.0, 0.0, 1.02, lifecycle),
    );

    let report = sim.update(DT);

    assert_eq!(report.spawned, 12);
    assert_eq!(report.destroyed, 1);
    let debris = sim.registry().category(category::DEBRIS);
    assert_eq!(debris.len(), 12);
    for child in debris {
        assert_eq!(child.burst_count(), 0);
        assert_eq!(child.spawn_rate(), 0.0);
        assert_eq!(child.size(), 1.0);
        assert_eq!(child.position(), DVec2::new(400.0, 300.0));
    }
}

#[test]
fn test_double_destroy_fires_one_burst() {
    let mut ctx = SpawnContext::seeded(screen(), 18);
    let mut out = Vec::new();
    let mut star = Particle::from_polar(
        ParticleKind::Star,
        DVec2::new(10.0, 10.0),
        0.0,
        0.0,
        9.0,
        Lifecycle::falling_star(),
    );

    assert!(star.destroy(DeathCause::Shrunk, &mut ctx, &mut out));
    assert!(!star.destroy(DeathCause::OffScreen, &mut ctx, &mut out));
    assert_eq!(out.len(), 20);
    assert_eq!(star.death_cause(), Some(DeathCause::Shrunk));
}

#[test]
fn test_falling_stars_children_never_cascade() {
    let mut sim = Simulation::seeded(screen(), 19).with_population(category::STARS, &StarTemplate::falling_star(), 4);

    let mut spawned = 0;
    for _ in 0..300 {
        spawned += sim.update(DT).spawned;
    }

    assert!(spawned > 0, "falling stars shed a trail");
    for child in sim.registry().category(category::DEBRIS) {
        assert_eq!(child.kind(), ParticleKind::Debris);
        assert_eq!(child.burst_count(), 0);
        assert_eq!(child.spawn_rate(), 0.0);
        assert!(child.size() >= 1.0);
    }
}

// ============================================================================
// Input, config and output
// ============================================================================

#[test]
fn test_drag_launches_firework() {
    let mut sim = Simulation::seeded(screen(), 20);
    let mut input = Input::new();

    input.pointer_down(MouseButton::Left, DVec2::new(400.0, 580.0));
    let emitter = input
        .pointer_up(MouseButton::Left, DVec2::new(400.0, 480.0))
        .expect("drag aims an emitter");
    assert_eq!(emitter.speed_max, 1000.0);
    // Big enough that no spark shrinks away within three frames.
    sim.launch(emitter.size(3.0..=5.0));

    for _ in 0..3 {
        sim.update(DT);
    }

    let emitted = sim.registry().category(category::SPARKS);
    assert_eq!(emitted.len(), 3);
    for spark in emitted {
        assert_eq!(spark.kind(), ParticleKind::Spark);
    }
    // One marker per emitter on top of the particles.
    assert_eq!(sim.drawables().len(), sim.registry().total_len() + 1);
}

#[test]
fn test_config_json_builds_simulation() {
    let json = r#"{
        "name": "Test field",
        "width": 640,
        "height": 480,
        "seed": 3,
        "scenario": { "type": "hyperdrive", "mass_floor": 1000 },
        "justification": "left"
    }"#;
    let config = SimulationConfig::from_json_str(json).unwrap();
    let mut sim = Simulation::from_config(&config).unwrap();

    assert_eq!(sim.bounds(), Bounds::from_size(640.0, 480.0));
    for _ in 0..60 {
        sim.update(DT);
        assert!(sim.registry().total_mass(category::STARS) >= 1000.0);
    }

    let text = sim.diagnostics().overlay_text(config.justification);
    assert!(text.starts_with("60/frame"));
    assert!(text.lines().any(|l| l.trim_end().ends_with("/stars")));
}

#[test]
fn test_seeded_runs_are_repeatable() {
    let run = || {
        let mut sim = Simulation::seeded(screen(), 21)
            .with_population(category::STARS, &StarTemplate::falling_star(), 3)
            .with_emitter(Emitter::new(DVec2::new(200.0, 500.0), -60.0));
        for _ in 0..120 {
            sim.update(DT);
        }
        sim.drawables()
    };

    assert_eq!(run(), run());
}
