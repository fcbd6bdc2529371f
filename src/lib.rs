//! # starfall - 2-D particle lifecycle engine
//!
//! Stars, debris and firework sparks that move, shrink, bounce off the
//! screen edges and spawn children, all on the CPU with a simple builder API.
//!
//! starfall owns the per-frame state transitions and the population
//! bookkeeping. Windowing, rendering and input polling stay with the caller:
//! the engine hands out [`Drawable`] snapshots and [`Diagnostics`], and takes
//! a `dt` once per frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use starfall::prelude::*;
//!
//! fn main() {
//!     let mut sim = Simulation::new(Bounds::from_size(800.0, 600.0))
//!         .with_mass_floor(MassFloor::new("stars", 2500.0, StarTemplate::hyperdrive()));
//!
//!     let mut clock = FrameClock::new();
//!     loop {
//!         sim.update(clock.tick());
//!         draw(&sim.drawables());
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] is a kinematic [`Body`] plus a size, a [`Lifecycle`] and
//! looks. Three kinds are built in:
//!
//! - [`ParticleKind::Star`] - top-level particles created by spawners
//! - [`ParticleKind::Debris`] - trail and burst children, shrink at 3 px/s
//! - [`ParticleKind::Spark`] - emitter output, debris that also falls
//!
//! A particle whose size drops below 1 is destroyed; if its lifecycle has a
//! [`Burst`], exactly that many debris children are created where it died.
//!
//! ### Lifecycles
//!
//! ```ignore
//! Lifecycle::new()
//!     .decay(Decay::Linear { rate: 3.0 })   // shrink and slow down
//!     .trail(10.0)                          // ~10 children per second
//!     .burst(Burst::new(20))                // 20 children on death
//!     .gravity(SPARK_GRAVITY)               // px/s² downward
//!     .boundary(Boundary::Cull)             // remove once off-screen
//! ```
//!
//! ### Population
//!
//! The [`Registry`] groups particles by category name and reports the total
//! mass (Σ size²) per category. A [`MassFloor`] tops a category back up to
//! its floor before and after every update pass.
//!
//! ### Emitters and input
//!
//! An [`Emitter`] sits still and emits one spark per frame. [`Input`] turns
//! a left-button drag into an aimed emitter:
//!
//! ```ignore
//! input.pointer_down(MouseButton::Left, start);
//! if let Some(emitter) = input.pointer_up(MouseButton::Left, end) {
//!     sim.launch(emitter);
//! }
//! ```
//!
//! ## Feature Overview
//!
//! | Category | Types |
//! |----------|-------|
//! | Motion | [`Body`], [`Bounds`] |
//! | Decay | [`Decay`] |
//! | Spawning | [`Trail`], [`Burst`], [`Emitter`], [`MassFloor`] |
//! | Collision | [`Registry::resolve_collisions`] |
//! | Output | [`Drawable`], [`Diagnostics`] |
//! | Setup | [`SimulationConfig`], [`Scenario`] |

pub mod body;
pub mod collision;
pub mod config;
pub mod decay;
pub mod emission;
pub mod emitter;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod overlay;
pub mod particle;
pub mod registry;
mod simulation;
pub mod spawn;
pub mod spawner;
pub mod time;
pub mod visuals;

pub use body::{Body, Bounds};
pub use bytemuck;
pub use config::{Launch, Scenario, SimulationConfig, SizeRange};
pub use decay::Decay;
pub use emission::{Burst, Trail};
pub use emitter::Emitter;
pub use error::ConfigError;
pub use glam::{DVec2, Vec4};
pub use input::{Input, MouseButton};
pub use lifecycle::{Boundary, DeathCause, LifeState, Lifecycle, SPARK_GRAVITY};
pub use overlay::{Diagnostics, Justification};
pub use particle::{Particle, ParticleKind};
pub use registry::{Registry, UpdateReport};
pub use simulation::{FrameReport, Simulation};
pub use spawn::SpawnContext;
pub use spawner::{Heading, MassFloor, SpeedRule, StarTemplate};
pub use time::{FrameClock, FrameStats};
pub use visuals::{Drawable, ParticleShape};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use starfall::prelude::*;
/// ```
///
/// This imports:
/// - [`Simulation`] - the simulation builder
/// - [`Particle`], [`ParticleKind`], [`Lifecycle`] - particle definitions
/// - [`MassFloor`], [`StarTemplate`], [`Emitter`] - spawners
/// - [`FrameClock`] - `dt` source for the frame loop
/// - [`DVec2`], [`Vec4`] - glam vector types
pub mod prelude {
    pub use crate::body::{Body, Bounds};
    pub use crate::config::{Scenario, SimulationConfig};
    pub use crate::decay::Decay;
    pub use crate::emission::{Burst, Trail};
    pub use crate::emitter::Emitter;
    pub use crate::input::{Input, MouseButton};
    pub use crate::lifecycle::{Boundary, Lifecycle, SPARK_GRAVITY};
    pub use crate::overlay::{Diagnostics, Justification};
    pub use crate::particle::{category, Particle, ParticleKind};
    pub use crate::registry::Registry;
    pub use crate::simulation::{FrameReport, Simulation};
    pub use crate::spawn::SpawnContext;
    pub use crate::spawner::{Heading, MassFloor, SpeedRule, StarTemplate};
    pub use crate::time::{FrameClock, FrameStats};
    pub use crate::visuals::{Drawable, ParticleShape};
    pub use crate::{DVec2, Vec4};
}
