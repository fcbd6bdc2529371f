//! Pairwise collisions and merging within one category.
//!
//! Off by default; enable per category with
//! [`Simulation::with_collisions`](crate::Simulation::with_collisions).
//!
//! Two particles touch when the distance between their centres is below
//! the mean of their sizes. A touching pair that is still closing in is
//! resolved in three steps:
//!
//! 1. both velocities are mirrored about the contact normal
//! 2. speeds are rebalanced so each carries half of the pair's total
//!    `speed * size²`
//! 3. if one is at least 2 units smaller than the other, it is absorbed and
//!    the survivor grows to `sqrt(a² + b²)`, keeping `Σ size²` unchanged
//!
//! Candidate pairs come from a sweep along the x axis, so only particles
//! whose horizontal extents overlap are compared.

use crate::particle::Particle;
use glam::DVec2;

/// Size difference at which the smaller of two touching particles is absorbed.
pub const MERGE_GAP: f64 = 2.0;

/// What a collision pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Pairs whose velocities were exchanged.
    pub collisions: usize,
    /// Particles absorbed into a larger neighbour.
    pub merges: usize,
}

/// Resolve every touching pair among `particles`. Dead particles are skipped.
pub fn resolve(particles: &mut [Particle]) -> CollisionReport {
    let mut report = CollisionReport::default();

    let mut order: Vec<usize> = (0..particles.len())
        .filter(|&i| particles[i].is_alive())
        .collect();
    order.sort_by(|&a, &b| left_edge(&particles[a]).total_cmp(&left_edge(&particles[b])));

    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if !particles[i].is_alive() {
                break;
            }
            if left_edge(&particles[j]) > right_edge(&particles[i]) {
                break;
            }
            if !particles[j].is_alive() {
                continue;
            }

            let (a, b) = pair_mut(particles, i, j);
            if let Some(merged) = collide(a, b) {
                report.collisions += 1;
                if merged {
                    report.merges += 1;
                }
            }
        }
    }

    report
}

/// Resolve one pair. Returns `None` if they don't touch or are separating,
/// `Some(merged)` otherwise.
fn collide(a: &mut Particle, b: &mut Particle) -> Option<bool> {
    let offset = b.position() - a.position();
    let reach = (a.size() + b.size()) / 2.0;
    if offset.length_squared() >= reach * reach {
        return None;
    }

    let normal = offset.try_normalize()?;
    let closing = (b.body().velocity() - a.body().velocity()).dot(normal);
    if closing >= 0.0 {
        return None;
    }

    let va = mirror(a.body().velocity(), normal);
    let vb = mirror(b.body().velocity(), normal);
    a.body_mut().set_velocity(va);
    b.body_mut().set_velocity(vb);

    let shared = (a.body().speed() * a.mass() + b.body().speed() * b.mass()) / 2.0;
    let (mass_a, mass_b) = (a.mass(), b.mass());
    if !a.body().is_stalled() {
        a.body_mut().set_speed(shared / mass_a);
    }
    if !b.body().is_stalled() {
        b.body_mut().set_speed(shared / mass_b);
    }

    let (big, small) = if a.size() >= b.size() { (a, b) } else { (b, a) };
    if small.size() + MERGE_GAP <= big.size() {
        let grown = (big.mass() + small.mass()).sqrt();
        big.set_size(grown);
        small.absorb();
        return Some(true);
    }

    Some(false)
}

/// Reflect `v` about the plane with normal `n`.
#[inline]
fn mirror(v: DVec2, n: DVec2) -> DVec2 {
    v - 2.0 * v.dot(n) * n
}

#[inline]
fn left_edge(p: &Particle) -> f64 {
    p.position().x - p.size() / 2.0
}

#[inline]
fn right_edge(p: &Particle) -> f64 {
    p.position().x + p.size() / 2.0
}

/// Two distinct mutable elements of a slice.
fn pair_mut(items: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
