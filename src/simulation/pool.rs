//! Fixed-capacity particle pool
//!
//! Slots are never removed: a particle with `life <= 0` is inert and gets
//! recycled in place by the next spawn request. Spawning picks the *first*
//! inert slot in index order (not least-recently-used). The scan is O(n) per
//! request, which is fine at a few thousand particles; an index free-list is
//! the upgrade path if profiling ever points here.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::params::EmitterParameters;
use super::states::{Aggregate, NVec3, Particle, RenderParticle};

/// The jet counter wraps here. Must stay even so the +X/-X alternation
/// survives the wrap.
pub const JET_COUNTER_WRAP: u32 = 1024;

pub struct ParticlePool {
    particles: Vec<Particle>, // length fixed at construction
    emitter: EmitterParameters,
    jet_counter: u32, // even -> +X, odd -> -X
    rng: StdRng,
    aggregate: Aggregate,
    spawn_failures: u64, // lifetime count of spawn requests that found no inert slot
}

impl ParticlePool {
    /// Allocate `capacity` dead slots. The pool never grows afterwards.
    pub fn new(capacity: usize, emitter: EmitterParameters, seed: u64) -> Self {
        Self {
            particles: vec![Particle::dead(); capacity],
            emitter,
            jet_counter: 0,
            rng: StdRng::seed_from_u64(seed),
            aggregate: Aggregate::empty(),
            spawn_failures: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view of the slots. A slice, so the pool cannot grow.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn emitter(&self) -> &EmitterParameters {
        &self.emitter
    }

    pub fn spawn_failures(&self) -> u64 {
        self.spawn_failures
    }

    pub fn jet_counter(&self) -> u32 {
        self.jet_counter
    }

    /// Respawn up to `count` particles around `origin`.
    /// Returns how many were actually spawned; the shortfall is added to
    /// the spawn-failure counter.
    pub fn request_spawn(&mut self, count: usize, origin: NVec3) -> usize {
        let mut spawned = 0;
        // Slots below `cursor` were either live or just respawned, so resuming
        // from it finds the same slot a scan from index 0 would.
        let mut cursor = 0;

        for _ in 0..count {
            match self.inert_slot_from(cursor) {
                Some(idx) => {
                    self.respawn(idx, origin);
                    cursor = idx + 1;
                    spawned += 1;
                }
                None => break, // nothing frees up mid-request
            }
        }

        let failed = count - spawned;
        if failed > 0 {
            self.spawn_failures += failed as u64;
            debug!(
                "particle pool exhausted: {} of {} spawn requests skipped (capacity {})",
                failed,
                count,
                self.capacity()
            );
        }
        spawned
    }

    /// Index of the first inert slot, scanning from 0
    pub fn first_inert_slot(&self) -> Option<usize> {
        self.inert_slot_from(0)
    }

    fn inert_slot_from(&self, start: usize) -> Option<usize> {
        self.particles
            .iter()
            .skip(start)
            .position(|p| !p.is_alive())
            .map(|offset| start + offset)
    }

    /// Reset slot `idx` according to the jet policy:
    /// - direction alternates +X / -X between successive calls
    /// - position = origin + direction * spawn_radius
    /// - velocity = (direction + random point in a ball) * jet_speed
    /// - color picked by direction sign, full alpha
    ///
    /// Returns false (and leaves the jet counter alone) if `idx` is out of range.
    pub fn respawn(&mut self, idx: usize, origin: NVec3) -> bool {
        if idx >= self.particles.len() {
            return false;
        }
        let dir = NVec3::new(self.next_jet_sign(), 0.0, 0.0);
        let jitter = random_in_ball(&mut self.rng, self.emitter.perturbation);

        let e = &self.emitter;
        let p = &mut self.particles[idx];
        p.x = origin + dir * e.spawn_radius;
        p.v = (dir + jitter) * e.jet_speed;
        p.color = if dir.x > 0.0 { e.color_pos } else { e.color_neg };
        p.color.w = 1.0;
        p.life = e.initial_life;
        p.m = e.mass;
        p.density = 0.0;
        p.pressure = 0.0;
        p.force = NVec3::zeros();
        true
    }

    fn next_jet_sign(&mut self) -> f64 {
        let sign = if self.jet_counter % 2 == 0 { 1.0 } else { -1.0 };
        self.jet_counter = (self.jet_counter + 1) % JET_COUNTER_WRAP;
        sign
    }

    pub fn live_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.live_particles().count()
    }

    /// Total live mass and mass-weighted center. Pure function of the current
    /// state; the center is the zero vector when there is no live mass.
    pub fn compute_aggregate(&self) -> Aggregate {
        let mut total_mass = 0.0;
        let mut weighted = NVec3::zeros();
        for p in self.live_particles() {
            total_mass += p.m;
            weighted += p.x * p.m;
        }

        let center_of_mass = if total_mass > 0.0 {
            weighted / total_mass
        } else {
            NVec3::zeros()
        };

        Aggregate {
            total_mass,
            center_of_mass,
        }
    }

    /// Recompute and cache the aggregate (done after each integration pass)
    pub fn refresh_aggregate(&mut self) -> Aggregate {
        self.aggregate = self.compute_aggregate();
        self.aggregate
    }

    /// Aggregate as of the last refresh
    pub fn aggregate(&self) -> Aggregate {
        self.aggregate
    }

    /// Position and faded color of every live particle, for a renderer
    pub fn render_snapshot(&self) -> Vec<RenderParticle> {
        self.live_particles()
            .map(|p| RenderParticle {
                position: p.x,
                color: p.color,
            })
            .collect()
    }
}

/// Uniform point in a ball of `radius` (rejection sampling)
fn random_in_ball(rng: &mut StdRng, radius: f64) -> NVec3 {
    if radius <= 0.0 {
        return NVec3::zeros();
    }
    loop {
        let p = NVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.norm_squared() <= 1.0 {
            return p * radius;
        }
    }
}
