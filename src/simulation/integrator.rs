//! Fixed-step time integration for the particle pool
//!
//! `euler_integrator` advances velocities then positions (semi-implicit
//! Euler). `sph_step` runs one whole tick in its required order:
//! spawn -> density/pressure -> forces -> integrate -> aggregate.

use log::debug;

use super::density::density_pressure_pass;
use super::forces::ForceSet;
use super::params::SphParameters;
use super::pool::ParticlePool;
use super::states::{GravitationalBody, NVec3, Particle};

/// Everything the caller supplies for one tick. `bodies` is borrowed for the
/// tick only and never retained.
#[derive(Debug, Clone, Copy)]
pub struct TickInput<'a> {
    pub dt: f64, // seconds since the last tick
    pub bodies: &'a [GravitationalBody],
    pub spawn_count: usize,
    pub origin: NVec3, // spawn origin offset
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStats {
    pub spawned: usize,
    pub spawn_failures: usize, // requests skipped this tick for lack of an inert slot
    pub live: usize, // live particles after integration
    pub total_mass: f64,
    pub center_of_mass: NVec3,
    pub max_density: f64,
}

/// Advance every live particle by `dt`.
///
/// Life decays first; a particle that drops to `life <= 0` stops here and
/// is free for the next spawn phase. Survivors get
/// `v += F / ρ * dt` (skipped when ρ is zero: no medium, no acceleration),
/// then `x += v * dt`, and alpha fades linearly as `life / initial_life`.
pub fn euler_integrator(particles: &mut [Particle], dt: f64, initial_life: f64) {
    for p in particles.iter_mut() {
        if !p.is_alive() {
            continue;
        }

        p.life -= dt;
        if !p.is_alive() {
            continue;
        }

        if p.density > 0.0 {
            p.v += p.force / p.density * dt;
        }
        p.x += p.v * dt;
        p.color.w = p.life / initial_life;
    }
}

/// Run one full simulation tick on `pool`.
///
/// Each phase finishes for the whole population before the next starts:
/// every density is final before any force is computed, and every force is
/// final before anything moves.
pub fn sph_step(
    pool: &mut ParticlePool,
    forces: &ForceSet,
    sph: &SphParameters,
    input: TickInput,
    parallel: bool,
) -> TickStats {
    let spawned = pool.request_spawn(input.spawn_count, input.origin);

    density_pressure_pass(pool.particles_mut(), sph, parallel);
    let max_density = pool
        .live_particles()
        .map(|p| p.density)
        .fold(0.0_f64, f64::max);

    forces.apply(pool.particles_mut(), input.bodies, parallel);

    let initial_life = pool.emitter().initial_life;
    euler_integrator(pool.particles_mut(), input.dt, initial_life);

    let aggregate = pool.refresh_aggregate();
    let stats = TickStats {
        spawned,
        spawn_failures: input.spawn_count - spawned,
        live: pool.live_count(),
        total_mass: aggregate.total_mass,
        center_of_mass: aggregate.center_of_mass,
        max_density,
    };

    debug!(
        "tick dt={:.5}: spawned {}, live {}, mass {:.3}, max density {:.4}",
        input.dt, stats.spawned, stats.live, stats.total_mass, stats.max_density
    );
    stats
}
