use std::time::Instant;

use crate::simulation::density::density_pressure_pass;
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::{sph_step, TickInput};
use crate::simulation::params::{EmitterParameters, SphParameters};
use crate::simulation::pool::ParticlePool;
use crate::simulation::states::{GravitationalBody, NVec3, NVec4};

/// Helper to build a pool of `n` live particles at deterministic positions
fn make_pool(n: usize) -> ParticlePool {
    let mut pool = ParticlePool::new(n, make_emitter(), 42);

    for (i, p) in pool.particles_mut().iter_mut().enumerate() {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        p.x = NVec3::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        p.v = NVec3::zeros();
        p.m = 1.0;
        p.life = 1.0e9;
    }
    pool
}

fn make_emitter() -> EmitterParameters {
    EmitterParameters {
        spawn_radius: 1.2,
        jet_speed: 3.0,
        perturbation: 0.3,
        initial_life: 8.0,
        mass: 1.0,
        color_pos: NVec4::new(1.0, 0.45, 0.2, 1.0),
        color_neg: NVec4::new(0.25, 0.5, 1.0, 1.0),
    }
}

fn make_sph() -> SphParameters {
    SphParameters {
        h: 1.0,
        gas_constant: 2.0,
        rest_density: 1.0,
        viscosity: 0.25,
    }
}

/// Time the density/pressure pass alone, sequential vs rayon
pub fn bench_density() {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let sph = make_sph();

    for n in ns {
        let mut pool = make_pool(n);

        // Warm up
        density_pressure_pass(pool.particles_mut(), &sph, false);

        let t0 = Instant::now();
        density_pressure_pass(pool.particles_mut(), &sph, false);
        let dt_seq = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        density_pressure_pass(pool.particles_mut(), &sph, true);
        let dt_par = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, sequential = {:8.6} s, parallel = {:8.6} s", dt_seq, dt_par);
    }
}

/// Time a full tick (density + forces + integration) for a range of n.
/// Paste output directly into a spreadsheet to graph
pub fn bench_tick_curve() {
    let sph = make_sph();
    let forces = ForceSet::sph_with_gravity(&sph, 0.5);
    let bodies = [GravitationalBody::new(NVec3::new(0.0, 1.0, 0.0), 50.0)];

    println!("N,sequential_ms,parallel_ms");

    for n in (500..=8000).step_by(500) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 2000 { 5 } else { 1 };

        let mut timings = [0.0; 2];
        for (slot, parallel) in [false, true].into_iter().enumerate() {
            let mut pool = make_pool(n);
            let input = TickInput {
                dt: 1.0 / 60.0,
                bodies: &bodies,
                spawn_count: 0,
                origin: NVec3::zeros(),
            };

            let t0 = Instant::now();
            for _ in 0..steps {
                sph_step(&mut pool, &forces, &sph, input, parallel);
            }
            timings[slot] = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
        }

        println!("{},{:.6},{:.6}", n, timings[0], timings[1]);
    }
}
