//! Density and pressure pass
//!
//! Brute-force all-pairs sum, self term included. A spatial hash or grid is
//! the natural place to cut this below O(n²) if particle counts grow.

use rayon::prelude::*;

use super::kernels::poly6;
use super::params::SphParameters;
use super::states::Particle;

/// Density at particle `i`: `Σ_j m_j W_poly6(|x_i - x_j|, h)` over live `j`,
/// including `i` itself. Dead particles read as zero.
pub fn density_at(i: usize, particles: &[Particle], sph: &SphParameters, coeff: f64) -> f64 {
    let pi = &particles[i];
    if !pi.is_alive() {
        return 0.0;
    }

    let mut rho = 0.0;
    for pj in particles.iter().filter(|p| p.is_alive()) {
        let r2 = (pi.x - pj.x).norm_squared();
        rho += pj.m * poly6(r2, sph.h, coeff);
    }
    rho
}

/// Recompute density and pressure for every particle.
///
/// All densities are computed from the current positions before any is
/// written back, and pressures are only derived once every density is final.
/// Dead particles get zero density and pressure.
pub fn density_pressure_pass(particles: &mut [Particle], sph: &SphParameters, parallel: bool) {
    let coeff = sph.poly6_coefficient();
    let n = particles.len();

    let densities: Vec<f64> = {
        let view: &[Particle] = particles;
        if parallel {
            (0..n)
                .into_par_iter()
                .map(|i| density_at(i, view, sph, coeff))
                .collect()
        } else {
            (0..n).map(|i| density_at(i, view, sph, coeff)).collect()
        }
    };

    for (p, rho) in particles.iter_mut().zip(densities) {
        if p.is_alive() {
            p.density = rho;
            p.pressure = sph.pressure(rho);
        } else {
            p.density = 0.0;
            p.pressure = 0.0;
        }
    }
}
